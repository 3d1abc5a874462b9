//! In-memory persistence implementation for testing

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::ledger::LedgerTransaction;
use crate::traits::*;
use crate::types::*;

/// A transaction as stored by [`MemoryTransactionService`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedTransaction {
    pub id: TransactionId,
    pub transaction: LedgerTransaction,
    pub committed_at: NaiveDateTime,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: TransactionId,
    unavailable: bool,
    transactions: BTreeMap<TransactionId, CommittedTransaction>,
}

/// In-memory transaction service for testing and development.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransactionService {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryTransactionService {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| LedgerError::Persistence("memory storage lock poisoned".to_string()))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| LedgerError::Persistence("memory storage lock poisoned".to_string()))
    }

    /// Simulate the store going offline: while unavailable every call fails
    pub fn set_unavailable(&self, unavailable: bool) -> LedgerResult<()> {
        self.write()?.unavailable = unavailable;
        Ok(())
    }

    /// Get a committed transaction by id
    pub fn get_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> LedgerResult<Option<CommittedTransaction>> {
        Ok(self.read()?.transactions.get(&transaction_id).cloned())
    }

    /// All committed transactions of an organization, ordered by id
    pub fn transactions_for_organization(
        &self,
        accounting_organization_id: OrganizationId,
    ) -> LedgerResult<Vec<CommittedTransaction>> {
        Ok(self
            .read()?
            .transactions
            .values()
            .filter(|c| c.transaction.organization_id() == accounting_organization_id)
            .cloned()
            .collect())
    }

    pub fn committed_count(&self) -> LedgerResult<usize> {
        Ok(self.read()?.transactions.len())
    }

    /// Clear all stored transactions (useful for testing). Ids keep counting
    /// up, so an id is never handed out twice.
    pub fn clear(&self) -> LedgerResult<()> {
        self.write()?.transactions.clear();
        Ok(())
    }
}

#[async_trait]
impl TransactionService for MemoryTransactionService {
    async fn create_transaction(
        &self,
        accounting_organization_id: OrganizationId,
    ) -> LedgerResult<LedgerTransaction> {
        if self.read()?.unavailable {
            return Err(LedgerError::Persistence("storage unavailable".to_string()));
        }
        Ok(LedgerTransaction::new(accounting_organization_id))
    }

    async fn commit_transaction(
        &self,
        transaction: &LedgerTransaction,
    ) -> LedgerResult<TransactionId> {
        transaction
            .validate()
            .map_err(|e| LedgerError::Persistence(format!("rejected transaction: {e}")))?;

        let mut state = self.write()?;
        if state.unavailable {
            return Err(LedgerError::Persistence("storage unavailable".to_string()));
        }

        let id = state.last_id + 1;
        state.last_id = id;
        state.transactions.insert(
            id,
            CommittedTransaction {
                id,
                transaction: transaction.clone(),
                committed_at: chrono::Utc::now().naive_utc(),
            },
        );
        debug!(transaction_id = id, records = transaction.len(), "Stored transaction");

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn balanced(org: OrganizationId) -> LedgerTransaction {
        let mut transaction = LedgerTransaction::new(org);
        transaction.add_record(1, Money::from(10), true).unwrap();
        transaction.add_record(2, Money::from(10), false).unwrap();
        transaction
    }

    #[tokio::test]
    async fn test_sequential_ids_and_lookup() {
        let service = MemoryTransactionService::new();
        let first = service.commit_transaction(&balanced(1)).await.unwrap();
        let second = service.commit_transaction(&balanced(2)).await.unwrap();
        assert_eq!((first, second), (1, 2));

        let stored = service.get_transaction(first).unwrap().unwrap();
        assert_eq!(stored.transaction.len(), 2);
        assert_eq!(service.transactions_for_organization(2).unwrap().len(), 1);
        assert!(service.get_transaction(99).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_unbalanced() {
        let service = MemoryTransactionService::new();
        let mut transaction = LedgerTransaction::new(1);
        transaction.add_record(1, Money::from(10), true).unwrap();

        let err = service.commit_transaction(&transaction).await.unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(service.committed_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let service = MemoryTransactionService::new();
        service.set_unavailable(true).unwrap();
        assert!(service.create_transaction(1).await.is_err());
        assert!(service.commit_transaction(&balanced(1)).await.is_err());

        service.set_unavailable(false).unwrap();
        assert_eq!(service.commit_transaction(&balanced(1)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let service = MemoryTransactionService::new();
        service.commit_transaction(&balanced(1)).await.unwrap();
        service.clear().unwrap();
        assert_eq!(service.committed_count().unwrap(), 0);
        assert_eq!(service.commit_transaction(&balanced(1)).await.unwrap(), 2);
        assert!(service.get_transaction(1).unwrap().is_none());
    }
}
