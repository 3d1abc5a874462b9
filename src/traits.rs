//! Persistence abstraction for committing ledger transactions

use async_trait::async_trait;

use crate::ledger::LedgerTransaction;
use crate::types::*;

/// Persistence collaborator for the ledger engine
///
/// Implementations own durability: `commit_transaction` must store every
/// record of the transaction atomically (all or nothing), reject transactions
/// that do not balance, and serialize concurrent commits. Any failure is
/// reported as [`LedgerError::Persistence`] and surfaced to the caller as is.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Allocate a new, not-yet-durable transaction scoped to an organization
    async fn create_transaction(
        &self,
        accounting_organization_id: OrganizationId,
    ) -> LedgerResult<LedgerTransaction>;

    /// Durably persist all records of the transaction and return its id
    async fn commit_transaction(
        &self,
        transaction: &LedgerTransaction,
    ) -> LedgerResult<TransactionId>;
}
