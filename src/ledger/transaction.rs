//! Ledger transaction aggregate

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::money::Money;
use crate::types::*;

/// An in-memory set of ledger records for one accounting organization.
///
/// Records can only be appended. The aggregate stores account ids, not
/// accounts, so it cannot check organization membership itself; that is
/// done by [`TransactionBuilder`](super::TransactionBuilder) before a record
/// is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    accounting_organization_id: OrganizationId,
    records: Vec<LedgerRecord>,
    /// Description of the transaction
    pub description: Option<String>,
    /// Optional reference number (invoice number, payment number, etc.)
    pub reference: Option<String>,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
    /// When the transaction was created
    pub created_at: NaiveDateTime,
}

impl LedgerTransaction {
    /// Create an empty transaction
    pub fn new(accounting_organization_id: OrganizationId) -> Self {
        Self {
            accounting_organization_id,
            records: Vec::new(),
            description: None,
            reference: None,
            metadata: HashMap::new(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.accounting_organization_id
    }

    /// Records in insertion order
    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record. Fails with [`LedgerError::InvalidAmount`] when the
    /// amount is not positive, leaving the transaction untouched.
    pub fn add_record(
        &mut self,
        gl_account_id: GlAccountId,
        amount: Money,
        is_debit: bool,
    ) -> LedgerResult<()> {
        let record = LedgerRecord::new(gl_account_id, amount, is_debit)?;
        self.records.push(record);
        Ok(())
    }

    /// Append several records at once. Every record is checked before any is
    /// appended, so on error the transaction is left untouched.
    pub fn add_records(
        &mut self,
        records: impl IntoIterator<Item = (GlAccountId, Money, bool)>,
    ) -> LedgerResult<()> {
        let records = records
            .into_iter()
            .map(|(gl_account_id, amount, is_debit)| {
                LedgerRecord::new(gl_account_id, amount, is_debit)
            })
            .collect::<LedgerResult<Vec<_>>>()?;
        self.records.extend(records);
        Ok(())
    }

    /// Calculate total debits
    pub fn total_debits(&self) -> Money {
        self.records
            .iter()
            .filter(|r| r.is_debit())
            .map(|r| r.amount())
            .sum()
    }

    /// Calculate total credits
    pub fn total_credits(&self) -> Money {
        self.records
            .iter()
            .filter(|r| !r.is_debit())
            .map(|r| r.amount())
            .sum()
    }

    /// Credits minus debits. Zero for a balanced transaction.
    pub fn trial_balance(&self) -> Money {
        self.total_credits() - self.total_debits()
    }

    /// Check that the transaction has records and balances
    pub fn validate(&self) -> LedgerResult<()> {
        if self.records.is_empty() {
            return Err(LedgerError::EmptyTransaction);
        }

        let trial_balance = self.trial_balance();
        if !trial_balance.is_zero() {
            return Err(LedgerError::UnbalancedTransaction { trial_balance });
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
