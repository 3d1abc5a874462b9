//! Organization-scoped, single-commit transaction builder

use tracing::{debug, info, instrument, warn};

use crate::config::LedgerConfig;
use crate::ledger::direction::resolve_entry_type;
use crate::ledger::LedgerTransaction;
use crate::money::Money;
use crate::traits::TransactionService;
use crate::types::*;
use crate::utils::validate_account_organization;

/// One leg of a multi-line posting
#[derive(Debug, Clone)]
pub struct Posting<'a> {
    pub account: &'a GlAccount,
    pub amount: Money,
    pub operation: Operation,
}

impl<'a> Posting<'a> {
    pub fn increase(account: &'a GlAccount, amount: Money) -> Self {
        Self {
            account,
            amount,
            operation: Operation::Increase,
        }
    }

    pub fn decrease(account: &'a GlAccount, amount: Money) -> Self {
        Self {
            account,
            amount,
            operation: Operation::Decrease,
        }
    }
}

/// Entry point for posting to the ledger.
///
/// A builder is bound to one accounting organization. Callers express
/// postings as increases and decreases on accounts, the builder resolves
/// each to a debit or credit, and [`commit`](Self::commit) hands the result
/// to the persistence collaborator exactly once.
///
/// Nothing durable happens before `commit`, so dropping a builder abandons
/// the transaction without side effects. A builder is meant to be filled and
/// committed inside one unit of work and is not shared between tasks.
#[derive(Debug)]
pub struct TransactionBuilder<S: TransactionService> {
    service: S,
    transaction: LedgerTransaction,
    config: LedgerConfig,
    processed: bool,
    transaction_id: Option<TransactionId>,
}

impl<S: TransactionService> TransactionBuilder<S> {
    /// Create a builder for an organization with the default configuration
    pub async fn make(service: S, accounting_organization_id: OrganizationId) -> LedgerResult<Self> {
        Self::make_with_config(service, accounting_organization_id, LedgerConfig::default()).await
    }

    /// Create a builder with a custom configuration
    #[instrument(skip(service, config))]
    pub async fn make_with_config(
        service: S,
        accounting_organization_id: OrganizationId,
        config: LedgerConfig,
    ) -> LedgerResult<Self> {
        let transaction = service
            .create_transaction(accounting_organization_id)
            .await?;

        Ok(Self {
            service,
            transaction,
            config,
            processed: false,
            transaction_id: None,
        })
    }

    /// Increase the balance of an account
    pub fn increase(&mut self, account: &GlAccount, amount: Money) -> LedgerResult<&mut Self> {
        self.process_operation(account, amount, Operation::Increase)
    }

    /// Decrease the balance of an account
    pub fn decrease(&mut self, account: &GlAccount, amount: Money) -> LedgerResult<&mut Self> {
        self.process_operation(account, amount, Operation::Decrease)
    }

    /// Resolve the operation to a debit or credit and append the record
    pub fn process_operation(
        &mut self,
        account: &GlAccount,
        amount: Money,
        operation: Operation,
    ) -> LedgerResult<&mut Self> {
        if self.processed {
            return Err(LedgerError::AlreadyProcessed);
        }
        validate_account_organization(account, self.transaction.organization_id())?;

        let entry_type = resolve_entry_type(&account.account_type, operation);
        debug!(
            account_id = account.id,
            amount = %amount,
            ?operation,
            ?entry_type,
            "Adding ledger record"
        );
        self.transaction
            .add_record(account.id, amount, entry_type.is_debit())?;

        Ok(self)
    }

    /// Apply several postings as one unit: every leg is checked for
    /// organization and amount before any record is appended.
    pub fn process_operations<'a>(
        &mut self,
        postings: impl IntoIterator<Item = Posting<'a>>,
    ) -> LedgerResult<&mut Self> {
        if self.processed {
            return Err(LedgerError::AlreadyProcessed);
        }

        let organization_id = self.transaction.organization_id();
        let mut records = Vec::new();
        for posting in postings {
            validate_account_organization(posting.account, organization_id)?;
            let entry_type = resolve_entry_type(&posting.account.account_type, posting.operation);
            records.push((posting.account.id, posting.amount, entry_type.is_debit()));
        }

        debug!(records = records.len(), "Adding ledger records");
        self.transaction.add_records(records)?;

        Ok(self)
    }

    /// Set the description for the transaction
    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.transaction.description = Some(description.into());
        self
    }

    /// Set the reference for the transaction
    pub fn reference(&mut self, reference: impl Into<String>) -> &mut Self {
        self.transaction.reference = Some(reference.into());
        self
    }

    /// Add metadata to the transaction
    pub fn metadata(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.transaction.metadata.insert(key.into(), value.into());
        self
    }

    pub fn transaction(&self) -> &LedgerTransaction {
        &self.transaction
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.transaction.organization_id()
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Id assigned by persistence, once committed
    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction_id
    }

    /// Hand the transaction to persistence.
    ///
    /// Succeeds at most once. On failure the builder stays uncommitted: the
    /// caller may add records and try again, or drop the builder. Nothing is
    /// retried here.
    #[instrument(skip(self), fields(organization_id = self.organization_id(), records = self.transaction.len()))]
    pub async fn commit(&mut self) -> LedgerResult<TransactionId> {
        if self.processed {
            warn!("Rejected commit of an already processed transaction");
            return Err(LedgerError::AlreadyProcessed);
        }

        if self.config.validate_before_commit {
            if let Err(e) = self.transaction.validate() {
                warn!(error = %e, "Rejected commit of an invalid transaction");
                return Err(e);
            }
        }

        let transaction_id = match self.service.commit_transaction(&self.transaction).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Persistence rejected transaction");
                return Err(e);
            }
        };

        self.processed = true;
        self.transaction_id = Some(transaction_id);
        info!(transaction_id, "Committed ledger transaction");

        Ok(transaction_id)
    }
}
