//! Core types and data structures for the ledger engine

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Identifier of an accounting organization (the tenant boundary)
pub type OrganizationId = i64;

/// Identifier of a general-ledger account
pub type GlAccountId = i64;

/// Identifier assigned to a transaction when it is committed
pub type TransactionId = i64;

/// Standard account classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountClass {
    /// Assets - what the business owns (Cash, Inventory, Equipment, etc.)
    Asset,
    /// Liabilities - what the business owes (Loans, Accounts Payable, etc.)
    Liability,
    /// Equity - owner's interest in the business (Capital, Retained Earnings, etc.)
    Equity,
    /// Income/Revenue - money earned by the business
    Income,
    /// Expenses - costs incurred by the business
    Expense,
}

impl AccountClass {
    /// Whether increasing an account of this class is recorded as a debit.
    /// Assets and Expenses increase by debit; Liabilities, Equity, and Income by credit.
    pub fn increase_is_debit(&self) -> bool {
        matches!(self, AccountClass::Asset | AccountClass::Expense)
    }
}

/// Account type metadata consumed by direction resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountType {
    /// Human-readable type name ("Bank", "Accounts Receivable", ...)
    pub name: String,
    /// True when an increase on accounts of this type is a debit
    pub increase_is_debit: bool,
}

impl AccountType {
    pub fn new(name: impl Into<String>, increase_is_debit: bool) -> Self {
        Self {
            name: name.into(),
            increase_is_debit,
        }
    }

    /// Account type following the conventional direction of a class
    pub fn from_class(class: AccountClass) -> Self {
        Self::new(format!("{class:?}"), class.increase_is_debit())
    }

    /// The side on which this type's balance normally sits
    pub fn normal_balance(&self) -> EntryType {
        EntryType::from_is_debit(self.increase_is_debit)
    }
}

/// A general-ledger account as seen by the engine: a read-only snapshot
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlAccount {
    pub id: GlAccountId,
    pub accounting_organization_id: OrganizationId,
    pub name: String,
    pub account_type: AccountType,
}

impl GlAccount {
    pub fn new(
        id: GlAccountId,
        accounting_organization_id: OrganizationId,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id,
            accounting_organization_id,
            name: name.into(),
            account_type,
        }
    }
}

/// Sides of a double-entry posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Debit,
    Credit,
}

impl EntryType {
    pub fn from_is_debit(is_debit: bool) -> Self {
        if is_debit {
            EntryType::Debit
        } else {
            EntryType::Credit
        }
    }

    pub fn is_debit(&self) -> bool {
        matches!(self, EntryType::Debit)
    }

    pub fn opposite(&self) -> Self {
        match self {
            EntryType::Debit => EntryType::Credit,
            EntryType::Credit => EntryType::Debit,
        }
    }
}

/// Whether a posting grows or shrinks the account's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Increase,
    Decrease,
}

impl Operation {
    pub fn is_increase(&self) -> bool {
        matches!(self, Operation::Increase)
    }
}

/// One line of a ledger transaction. Immutable once created; the amount is
/// always strictly positive and the direction lives in `entry_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerRecordRepr")]
pub struct LedgerRecord {
    gl_account_id: GlAccountId,
    amount: Money,
    entry_type: EntryType,
}

/// Unchecked wire shape of a [`LedgerRecord`]; deserialized records go
/// through [`LedgerRecord::new`].
#[derive(Deserialize)]
struct LedgerRecordRepr {
    gl_account_id: GlAccountId,
    amount: Money,
    entry_type: EntryType,
}

impl TryFrom<LedgerRecordRepr> for LedgerRecord {
    type Error = LedgerError;

    fn try_from(repr: LedgerRecordRepr) -> Result<Self, Self::Error> {
        Self::new(repr.gl_account_id, repr.amount, repr.entry_type.is_debit())
    }
}

impl LedgerRecord {
    /// Create a record, rejecting zero and negative amounts
    pub fn new(gl_account_id: GlAccountId, amount: Money, is_debit: bool) -> LedgerResult<Self> {
        crate::utils::validate_positive_amount(&amount)?;
        Ok(Self {
            gl_account_id,
            amount,
            entry_type: EntryType::from_is_debit(is_debit),
        })
    }

    pub fn gl_account_id(&self) -> GlAccountId {
        self.gl_account_id
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn is_debit(&self) -> bool {
        self.entry_type.is_debit()
    }
}

/// Errors that can occur in the ledger engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid amount {amount}: ledger amounts must be greater than zero")]
    InvalidAmount { amount: Money },
    #[error(
        "Account {account_id} belongs to organization {account_organization_id}, \
         not {expected_organization_id}"
    )]
    CrossOrganization {
        account_id: GlAccountId,
        account_organization_id: OrganizationId,
        expected_organization_id: OrganizationId,
    },
    #[error("This transaction has already been processed")]
    AlreadyProcessed,
    #[error("Transaction must have at least one record")]
    EmptyTransaction,
    #[error("Transaction is not balanced: trial balance = {trial_balance}")]
    UnbalancedTransaction { trial_balance: Money },
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
