//! # Ledger Engine
//!
//! A double-entry ledger engine: callers describe postings as increases and
//! decreases on general-ledger accounts, the engine resolves each one to a
//! debit or credit from the account type, checks that the transaction
//! balances, and hands it to a persistence collaborator exactly once.
//!
//! ## Features
//!
//! - **Fixed-point money**: two-decimal amounts backed by `BigDecimal`, never floats
//! - **Direction resolution**: debit/credit derived from account type metadata
//! - **Balance checking**: trial balance and validity of a transaction
//! - **Single-commit builder**: organization-scoped, commits at most once
//! - **Storage abstraction**: persistence behind the [`TransactionService`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_engine::{AccountType, GlAccount, Money, TransactionBuilder};
//! use ledger_engine::utils::MemoryTransactionService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), ledger_engine::LedgerError> {
//! let cash = GlAccount::new(1, 42, "Cash", AccountType::new("Bank", true));
//! let revenue = GlAccount::new(2, 42, "Revenue", AccountType::new("Income", false));
//!
//! let mut builder = TransactionBuilder::make(MemoryTransactionService::new(), 42).await?;
//! builder
//!     .increase(&cash, Money::from(100))?
//!     .increase(&revenue, Money::from(100))?;
//! let transaction_id = builder.commit().await?;
//! assert_eq!(transaction_id, 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ledger;
pub mod money;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use money::*;
pub use traits::*;
pub use types::*;
pub use utils::MemoryTransactionService;

// Re-export posting patterns for convenience
pub use ledger::patterns;
