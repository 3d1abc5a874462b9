//! Ledger engine configuration

use serde::{Deserialize, Serialize};

/// Behavioural switches for [`TransactionBuilder`](crate::ledger::TransactionBuilder).
///
/// Host applications typically deserialize this from their own settings
/// file; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Check that the transaction is non-empty and balanced before handing
    /// it to persistence. When disabled, balance enforcement is left to the
    /// persistence collaborator.
    pub validate_before_commit: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            validate_before_commit: true,
        }
    }
}
