//! Ledger module containing direction resolution, the transaction aggregate, and the builder

pub mod builder;
pub mod direction;
pub mod patterns;
pub mod transaction;

pub use builder::*;
pub use direction::*;
pub use transaction::*;
