//! spendlens-core: statement record types and the income/expense classifier

pub mod classify;
pub mod transaction;

pub use classify::Classifier;
pub use transaction::{FinancialData, Transaction};
