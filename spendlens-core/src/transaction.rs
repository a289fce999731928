//! Record types shared by the ingestion and analytics crates.

use serde::{Deserialize, Serialize};

/// One parsed statement line.
///
/// Dates stay as raw source text; only the date-dependent aggregations in
/// spendlens-analytics parse them, so a statement with odd date strings
/// still ingests and still supports the category/merchant views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub trans_date: String,
    pub post_date: String,
    /// Trimmed of surrounding whitespace at ingestion.
    pub description: String,
    /// Signed as given by the statement: positive = charge/spend,
    /// negative = credit/refund.
    pub amount: f64,
    /// Trimmed of surrounding whitespace at ingestion.
    pub category: String,
}

/// Root aggregate of one ingested statement: running totals plus the
/// transaction list in source row order.
///
/// Invariant: `income + expenses` equals the signed sum of all transaction
/// amounts; every transaction feeds exactly one of the two totals. Both
/// totals are signed as ingested; flipping the sign of income for display
/// is a presentation decision, not made here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialData {
    pub income: f64,
    pub expenses: f64,
    pub transactions: Vec<Transaction>,
}

impl FinancialData {
    /// Signed sum of every transaction amount.
    pub fn net(&self) -> f64 {
        self.income + self.expenses
    }

    /// One line per transaction, all fields, in statement order. This is
    /// the document handed to the question-answering assistant.
    pub fn document_text(&self) -> String {
        self.transactions
            .iter()
            .map(|t| {
                format!(
                    "{} | {} | {} | {:.2} | {}",
                    t.trans_date, t.post_date, t.description, t.amount, t.category
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
