//! spendlens-ingest: parse bank-statement CSV exports into `FinancialData`.
//!
//! Expected header row (exact names):
//! Trans. Date,Post Date,Description,Amount,Category
//!
//! Amounts may carry thousands separators ("1,234.56"). One malformed row
//! fails the whole statement; a partially-ingested statement is worse than
//! no statement, so there is no skip-and-continue path here.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use spendlens_core::{Classifier, FinancialData, Transaction};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read statement: {0}")]
    Io(#[from] io::Error),
    /// Missing required column, non-numeric amount, or otherwise broken row.
    #[error("statement could not be parsed: {0}")]
    MalformedRow(String),
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::MalformedRow(err.to_string())
    }
}

/// One raw statement row, keyed by the export's exact header names.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Trans. Date")]
    pub trans_date: String,
    #[serde(rename = "Post Date")]
    pub post_date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl RawRecord {
    /// Normalize into a typed transaction. Dates pass through as raw text;
    /// description and category are trimmed; the amount is validated here.
    pub fn into_transaction(self) -> Result<Transaction, IngestError> {
        let amount = parse_amount(&self.amount)?;
        Ok(Transaction {
            trans_date: self.trans_date,
            post_date: self.post_date,
            description: self.description.trim().to_string(),
            amount,
            category: self.category.trim().to_string(),
        })
    }
}

/// Strip thousands separators and parse as a signed decimal.
fn parse_amount(raw: &str) -> Result<f64, IngestError> {
    let cleaned = raw.replace(',', "");
    let amount: f64 = cleaned
        .trim()
        .parse()
        .map_err(|_| IngestError::MalformedRow(format!("amount {raw:?} is not numeric")))?;
    if !amount.is_finite() {
        return Err(IngestError::MalformedRow(format!(
            "amount {raw:?} is not a finite number"
        )));
    }
    Ok(amount)
}

/// Fold raw rows into `FinancialData` in source order.
///
/// Each amount lands in exactly one of the two running totals, chosen by
/// the classifier from the category alone. Zero rows is a valid statement
/// and produces empty `FinancialData`, not an error.
pub fn ingest_records<I>(rows: I, classifier: &Classifier) -> Result<FinancialData, IngestError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut income = 0.0;
    let mut expenses = 0.0;
    let mut transactions = Vec::new();

    for row in rows {
        let txn = row.into_transaction()?;
        if classifier.is_income(&txn.category) {
            income += txn.amount;
        } else {
            expenses += txn.amount;
        }
        transactions.push(txn);
    }

    Ok(FinancialData {
        income,
        expenses,
        transactions,
    })
}

/// Ingest a headered CSV statement from any reader.
pub fn ingest_csv<R: io::Read>(
    reader: R,
    classifier: &Classifier,
) -> Result<FinancialData, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let raw: RawRecord = result?;
        rows.push(raw);
    }
    ingest_records(rows, classifier)
}

/// Ingest a CSV statement file with the default classifier. The file handle
/// is released when this returns, success or not.
pub fn ingest_csv_path(path: impl AsRef<Path>) -> Result<FinancialData, IngestError> {
    let file = File::open(path.as_ref())?;
    ingest_csv(file, &Classifier::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STATEMENT: &str = "\
Trans. Date,Post Date,Description,Amount,Category
01/01/2024,01/02/2024, Coffee ,5.00,Dining
01/03/2024,01/04/2024,Payroll,\"-2,000.00\",Income
";

    fn ingest(csv_text: &str) -> Result<FinancialData, IngestError> {
        ingest_csv(csv_text.as_bytes(), &Classifier::default())
    }

    #[test]
    fn test_ingest_basic_statement() {
        let data = ingest(STATEMENT).unwrap();
        assert_eq!(data.transactions.len(), 2);
        assert_eq!(data.expenses, 5.0);
        assert_eq!(data.income, -2000.0);
    }

    #[test]
    fn test_description_and_category_trimmed() {
        let data = ingest(STATEMENT).unwrap();
        assert_eq!(data.transactions[0].description, "Coffee");
        assert_eq!(data.transactions[0].category, "Dining");
    }

    #[test]
    fn test_comma_separator_stripped_from_amount() {
        let data = ingest(STATEMENT).unwrap();
        assert_eq!(data.transactions[1].amount, -2000.0);
    }

    #[test]
    fn test_dates_pass_through_as_text() {
        let data = ingest(STATEMENT).unwrap();
        assert_eq!(data.transactions[0].trans_date, "01/01/2024");
        assert_eq!(data.transactions[0].post_date, "01/02/2024");
    }

    #[test]
    fn test_totals_conserve_grand_total() {
        let data = ingest(STATEMENT).unwrap();
        let sum: f64 = data.transactions.iter().map(|t| t.amount).sum();
        assert!((data.income + data.expenses - sum).abs() < 1e-9);
    }

    #[test]
    fn test_row_order_preserved() {
        let csv_text = "\
Trans. Date,Post Date,Description,Amount,Category
01/01/2024,01/02/2024,First,1.00,Dining
01/02/2024,01/03/2024,Second,2.00,Dining
01/03/2024,01/04/2024,Third,3.00,Dining
";
        let data = ingest(csv_text).unwrap();
        let descriptions: Vec<_> = data
            .transactions
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(descriptions, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_non_numeric_amount_fails_whole_statement() {
        let csv_text = "\
Trans. Date,Post Date,Description,Amount,Category
01/01/2024,01/02/2024,Coffee,5.00,Dining
01/03/2024,01/04/2024,Broken,abc,Dining
";
        let err = ingest(csv_text).unwrap_err();
        assert!(matches!(err, IngestError::MalformedRow(_)));
    }

    #[test]
    fn test_missing_column_fails() {
        let csv_text = "\
Trans. Date,Post Date,Description,Amount
01/01/2024,01/02/2024,Coffee,5.00
";
        let err = ingest(csv_text).unwrap_err();
        assert!(matches!(err, IngestError::MalformedRow(_)));
    }

    #[test]
    fn test_nan_amount_rejected() {
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_empty_statement_is_not_an_error() {
        let data = ingest("Trans. Date,Post Date,Description,Amount,Category\n").unwrap();
        assert_eq!(data.income, 0.0);
        assert_eq!(data.expenses, 0.0);
        assert!(data.transactions.is_empty());
    }

    #[test]
    fn test_custom_classifier_reroutes_without_pipeline_changes() {
        let csv_text = "\
Trans. Date,Post Date,Description,Amount,Category
01/01/2024,01/02/2024,Store refund,-12.00,Refunds
";
        let classifier = Classifier::new(["refunds"]);
        let data = ingest_csv(csv_text.as_bytes(), &classifier).unwrap();
        assert_eq!(data.income, -12.0);
        assert_eq!(data.expenses, 0.0);
    }

    #[test]
    fn test_ingest_csv_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STATEMENT.as_bytes()).unwrap();

        let data = ingest_csv_path(file.path()).unwrap();
        assert_eq!(data.transactions.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ingest_csv_path("/nonexistent/statement.csv").unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
