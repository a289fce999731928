//! Aggregations behind the dashboard views.
//!
//! Every function is a pure transform of `&[Transaction]`. The spending
//! views work on the *spend subset* (amount > 0), so credit lines and
//! zero-amount lines never dilute an expense chart. `top_merchants` is the
//! one exception: it ranks the full set so refunds and payments show up too.
//!
//! Only the monthly/daily views parse `trans_date`; a statement with
//! unparseable dates still supports every other aggregation.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use thiserror::Error;

use spendlens_core::Transaction;

/// Ranked views truncate to this many entries.
pub const TOP_N: usize = 10;

#[derive(Debug, Error)]
pub enum AggregateError {
    /// Fatal only to the date-dependent views (monthly trend, daily
    /// pattern, monthly breakdown); everything else stays computable.
    #[error("transaction date {0:?} is not a calendar date")]
    UnparseableDate(String),
}

/// Spending total for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// "YYYY-MM"
    pub month: String,
    pub total: f64,
}

/// Per-category spending totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBreakdown {
    /// "YYYY-MM"
    pub month: String,
    /// Category totals in first-seen order within the month.
    pub categories: Vec<(String, f64)>,
}

/// Spend totals keyed by (weekday, day of month). Rows run Monday..Sunday,
/// columns cover days 1..=31; cells with no transactions stay 0.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPattern {
    cells: [[f64; 31]; 7],
}

impl DailyPattern {
    /// Total for one cell. `day_of_month` must be in 1..=31.
    pub fn get(&self, weekday: Weekday, day_of_month: u32) -> f64 {
        self.cells[weekday.num_days_from_monday() as usize][day_of_month as usize - 1]
    }

    /// Monday-first rows, one per weekday.
    pub fn rows(&self) -> &[[f64; 31]; 7] {
        &self.cells
    }
}

fn spend_subset(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(|t| t.amount > 0.0)
}

/// Group-and-sum keeping first-seen key order.
fn grouped_sum<'a, I, K>(items: I, key: K) -> Vec<(String, f64)>
where
    I: Iterator<Item = &'a Transaction>,
    K: Fn(&Transaction) -> &str,
{
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for t in items {
        let k = key(t);
        if !totals.contains_key(k) {
            order.push(k.to_string());
        }
        *totals.entry(k.to_string()).or_insert(0.0) += t.amount;
    }

    order
        .into_iter()
        .map(|k| {
            let total = totals[&k];
            (k, total)
        })
        .collect()
}

/// Spend-subset totals per category, first-seen order.
pub fn category_totals(transactions: &[Transaction]) -> Vec<(String, f64)> {
    grouped_sum(spend_subset(transactions), |t| &t.category)
}

/// Category totals ranked by total, largest first, truncated to [`TOP_N`].
/// The sort is stable, so ties keep first-seen order.
pub fn top_spending_categories(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals = category_totals(transactions);
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.truncate(TOP_N);
    totals
}

/// Spend-subset transaction counts per category, first-seen order.
pub fn category_frequency(transactions: &[Transaction]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for t in spend_subset(transactions) {
        if !counts.contains_key(&t.category) {
            order.push(t.category.clone());
        }
        *counts.entry(t.category.clone()).or_insert(0) += 1;
    }

    order
        .into_iter()
        .map(|k| {
            let count = counts[&k];
            (k, count)
        })
        .collect()
}

/// Full-set totals per merchant description, largest first, truncated to
/// [`TOP_N`]. Includes credits so a payroll line ranks alongside spending.
pub fn top_merchants(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals = grouped_sum(transactions.iter(), |t| &t.description);
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.truncate(TOP_N);
    totals
}

const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d"];

/// Parse a raw statement date. Accepts the formats seen across the
/// statement exports this handles (MM/DD/YYYY, MM/DD/YY, ISO).
pub fn parse_trans_date(raw: &str) -> Result<NaiveDate, AggregateError> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AggregateError::UnparseableDate(raw.to_string()))
}

/// Spend-subset totals per calendar month, chronological.
pub fn monthly_totals(transactions: &[Transaction]) -> Result<Vec<MonthlyTotal>, AggregateError> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();

    for t in spend_subset(transactions) {
        let date = parse_trans_date(&t.trans_date)?;
        *totals
            .entry(date.format("%Y-%m").to_string())
            .or_insert(0.0) += t.amount;
    }

    Ok(totals
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect())
}

/// Spend-subset totals per (month, category), months chronological,
/// categories in first-seen order within each month.
pub fn monthly_category_breakdown(
    transactions: &[Transaction],
) -> Result<Vec<MonthBreakdown>, AggregateError> {
    type MonthAcc = (Vec<String>, HashMap<String, f64>);
    let mut months: BTreeMap<String, MonthAcc> = BTreeMap::new();

    for t in spend_subset(transactions) {
        let date = parse_trans_date(&t.trans_date)?;
        let (order, totals) = months.entry(date.format("%Y-%m").to_string()).or_default();
        if !totals.contains_key(&t.category) {
            order.push(t.category.clone());
        }
        *totals.entry(t.category.clone()).or_insert(0.0) += t.amount;
    }

    Ok(months
        .into_iter()
        .map(|(month, (order, totals))| MonthBreakdown {
            month,
            categories: order
                .into_iter()
                .map(|c| {
                    let total = totals[&c];
                    (c, total)
                })
                .collect(),
        })
        .collect())
}

/// Spend-subset totals in a weekday × day-of-month matrix.
pub fn daily_pattern(transactions: &[Transaction]) -> Result<DailyPattern, AggregateError> {
    let mut cells = [[0.0f64; 31]; 7];

    for t in spend_subset(transactions) {
        let date = parse_trans_date(&t.trans_date)?;
        let row = date.weekday().num_days_from_monday() as usize;
        let col = date.day() as usize - 1;
        cells[row][col] += t.amount;
    }

    Ok(DailyPattern { cells })
}
