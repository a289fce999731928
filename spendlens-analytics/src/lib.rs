//! spendlens-analytics: chart-facing aggregations and free-text search over
//! an ingested transaction set.

pub mod aggregate;
pub mod search;

pub use aggregate::{
    AggregateError, DailyPattern, MonthBreakdown, MonthlyTotal, category_frequency,
    category_totals, daily_pattern, monthly_category_breakdown, monthly_totals, top_merchants,
    top_spending_categories,
};
pub use search::search;
