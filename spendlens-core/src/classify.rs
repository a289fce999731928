//! Income/expense classification.
//!
//! Statements mark credits with category names like "Payments and Credits";
//! everything else is spending. The name list lives in data so a new
//! credit-meaning category is a one-line change, not a pipeline edit.

/// Routes a transaction to the income or expense total based on its
/// category name alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    /// Lowercase category names that mean income/credit.
    credit_categories: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(["payments and credits", "income"])
    }
}

impl Classifier {
    /// Build a classifier from credit-meaning category names.
    /// Names are matched whole (not as substrings), case-insensitively.
    pub fn new<I, S>(credit_categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            credit_categories: credit_categories
                .into_iter()
                .map(|s| s.into().trim().to_lowercase())
                .collect(),
        }
    }

    /// True if this category routes to the income total.
    pub fn is_income(&self, category: &str) -> bool {
        let category = category.trim().to_lowercase();
        self.credit_categories.iter().any(|c| *c == category)
    }
}
