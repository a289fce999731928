//! Free-text filtering over the transaction list.

use spendlens_core::Transaction;

/// Case-insensitive substring filter over the four text fields of each
/// transaction (both dates, description, category). Original order is
/// preserved; nothing is mutated.
///
/// An empty query matches every transaction. Callers that treat an empty
/// search box as "no search" should skip the call rather than expect an
/// empty result.
pub fn search<'a>(transactions: &'a [Transaction], query: &str) -> Vec<&'a Transaction> {
    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|t| {
            t.trans_date.to_lowercase().contains(&needle)
                || t.post_date.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
                || t.category.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(trans_date: &str, description: &str, category: &str) -> Transaction {
        Transaction {
            trans_date: trans_date.to_string(),
            post_date: "01/31/2024".to_string(),
            description: description.to_string(),
            amount: 1.0,
            category: category.to_string(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("01/05/2024", "STARBUCKS #1234", "Dining"),
            txn("01/07/2024", "Shell Oil", "Gasoline"),
            txn("02/01/2024", "Starbucks Reserve", "Dining"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let txns = sample();
        let hits = search(&txns, "starbucks");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_search_preserves_order() {
        let txns = sample();
        let hits = search(&txns, "dining");
        assert_eq!(hits[0].description, "STARBUCKS #1234");
        assert_eq!(hits[1].description, "Starbucks Reserve");
    }

    #[test]
    fn test_search_matches_dates() {
        let txns = sample();
        let hits = search(&txns, "02/01");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "Starbucks Reserve");
    }

    #[test]
    fn test_search_no_match_returns_nothing() {
        let txns = sample();
        assert!(search(&txns, "walmart").is_empty());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let txns = sample();
        assert_eq!(search(&txns, "").len(), txns.len());
    }
}
