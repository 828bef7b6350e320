use std::collections::HashSet;

use super::catalog::RetailerCatalog;
use super::model::{RetailerGuess, ValidatedReading};

/// Attributes a scan to a retailer.
///
/// Returns the first retailer, in catalog declaration order, that knows at
/// least one of the scanned codes. Codes shared by several retailers are not
/// disambiguated: declaration order is the tie-break.
pub fn resolve(readings: &[ValidatedReading], catalog: &RetailerCatalog) -> RetailerGuess {
    let scanned: HashSet<&str> = readings.iter().map(|r| r.code.as_str()).collect();
    if scanned.is_empty() {
        return RetailerGuess::Unknown;
    }

    catalog
        .retailers()
        .find(|(_, codes)| scanned.iter().any(|code| codes.contains(*code)))
        .map(|(name, _)| RetailerGuess::Known(name.to_string()))
        .unwrap_or(RetailerGuess::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scan::catalog::RetailerEntry;

    fn entry(retailer: &str, codes: &[&str]) -> RetailerEntry {
        RetailerEntry {
            retailer: retailer.to_string(),
            codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn reading(code: &str) -> ValidatedReading {
        ValidatedReading {
            code: code.to_string(),
            normalized_price: 1000,
        }
    }

    #[test]
    fn should_resolve_retailer_owning_the_code() {
        let catalog = RetailerCatalog::new(vec![
            entry("Acme", &["7891910000197"]),
            entry("Globex", &["372437"]),
        ])
        .unwrap();

        let guess = resolve(&[reading("372437")], &catalog);
        assert_eq!(guess, RetailerGuess::Known("Globex".to_string()));
    }

    #[test]
    fn should_pick_first_declared_retailer_when_code_is_shared() {
        let catalog = RetailerCatalog::new(vec![
            entry("Globex", &["5555", "372437"]),
            entry("Acme", &["5555"]),
        ])
        .unwrap();

        let guess = resolve(&[reading("5555")], &catalog);
        assert_eq!(guess, RetailerGuess::Known("Globex".to_string()));

        let reversed = RetailerCatalog::new(vec![
            entry("Acme", &["5555"]),
            entry("Globex", &["5555", "372437"]),
        ])
        .unwrap();

        let guess = resolve(&[reading("5555")], &reversed);
        assert_eq!(guess, RetailerGuess::Known("Acme".to_string()));
    }

    #[test]
    fn should_follow_catalog_order_not_reading_order() {
        let catalog = RetailerCatalog::new(vec![
            entry("Acme", &["1111"]),
            entry("Globex", &["2222"]),
        ])
        .unwrap();

        let guess = resolve(&[reading("2222"), reading("1111")], &catalog);
        assert_eq!(guess, RetailerGuess::Known("Acme".to_string()));
    }

    #[test]
    fn should_return_unknown_without_readings() {
        let catalog = RetailerCatalog::new(vec![entry("Acme", &["1111"])]).unwrap();
        assert_eq!(resolve(&[], &catalog), RetailerGuess::Unknown);
    }

    #[test]
    fn should_return_unknown_when_no_retailer_matches() {
        let catalog = RetailerCatalog::new(vec![entry("Acme", &["1111"])]).unwrap();
        assert_eq!(resolve(&[reading("9999")], &catalog), RetailerGuess::Unknown);
    }
}
