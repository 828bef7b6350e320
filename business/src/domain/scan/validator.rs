use super::catalog::RetailerCatalog;
use super::model::{CandidateReading, MAX_PRICE, MIN_PRICE, ValidatedReading};

/// Promotes a candidate to a validated reading, or drops it.
///
/// The code must be known to at least one retailer and the price must land
/// in `[MIN_PRICE, MAX_PRICE)` after normalization. Rejection is silent.
pub fn validate(candidate: &CandidateReading, catalog: &RetailerCatalog) -> Option<ValidatedReading> {
    if !catalog.contains_code(&candidate.code) {
        return None;
    }

    let normalized_price = adjust_price(&candidate.raw_price)?;
    if !is_valid_price(normalized_price) {
        return None;
    }

    Some(ValidatedReading {
        code: candidate.code.clone(),
        normalized_price,
    })
}

pub fn validate_all(candidates: &[CandidateReading], catalog: &RetailerCatalog) -> Vec<ValidatedReading> {
    candidates
        .iter()
        .filter_map(|candidate| validate(candidate, catalog))
        .collect()
}

pub fn is_valid_price(price: u32) -> bool {
    (MIN_PRICE..MAX_PRICE).contains(&price)
}

/// Normalizes an OCR price token to a whole number.
///
/// OCR tends to glue stray digits onto the end of a price, so while the value
/// exceeds `MAX_PRICE` the last character is dropped and the rest re-parsed.
/// Returns `None` when nothing parseable is left.
pub fn adjust_price(raw: &str) -> Option<u32> {
    let trimmed = trim_overflow(raw);
    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.round() as u32)
}

/// Drops trailing characters while the parsed value is above `MAX_PRICE`.
fn trim_overflow(raw: &str) -> &str {
    let limit = f64::from(MAX_PRICE);
    let mut current = raw;

    while let Ok(value) = current.parse::<f64>() {
        if value <= limit {
            break;
        }
        let mut chars = current.chars();
        chars.next_back();
        current = chars.as_str();
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scan::catalog::RetailerEntry;
    use proptest::prelude::*;

    fn catalog() -> RetailerCatalog {
        RetailerCatalog::new(vec![
            RetailerEntry {
                retailer: "Acme".to_string(),
                codes: vec!["7891910000197".to_string()],
            },
            RetailerEntry {
                retailer: "Globex".to_string(),
                codes: vec!["372437".to_string()],
            },
        ])
        .unwrap()
    }

    fn candidate(code: &str, raw_price: &str) -> CandidateReading {
        CandidateReading {
            code: code.to_string(),
            raw_price: raw_price.to_string(),
        }
    }

    #[test]
    fn should_accept_known_code_with_price_in_range() {
        let result = validate(&candidate("7891910000197", "4990"), &catalog());
        assert_eq!(
            result,
            Some(ValidatedReading {
                code: "7891910000197".to_string(),
                normalized_price: 4990,
            })
        );
    }

    #[test]
    fn should_trim_trailing_digits_until_price_fits() {
        assert_eq!(adjust_price("123456"), Some(12345));
        let result = validate(&candidate("372437", "123456"), &catalog());
        assert_eq!(result.map(|r| r.normalized_price), Some(12345));
    }

    #[test]
    fn should_trim_repeatedly() {
        assert_eq!(adjust_price("99999999"), Some(9999));
    }

    #[test]
    fn should_round_decimal_prices() {
        assert_eq!(adjust_price("1250.5"), Some(1251));
        assert_eq!(adjust_price("1250.49"), Some(1250));
    }

    #[test]
    fn should_keep_exact_upper_bound_and_reject_it() {
        assert_eq!(adjust_price("50000"), Some(50_000));
        assert_eq!(validate(&candidate("372437", "50000"), &catalog()), None);
    }

    #[test]
    fn should_reject_price_below_minimum() {
        assert_eq!(adjust_price("99"), Some(99));
        assert_eq!(validate(&candidate("372437", "99"), &catalog()), None);
    }

    #[test]
    fn should_accept_minimum_price() {
        let result = validate(&candidate("372437", "100"), &catalog());
        assert_eq!(result.map(|r| r.normalized_price), Some(100));
    }

    #[test]
    fn should_reject_unknown_code() {
        assert_eq!(validate(&candidate("1234567", "4990"), &catalog()), None);
    }

    #[test]
    fn should_reject_unparseable_price() {
        assert_eq!(adjust_price(""), None);
        assert_eq!(adjust_price("abc"), None);
    }

    #[test]
    fn should_drop_rejected_candidates_from_batch() {
        let readings = validate_all(
            &[
                candidate("7891910000197", "4990"),
                candidate("0000", "4990"),
                candidate("372437", "12"),
            ],
            &catalog(),
        );
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].code, "7891910000197");
    }

    proptest! {
        #[test]
        fn should_never_increase_price_while_trimming(raw in "[0-9]{1,12}(\\.[0-9]{1,4})?") {
            let original = raw.parse::<f64>().unwrap();
            let trimmed = trim_overflow(&raw);

            prop_assert!(raw.starts_with(trimmed));
            if let Ok(value) = trimmed.parse::<f64>() {
                prop_assert!(value <= original);
                prop_assert!(value <= f64::from(MAX_PRICE));
            } else {
                prop_assert!(trimmed.is_empty());
            }
        }

        #[test]
        fn should_only_emit_prices_in_range(
            code in prop::sample::select(vec!["7891910000197", "372437", "123456"]),
            raw in "[0-9]{1,12}(\\.[0-9]{1,4})?"
        ) {
            let catalog = catalog();
            if let Some(reading) = validate(&candidate(code, &raw), &catalog) {
                prop_assert!(reading.normalized_price >= MIN_PRICE);
                prop_assert!(reading.normalized_price < MAX_PRICE);
                prop_assert!(catalog.contains_code(&reading.code));
            }
        }
    }
}
