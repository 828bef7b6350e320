use std::sync::LazyLock;

use regex::Regex;

use super::model::{CandidateReading, RecognizedText};

/// A 4–14 digit product code, optional whitespace, then a decimal price.
const READING_PATTERN: &str = r"([0-9]{4,14})\s*([0-9]+(?:\.[0-9]+)?)";

static READING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(READING_PATTERN).expect("reading pattern is a valid regex"));

/// Lifts every (code, price) pair out of the recognized lines.
///
/// Matching is permissive: a line may carry zero, one or several
/// readings and the gap between code and price is whatever OCR left there.
pub fn extract(text: &RecognizedText) -> Vec<CandidateReading> {
    text.lines()
        .iter()
        .flat_map(|line| extract_line(line))
        .collect()
}

/// Non-overlapping, left-to-right matches within a single line.
pub fn extract_line(line: &str) -> Vec<CandidateReading> {
    READING_REGEX
        .captures_iter(line)
        .filter_map(|caps| {
            let code = caps.get(1)?.as_str().to_string();
            let raw_price = caps.get(2)?.as_str().to_string();
            Some(CandidateReading { code, raw_price })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reading(code: &str, raw_price: &str) -> CandidateReading {
        CandidateReading {
            code: code.to_string(),
            raw_price: raw_price.to_string(),
        }
    }

    #[test]
    fn should_compile_reading_pattern() {
        let regex = LazyLock::force(&READING_REGEX);
        assert_eq!(regex.as_str(), READING_PATTERN);
        assert_eq!(regex.captures_len(), 3);
    }

    #[test]
    fn should_extract_code_and_price_separated_by_space() {
        let readings = extract_line("7891910000197 4990");
        assert_eq!(readings, vec![reading("7891910000197", "4990")]);
    }

    #[test]
    fn should_extract_decimal_price() {
        let readings = extract_line("372437   1250.50");
        assert_eq!(readings, vec![reading("372437", "1250.50")]);
    }

    #[test]
    fn should_extract_several_readings_from_one_line() {
        let readings = extract_line("1111 200 2222 300");
        assert_eq!(
            readings,
            vec![reading("1111", "200"), reading("2222", "300")]
        );
    }

    #[test]
    fn should_ignore_line_without_long_enough_code() {
        assert!(extract_line("123 4990").is_empty());
        assert!(extract_line("total").is_empty());
    }

    #[test]
    fn should_split_glued_digits_between_code_and_price() {
        // Greedy code takes 14 digits, the rest becomes the price.
        let readings = extract_line("1234567890123456");
        assert_eq!(readings, vec![reading("12345678901234", "56")]);
    }

    #[test]
    fn should_extract_across_lines_skipping_blank_ones() {
        let text = RecognizedText::from_raw("\n 7891910000197 4990 \n\n  \n372437 1250\n");
        let readings = extract(&text);
        assert_eq!(
            readings,
            vec![reading("7891910000197", "4990"), reading("372437", "1250")]
        );
    }

    #[test]
    fn should_return_nothing_for_text_without_matches() {
        let text = RecognizedText::from_raw("hello\nworld\n12 34");
        assert!(extract(&text).is_empty());
    }

    proptest! {
        #[test]
        fn should_yield_one_reading_per_well_formed_token(
            pairs in prop::collection::vec(("[1-9][0-9]{3,13}", "[1-9][0-9]{0,5}"), 1..5)
        ) {
            let line = pairs
                .iter()
                .map(|(code, price)| format!("{} {}", code, price))
                .collect::<Vec<_>>()
                .join(" x ");

            let readings = extract_line(&line);

            prop_assert_eq!(readings.len(), pairs.len());
            for (reading, (code, price)) in readings.iter().zip(pairs.iter()) {
                prop_assert_eq!(&reading.code, code);
                prop_assert_eq!(&reading.raw_price, price);
            }
        }

        #[test]
        fn should_only_emit_codes_of_four_to_fourteen_digits(line in "[0-9 .a-z]{0,60}") {
            for reading in extract_line(&line) {
                prop_assert!((4..=14).contains(&reading.code.len()));
                prop_assert!(reading.code.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }
}
