//! Dosage token extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{DosageId, DosageToken};

use super::lines::Line;

// Longer unit spellings come first so "grams" is not cut short at "g".
static DOSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?-u:\b)([0-9]+(?:\.[0-9]+)?)\s?(milligrams?|micrograms?|grams?|units?|mcgs?|mgs?|mls?|ius?|g)(?-u:\b)",
    )
    .unwrap()
});

/// Extract every amount+unit token, in line order then left-to-right.
///
/// Identifiers are assigned sequentially from zero.
pub fn extract_dosages(lines: &[Line]) -> Vec<DosageToken> {
    let mut tokens = Vec::new();

    for line in lines {
        for caps in DOSAGE.captures_iter(&line.text) {
            let Ok(amount) = caps[1].parse::<f64>() else {
                continue;
            };
            let id = DosageId(tokens.len() as u32);
            tokens.push(DosageToken::new(id, amount, &caps[2], line.index));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lines::normalize_lines;

    fn formatted(text: &str) -> Vec<String> {
        extract_dosages(&normalize_lines(text))
            .into_iter()
            .map(|t| t.formatted)
            .collect()
    }

    #[test]
    fn test_attached_and_spaced_units() {
        assert_eq!(formatted("AMOXICILLIN 500mg"), vec!["500mg"]);
        assert_eq!(formatted("10 mg"), vec!["10mg"]);
        assert_eq!(formatted("2.5 mL"), vec!["2.5ml"]);
        assert_eq!(formatted("1000 IU"), vec!["1000iu"]);
    }

    #[test]
    fn test_unit_normalization() {
        let tokens = extract_dosages(&normalize_lines("500 mgs\n2 units\n1 gram\n5 Micrograms"));
        let units: Vec<&str> = tokens.iter().map(|t| t.unit.as_str()).collect();

        assert_eq!(units, vec!["mg", "unit", "gram", "microgram"]);
        assert_eq!(tokens[0].amount, 500.0);
    }

    #[test]
    fn test_multiple_tokens_per_line() {
        let tokens = extract_dosages(&normalize_lines("Header\nAcetaminophen 325 mg / Codeine 30mg"));

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].formatted, "325mg");
        assert_eq!(tokens[1].formatted, "30mg");
        assert!(tokens.iter().all(|t| t.line_index == 1));
        assert_eq!(tokens[0].id, DosageId(0));
        assert_eq!(tokens[1].id, DosageId(1));
    }

    #[test]
    fn test_no_match_inside_words() {
        assert!(formatted("Lot X500mg").is_empty());
        assert!(formatted("5 mgx").is_empty());
        assert!(formatted("Take 2 tablets").is_empty());
        // Non-ASCII letters do not extend a unit
        assert_eq!(formatted("200 mgé"), vec!["200mg"]);
    }

    #[test]
    fn test_trailing_zero_amount() {
        assert_eq!(formatted("10.0 mg"), vec!["10mg"]);
        assert_eq!(formatted("0.125 mg"), vec!["0.125mg"]);
    }
}
