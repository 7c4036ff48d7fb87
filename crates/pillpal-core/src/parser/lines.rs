//! Line normalization for recognized text.

use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\t\r\n]+").unwrap());

/// A trimmed, non-empty line of recognized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Position among the retained lines
    pub index: usize,
    pub text: String,
}

/// Split raw text into ordered, trimmed, non-empty lines.
///
/// Tabs and carriage returns count as line breaks.
pub fn normalize_lines(raw: &str) -> Vec<Line> {
    LINE_BREAKS
        .split(raw)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, text)| Line {
            index,
            text: text.to_string(),
        })
        .collect()
}

/// Rejoin lines into the normalized text reported back to callers.
pub fn join_lines(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(normalize_lines("").is_empty());
        assert!(normalize_lines(" \n\t\r\n  ").is_empty());
    }

    #[test]
    fn test_trims_and_indexes() {
        let lines = normalize_lines("  Advil (Ibuprofen) \n\n\n200 mg\r\nTake with food");

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], Line { index: 0, text: "Advil (Ibuprofen)".into() });
        assert_eq!(lines[1].text, "200 mg");
        assert_eq!(lines[2].index, 2);
    }

    #[test]
    fn test_tabs_split_lines() {
        let lines = normalize_lines("AMOXICILLIN\t500mg");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "500mg");
    }

    #[test]
    fn test_join_lines() {
        let lines = normalize_lines(" a \r\n\r\n b ");
        assert_eq!(join_lines(&lines), "a\nb");
    }
}
