//! Medication label parser.
//!
//! Pipeline: Line Normalization → Dosage Extraction + Candidate Extraction → Tiered Matching

mod candidates;
mod dosage;
mod lines;
mod matcher;

pub use candidates::*;
pub use dosage::*;
pub use lines::*;
pub use matcher::*;

use crate::models::ScanResult;
use crate::vocabulary::ReferenceTables;

/// Parser that turns recognized label text into medication records.
///
/// Holds only its reference tables; every call to [`LabelParser::parse`] is
/// independent, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct LabelParser {
    tables: ReferenceTables,
}

impl LabelParser {
    /// Create a parser with the built-in reference tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom reference tables.
    pub fn with_tables(tables: ReferenceTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Parse recognized text. Never fails: unusable input yields an empty
    /// or partial result.
    pub fn parse(&self, raw: Option<&str>) -> ScanResult {
        let lines = normalize_lines(raw.unwrap_or_default());
        if lines.is_empty() {
            return ScanResult::empty();
        }

        // Step 1: Extract candidates and dosages independently
        let candidates = extract_candidates(&lines, &self.tables);
        let dosages = extract_dosages(&lines);

        tracing::debug!(
            candidates = ?candidates
                .iter()
                .map(|c| (c.name.as_str(), c.confidence, c.pattern_source, c.line_index))
                .collect::<Vec<_>>(),
            "found drug candidates"
        );
        tracing::debug!(
            dosages = ?dosages
                .iter()
                .map(|d| (d.formatted.as_str(), d.line_index))
                .collect::<Vec<_>>(),
            "found dosages"
        );

        // Step 2: Reconcile
        let medications = match_candidates(&candidates, &dosages);

        tracing::debug!(
            medications = ?medications
                .iter()
                .map(|m| (m.name.as_str(), m.dosage_formatted().unwrap_or("not found"), m.confidence))
                .collect::<Vec<_>>(),
            "matched medications"
        );

        ScanResult {
            medications,
            full_text: join_lines(&lines),
        }
    }
}

/// Parse recognized text with the built-in reference tables.
pub fn parse_medication_text(raw: &str) -> ScanResult {
    LabelParser::new().parse(Some(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    #[test]
    fn test_absent_and_empty_input() {
        let parser = LabelParser::new();

        assert_eq!(parser.parse(None), ScanResult::empty());
        assert_eq!(parser.parse(Some("")), ScanResult::empty());
        assert_eq!(parser.parse(Some("\n\t \r\n")), ScanResult::empty());
    }

    #[test]
    fn test_all_caps_with_dosage() {
        let result = parse_medication_text("AMOXICILLIN 500mg");

        assert_eq!(result.medications.len(), 1);
        let med = &result.medications[0];
        assert_eq!(med.name, "AMOXICILLIN");
        assert_eq!(med.dosage_formatted(), Some("500mg"));
        assert_eq!(med.confidence, Confidence::High);
        assert_eq!(result.full_text, "AMOXICILLIN 500mg");
    }

    #[test]
    fn test_generic_for_with_dosage_below() {
        let result = parse_medication_text("Lisinopril (Generic for Zestril)\n10 mg");

        assert_eq!(result.medications.len(), 1);
        let med = &result.medications[0];
        assert_eq!(med.name, "Lisinopril");
        assert_eq!(med.generic_name.as_deref(), Some("Lisinopril"));
        assert_eq!(med.brand_name.as_deref(), Some("Zestril"));
        assert_eq!(med.dosage_formatted(), Some("10mg"));
        assert_eq!(med.confidence, Confidence::High);
    }

    #[test]
    fn test_brand_generic_with_dosage_below() {
        let result = parse_medication_text("Advil (Ibuprofen)\n200 mg");

        assert_eq!(result.medications.len(), 1);
        let med = &result.medications[0];
        assert_eq!(med.name, "Ibuprofen");
        assert_eq!(med.brand_name.as_deref(), Some("Advil"));
        assert_eq!(med.generic_name.as_deref(), Some("Ibuprofen"));
        assert_eq!(med.dosage_formatted(), Some("200mg"));
    }

    #[test]
    fn test_custom_tables() {
        let mut tables = ReferenceTables::new();
        tables.add_excluded_word("tylenol");
        let parser = LabelParser::with_tables(tables);

        assert!(parser.tables().is_excluded("Tylenol"));
        assert!(!LabelParser::new().tables().is_excluded("Tylenol"));
        assert!(parser.parse(Some("TYLENOL 325 mg")).is_empty());
        assert_eq!(parse_medication_text("TYLENOL 325 mg").medications.len(), 1);
    }

    #[test]
    fn test_full_text_is_normalized() {
        let result = parse_medication_text("  Rx 12345 \r\n\r\n  Metformin 500 mg  ");
        assert_eq!(result.full_text, "Rx 12345\nMetformin 500 mg");
    }
}
