//! PillPal Core Library
//!
//! Turns the text recognized on a photographed medication label into
//! structured medication records.
//!
//! # Architecture
//!
//! ```text
//! Camera → OCR provider → raw text
//!                            │
//!                    Line Normalizer
//!                     │            │
//!          Dosage Extractor    Candidate Extractor
//!                     │            │
//!                     └─────┬──────┘
//!                   Tiered Candidate Matcher
//!                           │
//!                  { medications, fullText }
//!                           │
//!                  Enrichment client (pillpal-client)
//! ```
//!
//! # Core Principle
//!
//! **Parsing never fails.** Empty, absent or garbled text yields an empty or
//! partial medication list, never an error.
//!
//! # Modules
//!
//! - [`models`]: Domain types (DosageToken, DrugCandidate, MedicationEntity, ScanResult)
//! - [`parser`]: Line normalization, extraction rules and tiered matching
//! - [`vocabulary`]: Configurable drug-suffix and excluded-word tables

pub mod models;
pub mod parser;
pub mod vocabulary;

// Re-export commonly used types
pub use models::{
    CandidateId, Confidence, DosageId, DosageToken, DrugCandidate, MedicationEntity,
    PatternSource, ScanResult,
};
pub use parser::{parse_medication_text, LabelParser};
pub use vocabulary::{ConfigError, ReferenceTables};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PillPalError {
    #[error("Invalid reference tables: {0}")]
    InvalidTables(String),
}

impl From<ConfigError> for PillPalError {
    fn from(e: ConfigError) -> Self {
        PillPalError::InvalidTables(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Parse recognized label text with the built-in reference tables.
#[uniffi::export]
pub fn parse_label_text(text: Option<String>) -> FfiScanResult {
    LabelParser::new().parse(text.as_deref()).into()
}

/// Create a parser, optionally with reference tables given as JSON.
#[uniffi::export]
pub fn open_parser(tables_json: Option<String>) -> Result<Arc<PillPalParser>, PillPalError> {
    let tables = match tables_json {
        Some(json) => ReferenceTables::from_json(&json)?,
        None => ReferenceTables::new(),
    };
    Ok(Arc::new(PillPalParser {
        parser: LabelParser::with_tables(tables),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Shareable parser handle for FFI.
#[derive(uniffi::Object)]
pub struct PillPalParser {
    parser: LabelParser,
}

#[uniffi::export]
impl PillPalParser {
    /// Parse recognized label text.
    pub fn parse(&self, text: Option<String>) -> FfiScanResult {
        self.parser.parse(text.as_deref()).into()
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe confidence grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiConfidence {
    High,
    Medium,
}

impl From<Confidence> for FfiConfidence {
    fn from(confidence: Confidence) -> Self {
        match confidence {
            Confidence::High => FfiConfidence::High,
            Confidence::Medium => FfiConfidence::Medium,
        }
    }
}

/// FFI-safe dosage.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDosage {
    pub amount: f64,
    pub unit: String,
    pub formatted: String,
}

impl From<DosageToken> for FfiDosage {
    fn from(token: DosageToken) -> Self {
        Self {
            amount: token.amount,
            unit: token.unit,
            formatted: token.formatted,
        }
    }
}

/// FFI-safe medication.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub name: String,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub dosage: Option<FfiDosage>,
    pub confidence: FfiConfidence,
}

impl From<MedicationEntity> for FfiMedication {
    fn from(med: MedicationEntity) -> Self {
        Self {
            name: med.name,
            brand_name: med.brand_name,
            generic_name: med.generic_name,
            dosage: med.dosage.map(|d| d.into()),
            confidence: med.confidence.into(),
        }
    }
}

/// FFI-safe scan result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScanResult {
    pub medications: Vec<FfiMedication>,
    pub full_text: String,
}

impl From<ScanResult> for FfiScanResult {
    fn from(result: ScanResult) -> Self {
        Self {
            medications: result.medications.into_iter().map(|m| m.into()).collect(),
            full_text: result.full_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_text_absent() {
        let result = parse_label_text(None);
        assert!(result.medications.is_empty());
        assert_eq!(result.full_text, "");
    }

    #[test]
    fn test_parse_label_text_converts() {
        let result = parse_label_text(Some("AMOXICILLIN 500mg".into()));

        assert_eq!(result.medications.len(), 1);
        let med = &result.medications[0];
        assert_eq!(med.confidence, FfiConfidence::High);
        let dosage = med.dosage.as_ref().unwrap();
        assert_eq!(dosage.amount, 500.0);
        assert_eq!(dosage.unit, "mg");
        assert_eq!(dosage.formatted, "500mg");
    }

    #[test]
    fn test_open_parser_with_tables() {
        let parser = open_parser(Some(r#"{"excluded_words": ["amoxicillin"]}"#.into())).unwrap();
        assert!(parser.parse(Some("AMOXICILLIN 500mg".into())).medications.is_empty());

        let default_parser = open_parser(None).unwrap();
        assert_eq!(default_parser.parse(Some("AMOXICILLIN 500mg".into())).medications.len(), 1);
    }

    #[test]
    fn test_open_parser_rejects_bad_json() {
        let result = open_parser(Some("{".into()));
        assert!(matches!(result, Err(PillPalError::InvalidTables(_))));
    }
}
