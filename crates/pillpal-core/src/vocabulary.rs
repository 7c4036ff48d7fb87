//! Reference tables that drive candidate classification.
//!
//! - Drug suffixes (e.g., -cillin, -statin, -pril) mark a word as a likely drug name
//! - Excluded words (tablet, directions, ...) are label vocabulary, never drug names

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Reference table loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read reference tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid reference table JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

const DEFAULT_DRUG_SUFFIXES: &[&str] = &[
    "cillin", "mycin", "cycline", "floxacin", "azole", "pine", "pril", "sartan", "statin", "olol",
    "dipine", "zepam", "pam", "done", "sone", "prazole", "tidine", "oxin", "afil", "mab", "tinib",
    "lukast", "gliptin", "relin", "sertib",
];

const DEFAULT_EXCLUDED_WORDS: &[&str] = &[
    // Product forms
    "supplement", "vitamin", "pharmacy", "prescription", "medication", "medicine", "drug",
    "tablet", "capsule", "liquid", "syrup", "cream", "ointment", "gel", "solution", "suspension",
    "injection", "inhaler", "patch", "powder",
    // Label headers and instructions
    "take", "doctor", "patient", "refill", "quantity", "expires", "directions", "warning",
    "caution", "keep", "store", "avoid", "consult", "contains",
    // Schedule
    "daily", "twice", "times", "morning", "evening", "night", "food", "water",
    // Supplement facts panel
    "each", "serving", "size", "amount", "value", "facts", "label",
];

/// On-disk form. Missing keys fall back to the built-in lists.
#[derive(Debug, Deserialize)]
struct TablesFile {
    drug_suffixes: Option<Vec<String>>,
    excluded_words: Option<Vec<String>>,
}

/// Suffix and excluded-word lists used by the candidate extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    drug_suffixes: Vec<String>,
    excluded_words: Vec<String>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceTables {
    /// Create tables with the built-in lists.
    pub fn new() -> Self {
        Self {
            drug_suffixes: clean(DEFAULT_DRUG_SUFFIXES.iter().copied()),
            excluded_words: clean(DEFAULT_EXCLUDED_WORDS.iter().copied()),
        }
    }

    /// Load tables from a JSON document.
    ///
    /// ```json
    /// {"drug_suffixes": ["cillin", "pril"], "excluded_words": ["tablet"]}
    /// ```
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let file: TablesFile = serde_json::from_str(json)?;
        let defaults = Self::new();

        Ok(Self {
            drug_suffixes: file
                .drug_suffixes
                .map(|s| clean(s.iter().map(String::as_str)))
                .unwrap_or(defaults.drug_suffixes),
            excluded_words: file
                .excluded_words
                .map(|w| clean(w.iter().map(String::as_str)))
                .unwrap_or(defaults.excluded_words),
        })
    }

    /// Load tables from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add a custom drug suffix.
    pub fn add_suffix(&mut self, suffix: &str) {
        let suffix = suffix.trim().to_lowercase();
        if !suffix.is_empty() && !self.drug_suffixes.contains(&suffix) {
            self.drug_suffixes.push(suffix);
        }
    }

    /// Add a custom excluded word.
    pub fn add_excluded_word(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !self.excluded_words.contains(&word) {
            self.excluded_words.push(word);
        }
    }

    /// Check whether a word ends with a known drug suffix (case-insensitive).
    pub fn has_drug_suffix(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.drug_suffixes.iter().any(|s| lower.ends_with(s.as_str()))
    }

    /// Check whether a word is generic label vocabulary (case-insensitive).
    pub fn is_excluded(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.excluded_words.iter().any(|w| *w == lower)
    }

    pub fn drug_suffixes(&self) -> &[String] {
        &self.drug_suffixes
    }

    pub fn excluded_words(&self) -> &[String] {
        &self.excluded_words
    }
}

fn clean<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.trim().to_lowercase();
        if !entry.is_empty() && !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_suffixes() {
        let tables = ReferenceTables::new();

        assert!(tables.has_drug_suffix("amoxicillin"));
        assert!(tables.has_drug_suffix("AMOXICILLIN"));
        assert!(tables.has_drug_suffix("Atorvastatin"));
        assert!(tables.has_drug_suffix("Lisinopril"));
        assert!(!tables.has_drug_suffix("Ibuprofen"));
    }

    #[test]
    fn test_default_excluded() {
        let tables = ReferenceTables::new();

        assert!(tables.is_excluded("Tablet"));
        assert!(tables.is_excluded("DIRECTIONS"));
        assert!(!tables.is_excluded("tablets"));
        assert!(!tables.is_excluded("Advil"));
    }

    #[test]
    fn test_from_json_partial_falls_back() {
        let tables = ReferenceTables::from_json(r#"{"drug_suffixes": [" Profen ", ""]}"#).unwrap();

        assert_eq!(tables.drug_suffixes(), &["profen".to_string()]);
        assert!(tables.has_drug_suffix("Ibuprofen"));
        assert!(!tables.has_drug_suffix("Amoxicillin"));
        // Excluded words untouched
        assert!(tables.is_excluded("tablet"));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = ReferenceTables::from_json("not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"excluded_words": ["Generic"]}}"#).unwrap();

        let tables = ReferenceTables::from_path(file.path()).unwrap();
        assert!(tables.is_excluded("generic"));
        assert!(!tables.is_excluded("tablet"));
        assert!(tables.has_drug_suffix("amoxicillin"));
    }

    #[test]
    fn test_from_missing_path() {
        let result = ReferenceTables::from_path("/nonexistent/pillpal/tables.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_custom_entries() {
        let mut tables = ReferenceTables::new();
        tables.add_suffix("PROFEN");
        tables.add_excluded_word("Generic");

        assert!(tables.has_drug_suffix("ibuprofen"));
        assert!(tables.is_excluded("GENERIC"));

        // Re-adding an existing entry is a no-op
        let before = tables.excluded_words().len();
        tables.add_excluded_word(" generic ");
        assert_eq!(tables.excluded_words().len(), before);
        assert_eq!(tables.excluded_words().last().map(String::as_str), Some("generic"));
    }
}
