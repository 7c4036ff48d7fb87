//! Drug name candidate models.

use serde::{Deserialize, Serialize};

/// Stable identifier for a drug candidate within a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u32);

/// Confidence grade for a candidate or a matched medication.
///
/// Low-confidence detections are discarded during extraction, so only the
/// two surviving grades are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Medium,
    High,
}

/// Which extraction rule produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSource {
    /// `Vitamin C (as Ascorbic Acid)`
    AsPattern,
    /// `Lisinopril (Generic for Zestril)`
    GenericFor,
    /// `Advil (Ibuprofen)`
    BrandGeneric,
    /// A standalone capitalized word
    Capitalized,
    /// A standalone run of four or more uppercase letters
    AllCaps,
}

impl PatternSource {
    /// Rules that carry an explicit brand/generic linkage.
    pub fn is_linked(self) -> bool {
        matches!(self, PatternSource::GenericFor | PatternSource::BrandGeneric)
    }
}

/// A provisionally detected drug name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrugCandidate {
    /// Assigned in extraction order
    pub id: CandidateId,
    /// Name reported downstream
    pub name: String,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub confidence: Confidence,
    /// Index of the line the candidate was found on
    pub line_index: usize,
    /// Raw text of that line
    pub source_line: String,
    pub pattern_source: PatternSource,
}
