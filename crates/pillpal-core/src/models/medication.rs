//! Matched medication models.

use serde::{Deserialize, Serialize};

use super::{Confidence, DosageToken, DrugCandidate};

/// A drug name reconciled with (at most) one dosage token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicationEntity {
    pub name: String,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub dosage: Option<DosageToken>,
    /// Always `Medium` when `dosage` is `None`
    pub confidence: Confidence,
}

impl MedicationEntity {
    /// Pair a candidate with a dosage token.
    pub fn with_dosage(candidate: &DrugCandidate, dosage: DosageToken, confidence: Confidence) -> Self {
        Self {
            name: candidate.name.clone(),
            brand_name: candidate.brand_name.clone(),
            generic_name: candidate.generic_name.clone(),
            dosage: Some(dosage),
            confidence,
        }
    }

    /// Emit a candidate that found no dosage. Confidence drops to medium.
    pub fn without_dosage(candidate: &DrugCandidate) -> Self {
        Self {
            name: candidate.name.clone(),
            brand_name: candidate.brand_name.clone(),
            generic_name: candidate.generic_name.clone(),
            dosage: None,
            confidence: Confidence::Medium,
        }
    }

    /// Formatted dosage string, if any.
    pub fn dosage_formatted(&self) -> Option<&str> {
        self.dosage.as_ref().map(|d| d.formatted.as_str())
    }
}

/// Output of one parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Medications in tier emission order
    pub medications: Vec<MedicationEntity>,
    /// Normalized text (retained lines joined by newlines)
    pub full_text: String,
}

impl ScanResult {
    /// Result for empty or absent input.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateId, DosageId, PatternSource};

    fn candidate() -> DrugCandidate {
        DrugCandidate {
            id: CandidateId(4),
            name: "Lisinopril".into(),
            brand_name: Some("Zestril".into()),
            generic_name: Some("Lisinopril".into()),
            confidence: Confidence::High,
            line_index: 0,
            source_line: "Lisinopril (Generic for Zestril)".into(),
            pattern_source: PatternSource::GenericFor,
        }
    }

    #[test]
    fn test_without_dosage_downgrades() {
        let entity = MedicationEntity::without_dosage(&candidate());
        assert_eq!(entity.confidence, Confidence::Medium);
        assert!(entity.dosage_formatted().is_none());
        assert_eq!(entity.brand_name.as_deref(), Some("Zestril"));
    }

    #[test]
    fn test_json_shape() {
        let dosage = DosageToken::new(DosageId(0), 10.0, "mg", 1);
        let result = ScanResult {
            medications: vec![MedicationEntity::with_dosage(&candidate(), dosage, Confidence::High)],
            full_text: "Lisinopril (Generic for Zestril)\n10 mg".into(),
        };

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["fullText"], "Lisinopril (Generic for Zestril)\n10 mg");
        assert_eq!(json["medications"][0]["genericName"], "Lisinopril");
        assert_eq!(json["medications"][0]["brandName"], "Zestril");
        assert_eq!(json["medications"][0]["dosage"]["formatted"], "10mg");
        assert_eq!(json["medications"][0]["confidence"], "high");
    }
}
