//! Enrichment request and response types.

use pillpal_core::{MedicationEntity, ScanResult};
use serde::{Deserialize, Serialize};

/// A name/dosage pair submitted for enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentItem {
    pub name: String,
    pub dosage: String,
}

impl EnrichmentItem {
    /// Build an item from a medication, or `None` if it lacks a usable
    /// name or dosage. The generic name is preferred when present.
    pub fn from_medication(med: &MedicationEntity) -> Option<Self> {
        let name = med
            .generic_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| med.name.trim());
        let dosage = med.dosage_formatted().map(str::trim).unwrap_or_default();

        if name.is_empty() || dosage.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            dosage: dosage.to_string(),
        })
    }
}

/// Body of `POST /medications/scan`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRequest {
    pub medications: Vec<EnrichmentItem>,
    pub full_text: String,
}

impl EnrichmentRequest {
    /// Keep only medications with both a name and a dosage, in order.
    pub fn from_scan(scan: &ScanResult) -> Self {
        Self {
            medications: scan
                .medications
                .iter()
                .filter_map(EnrichmentItem::from_medication)
                .collect(),
            full_text: scan.full_text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
    }
}

/// Response of `GET /drug_info`.
///
/// Lookup misses come back with status 200 and only `error` set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DrugInfo {
    pub drug_name: Option<String>,
    pub brand_name: Option<String>,
    pub dosage: Option<String>,
    #[serde(default)]
    pub do_not_take_if_raw: Vec<String>,
    #[serde(default)]
    pub do_not_take_with_raw: Vec<String>,
    pub summary: Option<String>,
    pub error: Option<String>,
}

impl DrugInfo {
    pub fn is_found(&self) -> bool {
        self.error.is_none()
    }
}
