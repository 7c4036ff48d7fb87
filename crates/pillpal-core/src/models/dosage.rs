//! Dosage token models.

use serde::{Deserialize, Serialize};

/// Stable identifier for a dosage token within a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DosageId(pub u32);

/// A normalized amount+unit pair found on one line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DosageToken {
    /// Assigned in extraction order
    pub id: DosageId,
    /// Parsed numeric amount
    pub amount: f64,
    /// Lower-cased unit with a trailing plural "s" removed (e.g., "mg", "unit")
    pub unit: String,
    /// Canonical `{amount}{unit}` form (e.g., "500mg", "2.5ml")
    pub formatted: String,
    /// Index of the line the token was found on
    pub line_index: usize,
}

impl DosageToken {
    /// Build a token from a raw amount and unit, normalizing the unit.
    pub fn new(id: DosageId, amount: f64, raw_unit: &str, line_index: usize) -> Self {
        let unit = normalize_unit(raw_unit);
        Self {
            id,
            amount,
            formatted: format!("{}{}", amount, unit),
            unit,
            line_index,
        }
    }
}

/// Lower-case a unit and strip one trailing plural "s".
pub fn normalize_unit(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    match lower.strip_suffix('s') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => lower,
    }
}
