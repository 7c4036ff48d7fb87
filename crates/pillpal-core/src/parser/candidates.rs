//! Drug name candidate extraction.
//!
//! Five independent rules run over every line that is not a label header:
//!
//! | Rule            | Example                          | Confidence              |
//! |-----------------|----------------------------------|-------------------------|
//! | `as_pattern`    | `Vitamin C (as Ascorbic Acid)`   | high                    |
//! | `generic_for`   | `Lisinopril (Generic for Zestril)` | high                  |
//! | `brand_generic` | `Advil (Ibuprofen)`, `ADVIL (IBUPROFEN)` | high            |
//! | `capitalized`   | `Metformin`                      | high by suffix, else medium |
//! | `all_caps`      | `AMOXICILLIN`                    | high by suffix, else medium |
//!
//! After the rules run, word-shape detections that repeat a name already
//! captured by a structured rule on the same line are dropped.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{CandidateId, Confidence, DrugCandidate, PatternSource};
use crate::vocabulary::ReferenceTables;

use super::lines::Line;

/// Plausible length of a drug name, in characters.
const NAME_LENGTH: RangeInclusive<usize> = 4..=25;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:pharmacy|rx|prescription|take|doctor|dr\.|patient|refill|quantity|expires?|directions?|warning|caution)",
    )
    .unwrap()
});

static AS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][A-Za-z\s]+\((?i:as)\s+[A-Z][A-Za-z\s]+\)").unwrap()
});

// Linked rules accept any letter case; OCR often returns labels in all caps.
static GENERIC_FOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z]{2,})\s*\(generic\s+for\s+([a-z]{2,})\)").unwrap()
});

static BRAND_GENERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z]{2,})\s*\(([a-z]{2,})\)").unwrap());

static FOLLOWED_BY_AS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*as").unwrap());

// ASCII word boundaries: an accented letter ends a word.
static CAPITALIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[A-Z][a-z]+(?:[A-Z][a-z]+)*(?-u:\b)").unwrap()
});

static ALL_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)[A-Z]{4,}(?-u:\b)").unwrap());

/// A rule hit before identifiers and line metadata are attached.
#[derive(Debug, Clone, PartialEq)]
struct Detection {
    name: String,
    brand_name: Option<String>,
    generic_name: Option<String>,
    confidence: Confidence,
    source: PatternSource,
}

impl Detection {
    fn plain(name: &str, confidence: Confidence, source: PatternSource) -> Self {
        Self {
            name: name.to_string(),
            brand_name: None,
            generic_name: None,
            confidence,
            source,
        }
    }

    fn linked(generic: &str, brand: &str, source: PatternSource) -> Self {
        Self {
            name: generic.to_string(),
            brand_name: Some(brand.to_string()),
            generic_name: Some(generic.to_string()),
            confidence: Confidence::High,
            source,
        }
    }

    /// Whether `word` (case-insensitive) is this detection's name, brand or generic.
    fn names(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        std::iter::once(&self.name)
            .chain(self.brand_name.iter())
            .chain(self.generic_name.iter())
            .any(|n| n.to_lowercase() == word)
    }
}

/// Check if a line starts with a known label header (pharmacy, Rx, directions, ...).
pub fn is_header_line(text: &str) -> bool {
    HEADER.is_match(text)
}

/// Extract graded drug name candidates from every line.
///
/// Per line, candidates follow rule order; across lines, line order.
/// Identifiers are assigned sequentially from zero.
pub fn extract_candidates(lines: &[Line], tables: &ReferenceTables) -> Vec<DrugCandidate> {
    let mut candidates = Vec::new();

    for line in lines {
        if is_header_line(&line.text) {
            continue;
        }

        for detection in detect_line(&line.text, tables) {
            candidates.push(DrugCandidate {
                id: CandidateId(candidates.len() as u32),
                name: detection.name,
                brand_name: detection.brand_name,
                generic_name: detection.generic_name,
                confidence: detection.confidence,
                line_index: line.index,
                source_line: line.text.clone(),
                pattern_source: detection.source,
            });
        }
    }

    candidates
}

/// Run all five rules over one line and drop shadowed word-shape hits.
fn detect_line(text: &str, tables: &ReferenceTables) -> Vec<Detection> {
    let mut detections = as_pattern(text);
    detections.extend(generic_for(text));
    detections.extend(brand_generic(text, tables));

    let structured = detections.clone();
    let shadowed = |word: &str| structured.iter().any(|d| d.names(word));

    detections.extend(capitalized(text, tables).into_iter().filter(|d| !shadowed(&d.name)));
    detections.extend(all_caps(text, tables).into_iter().filter(|d| !shadowed(&d.name)));
    detections
}

fn as_pattern(text: &str) -> Vec<Detection> {
    AS_PATTERN
        .find_iter(text)
        .map(|m| Detection::plain(m.as_str().trim(), Confidence::High, PatternSource::AsPattern))
        .collect()
}

fn generic_for(text: &str) -> Vec<Detection> {
    GENERIC_FOR
        .captures_iter(text)
        .map(|caps| Detection::linked(&caps[1], &caps[2], PatternSource::GenericFor))
        .collect()
}

fn brand_generic(text: &str, tables: &ReferenceTables) -> Vec<Detection> {
    BRAND_GENERIC
        .captures_iter(text)
        .filter(|caps| {
            let end = caps.get(0).map_or(text.len(), |m| m.end());
            !FOLLOWED_BY_AS.is_match(&text[end..])
        })
        .filter(|caps| {
            let generic = &caps[2];
            tables.has_drug_suffix(generic) || NAME_LENGTH.contains(&generic.chars().count())
        })
        .map(|caps| Detection::linked(&caps[2], &caps[1], PatternSource::BrandGeneric))
        .collect()
}

fn capitalized(text: &str, tables: &ReferenceTables) -> Vec<Detection> {
    CAPITALIZED
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| !tables.is_excluded(word))
        .filter_map(|word| {
            let confidence = if tables.has_drug_suffix(word) {
                Confidence::High
            } else if NAME_LENGTH.contains(&word.chars().count()) {
                Confidence::Medium
            } else {
                return None;
            };
            Some(Detection::plain(word, confidence, PatternSource::Capitalized))
        })
        .collect()
}

fn all_caps(text: &str, tables: &ReferenceTables) -> Vec<Detection> {
    ALL_CAPS
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| !tables.is_excluded(word))
        .map(|word| {
            let confidence = if tables.has_drug_suffix(word) {
                Confidence::High
            } else {
                Confidence::Medium
            };
            Detection::plain(word, confidence, PatternSource::AllCaps)
        })
        .collect()
}
