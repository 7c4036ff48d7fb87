//! Candidate/dosage reconciliation.
//!
//! Candidates claim dosage tokens in strictly ordered tiers so that names
//! found through explicit label syntax claim a dosage before names found by
//! word shape alone. Within a tier, candidates are visited in extraction
//! order and each takes the first unclaimed token on its target line.
//!
//! | Tier               | Eligible candidates              | Dosage line      | Emitted as |
//! |--------------------|----------------------------------|------------------|------------|
//! | `Linked`           | generic_for, brand_generic       | same             | high       |
//! | `AsClause`         | as_pattern                       | same             | high       |
//! | `HighConfidence`   | high                             | same             | high       |
//! | `MediumConfidence` | medium                           | same             | medium     |
//! | `FollowingLine`    | high                             | next, if bare    | high       |
//! | `Undosed`          | high                             | none             | medium     |
//!
//! A "bare" line is one that produced no candidates of its own, e.g. a
//! strength printed under the drug name. Medium candidates left over after
//! `MediumConfidence` are dropped.

use std::collections::HashSet;

use crate::models::{
    CandidateId, Confidence, DosageId, DosageToken, DrugCandidate, MedicationEntity, PatternSource,
};

/// One priority level of the matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Linked,
    AsClause,
    HighConfidence,
    MediumConfidence,
    FollowingLine,
    Undosed,
}

impl Tier {
    /// All tiers in processing order.
    pub const ALL: [Tier; 6] = [
        Tier::Linked,
        Tier::AsClause,
        Tier::HighConfidence,
        Tier::MediumConfidence,
        Tier::FollowingLine,
        Tier::Undosed,
    ];

    fn admits(self, candidate: &DrugCandidate) -> bool {
        match self {
            Tier::Linked => candidate.pattern_source.is_linked(),
            Tier::AsClause => candidate.pattern_source == PatternSource::AsPattern,
            Tier::MediumConfidence => candidate.confidence == Confidence::Medium,
            Tier::HighConfidence | Tier::FollowingLine | Tier::Undosed => {
                candidate.confidence == Confidence::High
            }
        }
    }

    fn emitted_confidence(self) -> Confidence {
        match self {
            Tier::MediumConfidence | Tier::Undosed => Confidence::Medium,
            _ => Confidence::High,
        }
    }
}

/// Greedy matcher holding the consumption state for one parse.
pub struct CandidateMatcher<'a> {
    candidates: &'a [DrugCandidate],
    dosages: &'a [DosageToken],
    used_candidates: HashSet<CandidateId>,
    used_dosages: HashSet<DosageId>,
    /// Lines that produced at least one candidate
    named_lines: HashSet<usize>,
    medications: Vec<MedicationEntity>,
}

impl<'a> CandidateMatcher<'a> {
    /// Create a matcher with nothing consumed.
    pub fn new(candidates: &'a [DrugCandidate], dosages: &'a [DosageToken]) -> Self {
        Self {
            candidates,
            dosages,
            used_candidates: HashSet::new(),
            used_dosages: HashSet::new(),
            named_lines: candidates.iter().map(|c| c.line_index).collect(),
            medications: Vec::new(),
        }
    }

    /// Run every tier in order and return the emitted medications.
    pub fn run(mut self) -> Vec<MedicationEntity> {
        for tier in Tier::ALL {
            self.run_tier(tier);
        }
        self.medications
    }

    /// Run a single tier over the unconsumed candidates.
    pub fn run_tier(&mut self, tier: Tier) {
        for candidate in self.candidates {
            if self.used_candidates.contains(&candidate.id) || !tier.admits(candidate) {
                continue;
            }

            if tier == Tier::Undosed {
                tracing::trace!(name = %candidate.name, "emitting without dosage");
                self.medications.push(MedicationEntity::without_dosage(candidate));
                self.used_candidates.insert(candidate.id);
                continue;
            }

            let Some(dosage) = self.find_dosage(tier, candidate) else {
                continue;
            };

            tracing::trace!(
                name = %candidate.name,
                dosage = %dosage.formatted,
                ?tier,
                "matched candidate"
            );
            self.used_candidates.insert(candidate.id);
            self.used_dosages.insert(dosage.id);
            self.medications.push(MedicationEntity::with_dosage(
                candidate,
                dosage.clone(),
                tier.emitted_confidence(),
            ));
        }
    }

    /// First unconsumed dosage on the tier's target line for `candidate`.
    fn find_dosage(&self, tier: Tier, candidate: &DrugCandidate) -> Option<&'a DosageToken> {
        let line = match tier {
            Tier::FollowingLine => {
                let next = candidate.line_index + 1;
                if self.named_lines.contains(&next) {
                    return None;
                }
                next
            }
            _ => candidate.line_index,
        };

        self.dosages
            .iter()
            .find(|d| d.line_index == line && !self.used_dosages.contains(&d.id))
    }

    pub fn used_candidates(&self) -> &HashSet<CandidateId> {
        &self.used_candidates
    }

    pub fn used_dosages(&self) -> &HashSet<DosageId> {
        &self.used_dosages
    }

    pub fn medications(&self) -> &[MedicationEntity] {
        &self.medications
    }
}

/// Reconcile candidates with dosage tokens across all tiers.
pub fn match_candidates(
    candidates: &[DrugCandidate],
    dosages: &[DosageToken],
) -> Vec<MedicationEntity> {
    CandidateMatcher::new(candidates, dosages).run()
}
