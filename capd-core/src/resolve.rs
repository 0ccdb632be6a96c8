//! Common-transformation resolver
//!
//! **[CAP-RES-010]** Intersects the candidate-label sets of every beat pair;
//! a non-empty intersection is the fully-consistent case and is returned
//! sorted by priority.
//!
//! **[CAP-RES-020]** On an empty intersection, attempts a family match: a
//! family is a {plain, inverted} label pair. If every pair is compatible with
//! the family, genuine all-around ambiguity collapses to the family's base
//! label, while definitive pairs are authoritative when they agree — a single
//! definitive pair among ambiguous ones decides the member. Definitive pairs
//! that disagree signal that the sequence does not have one consistent CAP
//! type across all pairs; the resolver returns empty and the caller falls
//! through to modular/freeform classification.

use crate::compare::PairComparison;
use crate::labels::{self, Label};
use std::collections::BTreeSet;
use tracing::debug;

/// A pair's stance toward a transformation family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyStance {
    /// Exactly one family member present: the data decides
    Definitive(Label),
    /// Both members present: rotation-direction data was uninformative
    Ambiguous,
    /// No family member present
    Absent,
}

/// Stance of a candidate-label set toward the family identified by `base`
pub fn family_stance(candidates: &BTreeSet<Label>, base: Label) -> FamilyStance {
    let base = base.base();
    let inverted = base.with_inversion();
    match (candidates.contains(&base), candidates.contains(&inverted)) {
        (true, true) => FamilyStance::Ambiguous,
        (true, false) => FamilyStance::Definitive(base),
        (false, true) => FamilyStance::Definitive(inverted),
        (false, false) => FamilyStance::Absent,
    }
}

/// Find the transformation labels common to every pair
///
/// Returns labels best-first in priority order; empty means no single
/// consistent transformation explains all pairs.
pub fn find_common_transformations(pairs: &[PairComparison]) -> Vec<Label> {
    if pairs.is_empty() {
        return Vec::new();
    }

    let label_sets: Vec<BTreeSet<Label>> = pairs.iter().map(PairComparison::labels).collect();

    // Simple case: a label present in every pair
    let mut common: Vec<Label> = label_sets[0]
        .iter()
        .filter(|label| label_sets[1..].iter().all(|set| set.contains(label)))
        .copied()
        .collect();
    if !common.is_empty() {
        labels::sort_by_priority(&mut common);
        debug!(count = common.len(), best = %common[0], "common labels via intersection");
        return common;
    }

    // Family matching: candidate families are the bases of every observed label
    let mut bases: Vec<Label> = label_sets
        .iter()
        .flatten()
        .map(|label| label.base())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    labels::sort_by_priority(&mut bases);

    for base in bases {
        let stances: Vec<FamilyStance> = label_sets
            .iter()
            .map(|set| family_stance(set, base))
            .collect();
        if stances.iter().any(|s| *s == FamilyStance::Absent) {
            continue;
        }

        let definitive: BTreeSet<Label> = stances
            .iter()
            .filter_map(|s| match s {
                FamilyStance::Definitive(label) => Some(*label),
                _ => None,
            })
            .collect();

        return match definitive.len() {
            // Ambiguity is irreducible from the data: report the generic form
            0 => {
                debug!(family = %base, "all pairs ambiguous; reporting family base");
                vec![base]
            }
            // Definitive pairs agree; ambiguous pairs are compatible
            1 => {
                let member = *definitive.iter().next().unwrap_or(&base);
                debug!(family = %base, member = %member, "family resolved by definitive pairs");
                vec![member]
            }
            // Definitive pairs disagree: not a single consistent CAP
            _ => {
                debug!(family = %base, "definitive pairs split; no single CAP type");
                Vec::new()
            }
        };
    }

    Vec::new()
}
