//! Modular/column analysis of beat-pair labels
//!
//! **[CAP-MOD-010]** Groups beat-pair indices by position within a candidate
//! cycle and profiles each column: whether it is cleanly swapped (a resolved
//! label carrying the swap modifier without inversion) and its dominant base
//! transformation (most frequent label with the swap/invert modifiers
//! stripped).
//!
//! **[CAP-MOD-020]** With exactly 4 columns the swap pattern is matched
//! against 6 known alternation templates (e.g. "1-2-2-1"); otherwise a
//! uniform-swap check applies. A sequence is modular only if the swap rhythm
//! is non-uniform or the columns show genuinely varied base transformations.

use crate::labels::{self, Label};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Profile of one column (position within the cycle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column index within the cycle
    pub index: usize,
    /// Whether any pair in the column is swapped without inversion
    pub cleanly_swapped: bool,
    /// Most frequent base transformation (modifiers stripped), if any label
    /// was resolved in this column
    pub dominant_base: Option<String>,
}

/// The cycle's swap rhythm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapRhythm {
    /// One of the known 4-column alternation templates
    Template(String),
    /// Every column behaves the same
    Uniform,
    /// Non-uniform and not a known template
    Unknown,
}

/// Result of modular/column analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModularReport {
    /// Candidate cycle length (column count)
    pub cycle_len: usize,
    /// Whether the sequence qualifies as modular
    pub is_modular: bool,
    /// Detected swap rhythm
    pub rhythm: SwapRhythm,
    /// Per-column profiles
    pub columns: Vec<ColumnProfile>,
}

/// The 6 known 4-column swap-alternation templates
///
/// "1" marks an unswapped column, "2" a swapped one.
const TEMPLATES: &[(&str, [bool; 4])] = &[
    ("1-2-2-1", [false, true, true, false]),
    ("2-1-1-2", [true, false, false, true]),
    ("1-1-2-2", [false, false, true, true]),
    ("2-2-1-1", [true, true, false, false]),
    ("1-2-1-2", [false, true, false, true]),
    ("2-1-2-1", [true, false, true, false]),
];

fn is_cleanly_swapped(label: &Label) -> bool {
    label.swapped && !label.inverted
}

/// Most frequent base transformation in a column; priority breaks ties
fn dominant_base(column_labels: &[Label]) -> Option<Label> {
    let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
    for label in column_labels {
        let base = Label {
            geometric: label.geometric,
            swapped: false,
            inverted: false,
        };
        *counts.entry(base).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(a_label, a_count), (b_label, b_count)| {
            a_count
                .cmp(b_count)
                // Lower rank = higher priority; reversed so max picks it
                .then(labels::rank(b_label).cmp(&labels::rank(a_label)))
        })
        .map(|(label, _)| label)
}

/// Analyze one candidate cycle length over per-pair resolved labels
///
/// `resolved` holds each pair's single resolved label (or `None` when the
/// pair produced no label). Returns `None` unless the pair count is a
/// positive multiple of the cycle length covering at least two full cycles.
pub fn analyze_columns(resolved: &[Option<Label>], cycle_len: usize) -> Option<ModularReport> {
    if cycle_len == 0 || resolved.len() % cycle_len != 0 || resolved.len() / cycle_len < 2 {
        return None;
    }

    let mut columns = Vec::with_capacity(cycle_len);
    for index in 0..cycle_len {
        let column_labels: Vec<Label> = resolved
            .iter()
            .enumerate()
            .filter(|(i, _)| i % cycle_len == index)
            .filter_map(|(_, label)| *label)
            .collect();
        columns.push(ColumnProfile {
            index,
            cleanly_swapped: column_labels.iter().any(is_cleanly_swapped),
            dominant_base: dominant_base(&column_labels).map(|l| l.canonical()),
        });
    }

    let swap_flags: Vec<bool> = columns.iter().map(|c| c.cleanly_swapped).collect();
    let rhythm = if swap_flags.len() == 4 {
        let flags = [swap_flags[0], swap_flags[1], swap_flags[2], swap_flags[3]];
        match TEMPLATES.iter().find(|(_, template)| *template == flags) {
            Some((name, _)) => SwapRhythm::Template(name.to_string()),
            None if swap_flags.iter().all(|f| *f == swap_flags[0]) => SwapRhythm::Uniform,
            None => SwapRhythm::Unknown,
        }
    } else if swap_flags.iter().all(|f| *f == swap_flags[0]) {
        SwapRhythm::Uniform
    } else {
        SwapRhythm::Unknown
    };

    let distinct_bases = columns
        .iter()
        .filter_map(|c| c.dominant_base.as_ref())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    // A uniform, single-base pattern is not modular
    let is_modular = rhythm != SwapRhythm::Uniform || distinct_bases > 1;
    debug!(cycle_len, ?rhythm, distinct_bases, is_modular, "column analysis");

    Some(ModularReport {
        cycle_len,
        is_modular,
        rhythm,
        columns,
    })
}

/// Try candidate cycle lengths (ascending proper factors of the pair count)
/// and return the first modular report
pub fn detect_modular(resolved: &[Option<Label>]) -> Option<ModularReport> {
    for cycle_len in crate::polyrhythm::proper_factors(resolved.len()) {
        if let Some(report) = analyze_columns(resolved, cycle_len) {
            if report.is_modular {
                return Some(report);
            }
        }
    }
    None
}
