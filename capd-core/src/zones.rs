//! Zone-coverage analysis over sequence end positions
//!
//! **[CAP-ZONE-010]** Classifies each beat's sequence-level end position into
//! one of 4 buckets (alpha, beta, gamma-low, gamma-high), splits the sequence
//! into halves by index, and reports whether each half touches all 4 buckets
//! ("complete coverage") and whether each half contains exactly one of each
//! bucket ("Latin square", the strongest signal).

use crate::types::Beat;
use serde::{Deserialize, Serialize};

/// End-position zone bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    Alpha,
    Beta,
    /// Gamma with numeric suffix ≤8
    GammaLow,
    /// Gamma with numeric suffix >8
    GammaHigh,
}

impl Zone {
    /// Classify an end-position code into its zone bucket
    ///
    /// Returns `None` for codes outside the alpha/beta/gamma families.
    pub fn classify(end_pos: &str) -> Option<Zone> {
        if end_pos.starts_with("alpha") {
            Some(Zone::Alpha)
        } else if end_pos.starts_with("beta") {
            Some(Zone::Beta)
        } else if let Some(rest) = end_pos.strip_prefix("gamma") {
            let suffix: u32 = rest.parse().unwrap_or(0);
            if suffix <= 8 {
                Some(Zone::GammaLow)
            } else {
                Some(Zone::GammaHigh)
            }
        } else {
            None
        }
    }

    fn index(&self) -> usize {
        match self {
            Zone::Alpha => 0,
            Zone::Beta => 1,
            Zone::GammaLow => 2,
            Zone::GammaHigh => 3,
        }
    }
}

/// Bucket coverage of one half of the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfCoverage {
    /// Occurrences per bucket: alpha, beta, gamma-low, gamma-high
    pub counts: [usize; 4],
    /// Every bucket touched at least once
    pub complete: bool,
    /// Exactly one occurrence of each bucket
    pub latin: bool,
}

fn half_coverage(beats: &[Beat]) -> HalfCoverage {
    let mut counts = [0usize; 4];
    for beat in beats {
        if let Some(zone) = Zone::classify(&beat.end_pos) {
            counts[zone.index()] += 1;
        }
    }
    HalfCoverage {
        counts,
        complete: counts.iter().all(|c| *c >= 1),
        latin: counts.iter().all(|c| *c == 1),
    }
}

/// Zone-coverage report over both halves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCoverageReport {
    /// Coverage of the first half
    pub first_half: HalfCoverage,
    /// Coverage of the second half
    pub second_half: HalfCoverage,
    /// Both halves touch all 4 buckets
    pub complete_coverage: bool,
    /// Both halves contain exactly one of each bucket
    pub latin_square: bool,
}

/// Analyze zone coverage of an even-length sequence
///
/// Returns `None` for empty or odd-length sequences, which cannot be split
/// into equal halves.
pub fn analyze_zone_coverage(beats: &[Beat]) -> Option<ZoneCoverageReport> {
    if beats.is_empty() || beats.len() % 2 != 0 {
        return None;
    }
    let half = beats.len() / 2;
    let first_half = half_coverage(&beats[..half]);
    let second_half = half_coverage(&beats[half..]);
    Some(ZoneCoverageReport {
        first_half,
        second_half,
        complete_coverage: first_half.complete && second_half.complete,
        latin_square: first_half.latin && second_half.latin,
    })
}
