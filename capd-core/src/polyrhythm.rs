//! Periodicity and polyrhythm analysis
//!
//! **[CAP-POLY-010]** For each proper factor of the sequence length, checks
//! whether ten per-beat properties are internally consistent within every
//! phase-position group, scores the period, and classifies its dominant type.
//!
//! **[CAP-POLY-020]** Searches all period pairs whose least common multiple
//! equals the sequence length for the best motion×spatial pairing. Pairs
//! involving the halved (N/2) CAP interval, and pairs of two quartered (N/4)
//! intervals, are excluded so ordinary CAPs are not misreported as
//! polyrhythmic.

use crate::params::DetectorParams;
use crate::types::{Actor, Beat, LetterType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One of the ten per-beat properties tracked for periodicity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackedProperty {
    BlueMotionType,
    BlueRotDir,
    BlueStartLoc,
    BlueEndLoc,
    RedMotionType,
    RedRotDir,
    RedStartLoc,
    RedEndLoc,
    Timing,
    LetterType,
}

/// Classification of a tracked property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Motion-type or rotation-direction property
    Motion,
    /// Location property
    Spatial,
    /// Timing/letter metadata; counts toward the score but not dominance
    Neutral,
}

impl TrackedProperty {
    /// All ten tracked properties
    pub fn all() -> &'static [TrackedProperty] {
        &[
            TrackedProperty::BlueMotionType,
            TrackedProperty::BlueRotDir,
            TrackedProperty::BlueStartLoc,
            TrackedProperty::BlueEndLoc,
            TrackedProperty::RedMotionType,
            TrackedProperty::RedRotDir,
            TrackedProperty::RedStartLoc,
            TrackedProperty::RedEndLoc,
            TrackedProperty::Timing,
            TrackedProperty::LetterType,
        ]
    }

    /// The property's kind for dominance classification
    pub fn kind(&self) -> PropertyKind {
        match self {
            TrackedProperty::BlueMotionType
            | TrackedProperty::BlueRotDir
            | TrackedProperty::RedMotionType
            | TrackedProperty::RedRotDir => PropertyKind::Motion,
            TrackedProperty::BlueStartLoc
            | TrackedProperty::BlueEndLoc
            | TrackedProperty::RedStartLoc
            | TrackedProperty::RedEndLoc => PropertyKind::Spatial,
            TrackedProperty::Timing | TrackedProperty::LetterType => PropertyKind::Neutral,
        }
    }

    /// The property's value on a beat, as a comparable string
    pub fn value(&self, beat: &Beat) -> String {
        match self {
            TrackedProperty::BlueMotionType => beat.attrs(Actor::Blue).motion_type.as_str().into(),
            TrackedProperty::BlueRotDir => beat.attrs(Actor::Blue).rot_dir.as_str().into(),
            TrackedProperty::BlueStartLoc => beat.attrs(Actor::Blue).start_loc.as_str().into(),
            TrackedProperty::BlueEndLoc => beat.attrs(Actor::Blue).end_loc.as_str().into(),
            TrackedProperty::RedMotionType => beat.attrs(Actor::Red).motion_type.as_str().into(),
            TrackedProperty::RedRotDir => beat.attrs(Actor::Red).rot_dir.as_str().into(),
            TrackedProperty::RedStartLoc => beat.attrs(Actor::Red).start_loc.as_str().into(),
            TrackedProperty::RedEndLoc => beat.attrs(Actor::Red).end_loc.as_str().into(),
            TrackedProperty::Timing => beat.timing.clone(),
            TrackedProperty::LetterType => LetterType::classify(&beat.letter).as_str().into(),
        }
    }
}

/// Dominant property type of a scored period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DominantType {
    Motion,
    Spatial,
    Both,
    None,
}

/// Score and classification of one candidate period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodScore {
    /// The candidate period (a proper factor of the sequence length)
    pub period: usize,
    /// Number of properties uniform within every phase group
    pub score: usize,
    /// The passing properties
    pub passing: Vec<TrackedProperty>,
    /// Dominant property type
    pub dominant: DominantType,
}

/// Kind of periodic structure found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// Two independent periods jointly reconstruct the sequence
    Polyrhythm,
    /// A single period is consistent but no valid pair exists
    Periodic,
    /// No periodic structure found
    None,
}

/// Result of periodicity analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyrhythmReport {
    /// Kind of structure found
    pub kind: PatternKind,
    /// "min:max" period ratio for a polyrhythm
    pub ratio: Option<String>,
    /// Confidence in [0, 1]
    pub confidence: f32,
    /// Period assigned the motion role
    pub motion_period: Option<usize>,
    /// Period assigned the spatial role
    pub spatial_period: Option<usize>,
    /// All scored candidate periods
    pub periods: Vec<PeriodScore>,
}

impl PolyrhythmReport {
    fn none(periods: Vec<PeriodScore>) -> Self {
        Self {
            kind: PatternKind::None,
            ratio: None,
            confidence: 0.0,
            motion_period: None,
            spatial_period: None,
            periods,
        }
    }
}

/// Proper factors of n: divisors excluding 1 and n itself
pub fn proper_factors(n: usize) -> Vec<usize> {
    (2..n).filter(|d| n % d == 0).collect()
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> usize {
    if a == 0 || b == 0 {
        0
    } else {
        a / gcd(a, b) * b
    }
}

fn is_halved_interval(period: usize, n: usize) -> bool {
    n % 2 == 0 && period == n / 2
}

fn is_quartered_interval(period: usize, n: usize) -> bool {
    n % 4 == 0 && period == n / 4
}

/// Whether a period pair coincides with the standard CAP comparison intervals
///
/// The halved interval always disqualifies a pair: period-N/2 structure is an
/// ordinary halved CAP, not a polyrhythm. A quarter-length period only
/// disqualifies together with another standard interval, since it may still
/// anchor a genuine polyrhythm (e.g. 4:5 over 20 beats, where 5 = N/4).
fn excluded_as_cap_interval(p1: usize, p2: usize, n: usize) -> bool {
    is_halved_interval(p1, n)
        || is_halved_interval(p2, n)
        || (is_quartered_interval(p1, n) && is_quartered_interval(p2, n))
}

/// Whether a property is uniform within every phase group of the period
fn property_uniform(beats: &[Beat], period: usize, prop: TrackedProperty) -> bool {
    for phase in 0..period {
        let mut values = (phase..beats.len()).step_by(period).map(|i| prop.value(&beats[i]));
        if let Some(first) = values.next() {
            if values.any(|v| v != first) {
                return false;
            }
        }
    }
    true
}

/// Score one candidate period against all ten tracked properties
pub fn score_period(beats: &[Beat], period: usize) -> PeriodScore {
    let passing: Vec<TrackedProperty> = TrackedProperty::all()
        .iter()
        .copied()
        .filter(|prop| property_uniform(beats, period, *prop))
        .collect();
    let motion = passing.iter().any(|p| p.kind() == PropertyKind::Motion);
    let spatial = passing.iter().any(|p| p.kind() == PropertyKind::Spatial);
    let dominant = match (motion, spatial) {
        (true, true) => DominantType::Both,
        (true, false) => DominantType::Motion,
        (false, true) => DominantType::Spatial,
        (false, false) => DominantType::None,
    };
    PeriodScore {
        period,
        score: passing.len(),
        passing,
        dominant,
    }
}

/// Score a (motion-role, spatial-role) assignment of two periods
fn score_assignment(motion: &PeriodScore, spatial: &PeriodScore, params: &DetectorParams) -> i32 {
    let mut score = 0i32;
    if motion.dominant == DominantType::Motion && spatial.dominant == DominantType::Spatial {
        score += params.polyrhythm_pure_bonus;
    }
    for prop in &motion.passing {
        match prop.kind() {
            PropertyKind::Motion => score += params.polyrhythm_match_weight,
            PropertyKind::Spatial => score -= params.polyrhythm_mismatch_penalty,
            PropertyKind::Neutral => {}
        }
    }
    for prop in &spatial.passing {
        match prop.kind() {
            PropertyKind::Spatial => score += params.polyrhythm_match_weight,
            PropertyKind::Motion => score -= params.polyrhythm_mismatch_penalty,
            PropertyKind::Neutral => {}
        }
    }
    // Prefer smaller, more fundamental periods
    score - (motion.period + spatial.period) as i32
}

/// Detect polyrhythmic or periodic structure in a beat sequence
pub fn detect_polyrhythm(beats: &[Beat], params: &DetectorParams) -> PolyrhythmReport {
    let n = beats.len();
    if n < 4 {
        return PolyrhythmReport::none(Vec::new());
    }
    let factors = proper_factors(n);
    if factors.len() < 2 {
        return PolyrhythmReport::none(Vec::new());
    }

    let periods: Vec<PeriodScore> = factors
        .iter()
        .map(|period| score_period(beats, *period))
        .collect();
    for p in &periods {
        debug!(period = p.period, score = p.score, dominant = ?p.dominant, "scored period");
    }

    // Best (motion-role, spatial-role) assignment over valid period pairs
    let mut best: Option<(i32, usize, usize)> = None;
    for (mi, motion) in periods.iter().enumerate() {
        for (si, spatial) in periods.iter().enumerate() {
            if mi == si
                || lcm(motion.period, spatial.period) != n
                || excluded_as_cap_interval(motion.period, spatial.period, n)
                || motion.dominant == DominantType::None
                || spatial.dominant == DominantType::None
            {
                continue;
            }
            let score = score_assignment(motion, spatial, params);
            if best.map_or(true, |(b, _, _)| score > b) {
                best = Some((score, mi, si));
            }
        }
    }

    if let Some((score, mi, si)) = best {
        let motion = &periods[mi];
        let spatial = &periods[si];
        let lo = motion.period.min(spatial.period);
        let hi = motion.period.max(spatial.period);
        let confidence = ((motion.score + spatial.score) as f32 / 10.0).min(1.0);
        debug!(
            motion = motion.period,
            spatial = spatial.period,
            score,
            "polyrhythm pair selected"
        );
        return PolyrhythmReport {
            kind: PatternKind::Polyrhythm,
            ratio: Some(format!("{}:{}", lo, hi)),
            confidence,
            motion_period: Some(motion.period),
            spatial_period: Some(spatial.period),
            periods,
        };
    }

    // No valid pair: a single strong period is a periodic (not polyrhythmic)
    // pattern at fixed confidence.
    let single = periods
        .iter()
        .filter(|p| p.score >= params.min_periodic_score && p.dominant != DominantType::None)
        .max_by_key(|p| p.score)
        .cloned();
    if let Some(best_single) = single {
        let period = best_single.period;
        return PolyrhythmReport {
            kind: PatternKind::Periodic,
            ratio: None,
            confidence: 0.5,
            motion_period: match best_single.dominant {
                DominantType::Motion | DominantType::Both => Some(period),
                _ => None,
            },
            spatial_period: match best_single.dominant {
                DominantType::Spatial | DominantType::Both => Some(period),
                _ => None,
            },
            periods,
        };
    }

    PolyrhythmReport::none(periods)
}
