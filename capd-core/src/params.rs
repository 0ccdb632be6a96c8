//! Tunable detection parameters
//!
//! Thresholds and weights used by the periodicity and secondary detectors.
//! Defaults match the documented scoring rules; builder-style setters allow
//! callers to tune individual values.

use serde::{Deserialize, Serialize};

/// Detection thresholds and scoring weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Minimum single-period score to report a non-polyrhythmic periodic
    /// pattern (default 2)
    pub min_periodic_score: usize,

    /// Bonus for a pure motion/spatial type match between paired periods
    /// (default 100)
    pub polyrhythm_pure_bonus: i32,

    /// Points per matching-type property in a period-pair assignment
    /// (default 10)
    pub polyrhythm_match_weight: i32,

    /// Penalty per wrong-type property in a period-pair assignment
    /// (default 5)
    pub polyrhythm_mismatch_penalty: i32,

    /// Layered-path confidence weight for a repeating path signature
    /// (default 0.4)
    pub layered_path_weight: f32,

    /// Layered-path confidence weight for a repeating motion sequence
    /// (default 0.3)
    pub layered_motion_weight: f32,

    /// Layered-path confidence weight for a closed loop (default 0.2)
    pub layered_loop_weight: f32,

    /// Layered-path confidence bonus for ≥2 cycle repeats (default 0.1)
    pub layered_repeat_bonus: f32,

    /// Minimum distinct labels for axis-alternation analysis (default 2)
    pub axis_min_distinct: usize,

    /// Maximum distinct labels for axis-alternation analysis (default 3)
    pub axis_max_distinct: usize,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            min_periodic_score: 2,
            polyrhythm_pure_bonus: 100,
            polyrhythm_match_weight: 10,
            polyrhythm_mismatch_penalty: 5,
            layered_path_weight: 0.4,
            layered_motion_weight: 0.3,
            layered_loop_weight: 0.2,
            layered_repeat_bonus: 0.1,
            axis_min_distinct: 2,
            axis_max_distinct: 3,
        }
    }
}

impl DetectorParams {
    /// Create parameters with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum single-period score for a periodic-pattern report
    pub fn with_min_periodic_score(mut self, score: usize) -> Self {
        self.min_periodic_score = score;
        self
    }

    /// Set the pure-type-match bonus for period pairing
    pub fn with_polyrhythm_pure_bonus(mut self, bonus: i32) -> Self {
        self.polyrhythm_pure_bonus = bonus;
        self
    }

    /// Set the distinct-label bounds for axis-alternation analysis
    pub fn with_axis_distinct_bounds(mut self, min: usize, max: usize) -> Self {
        self.axis_min_distinct = min;
        self.axis_max_distinct = max;
        self
    }
}
