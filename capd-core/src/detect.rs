//! End-to-end CAP detection
//!
//! **[CAP-DET-010]** Orchestrates extraction, pairing, comparison and
//! resolution into a single detection result: an optional CAP designation,
//! the full per-pair label groupings, and the secondary structure reports.
//!
//! Classification falls through in order: halved CAP (refined by the
//! quartered pairing when applicable), then modular column structure, then
//! freeform. Non-circular and odd-length sequences are freeform immediately.

use crate::axis::{self, AxisReport};
use crate::compare::{self, PairComparison};
use crate::extract::Sequence;
use crate::labels::{self, GeometricTransform, Label};
use crate::layered::{self, LayeredReport};
use crate::modular::{self, ModularReport};
use crate::pairs;
use crate::params::DetectorParams;
use crate::polyrhythm::{self, PolyrhythmReport};
use crate::resolve;
use crate::types::{Actor, Beat, RotationDirection};
use crate::zones::{self, ZoneCoverageReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// High-level transformation component of a CAP designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Rotated,
    Mirrored,
    Flipped,
    Swapped,
    Inverted,
    Repeated,
}

impl Component {
    /// Canonical lowercase token
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Rotated => "rotated",
            Component::Mirrored => "mirrored",
            Component::Flipped => "flipped",
            Component::Swapped => "swapped",
            Component::Inverted => "inverted",
            Component::Repeated => "repeated",
        }
    }

    /// Components present in a label
    pub fn from_label(label: &Label) -> BTreeSet<Component> {
        let mut components = BTreeSet::new();
        match label.geometric {
            Some(g) if g.is_rotation() => {
                components.insert(Component::Rotated);
            }
            Some(GeometricTransform::Mirrored) => {
                components.insert(Component::Mirrored);
            }
            Some(GeometricTransform::Flipped) => {
                components.insert(Component::Flipped);
            }
            _ => {}
        }
        if label.swapped {
            components.insert(Component::Swapped);
        }
        if label.inverted {
            components.insert(Component::Inverted);
        }
        if components.is_empty() {
            components.insert(Component::Repeated);
        }
        components
    }
}

/// Comparison interval at which a component was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationInterval {
    /// Beat i ↔ beat i+N/2
    Halved,
    /// Beat i ↔ beat i+N/4
    Quartered,
}

/// One beat pair and its label grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatPair {
    /// Beat number of the key beat
    pub key_beat: u32,
    /// Beat number of the corresponding beat
    pub corresponding_beat: u32,
    /// All candidate labels, canonical form, sorted by priority
    pub raw_transformations: Vec<String>,
    /// Display form of the pair's best label, or "UNKNOWN"
    pub resolved_label: String,
}

/// Final CAP classification of a sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapDesignation {
    /// Transformation components
    pub components: BTreeSet<Component>,
    /// Canonical joined component string (e.g. "rotated_swapped")
    pub cap_type: String,
    /// Interval at which each component was established
    pub intervals: BTreeMap<Component, TransformationInterval>,
    /// Rotation direction for a rotated component, when determinate
    pub rotation_direction: Option<RotationDirection>,
    /// Reviewer confirmed this designation
    pub confirmed: bool,
    /// Reviewer denied this designation
    pub denied: bool,
}

impl CapDesignation {
    /// Build an unreviewed designation from a resolved label, with all
    /// components at the halved interval
    pub fn from_label(label: &Label) -> Self {
        let components = Component::from_label(label);
        let cap_type = components
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("_");
        let intervals = components
            .iter()
            .map(|c| (*c, TransformationInterval::Halved))
            .collect();
        Self {
            components,
            cap_type,
            intervals,
            rotation_direction: None,
            confirmed: false,
            denied: false,
        }
    }

    /// Mark the designation confirmed by a reviewer
    pub fn confirm(&mut self) {
        self.confirmed = true;
        self.denied = false;
    }

    /// Mark the designation denied by a reviewer
    pub fn deny(&mut self) {
        self.denied = true;
        self.confirmed = false;
    }
}

/// Complete detection result for one sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// CAP designation, when a single consistent transformation explains the
    /// sequence
    pub designation: Option<CapDesignation>,
    /// Halved beat pairs with their label groupings
    pub pairs: Vec<BeatPair>,
    /// Sequence could not be classified as CAP or modular
    pub is_freeform: bool,
    /// Modular column structure, when detected
    pub modular: Option<ModularReport>,
    /// Periodicity analysis
    pub polyrhythm: Option<PolyrhythmReport>,
    /// Layered-path analysis
    pub layered: Option<LayeredReport>,
    /// Zone-coverage analysis
    pub zones: Option<ZoneCoverageReport>,
    /// Axis-alternation analysis
    pub axis: Option<AxisReport>,
}

impl DetectionResult {
    fn freeform() -> Self {
        Self {
            designation: None,
            pairs: Vec::new(),
            is_freeform: true,
            modular: None,
            polyrhythm: None,
            layered: None,
            zones: None,
            axis: None,
        }
    }
}

/// CAP detector
///
/// Pure and synchronous: every detection is a deterministic function of the
/// sequence, and detectors for different sequences may run in parallel.
#[derive(Debug, Clone, Default)]
pub struct CapDetector {
    params: DetectorParams,
}

impl CapDetector {
    /// Create a detector with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom parameters
    pub fn with_params(params: DetectorParams) -> Self {
        Self { params }
    }

    /// Run full detection on a sequence
    pub fn detect(&self, sequence: &Sequence) -> DetectionResult {
        let n = sequence.len();
        if n < 2 || n % 2 != 0 || !sequence.is_circular() {
            debug!(beats = n, circular = sequence.is_circular(), "sequence is freeform");
            return DetectionResult::freeform();
        }
        let beats = &sequence.beats;

        let halved = comparisons(beats, &pairs::halved_pairs(n));
        let beat_pairs = beat_pairs(beats, &pairs::halved_pairs(n), &halved);
        let resolved: Vec<Option<Label>> = halved.iter().map(PairComparison::best_label).collect();

        let common = resolve::find_common_transformations(&halved);
        let designation = common.first().map(|best| {
            let mut designation = CapDesignation::from_label(best);
            self.refine_with_quartered(beats, &mut designation);
            designation.rotation_direction = rotation_direction(beats, best);
            debug!(cap_type = %designation.cap_type, "CAP designation resolved");
            designation
        });

        // Secondary structure reports are computed regardless of the CAP
        // outcome; modular classification only matters in the fallthrough.
        let modular = modular::detect_modular(&resolved);
        let polyrhythm = polyrhythm::detect_polyrhythm(beats, &self.params);
        let layered = layered::detect_layered_paths(beats, &self.params);
        let zone_report = zones::analyze_zone_coverage(beats);
        let resolved_labels: Vec<Label> = resolved.iter().flatten().copied().collect();
        let axis_report = if resolved_labels.len() == resolved.len() {
            axis::analyze_axis_alternation(&resolved_labels, &self.params)
        } else {
            None
        };

        let is_freeform = designation.is_none() && modular.is_none();
        DetectionResult {
            designation,
            pairs: beat_pairs,
            is_freeform,
            modular,
            polyrhythm: Some(polyrhythm),
            layered,
            zones: zone_report,
            axis: axis_report,
        }
    }

    /// Re-resolve at the quartered interval and upgrade the interval of any
    /// component the quartered pairing confirms
    fn refine_with_quartered(&self, beats: &[Beat], designation: &mut CapDesignation) {
        let n = beats.len();
        let index_pairs = pairs::quartered_pairs(n);
        if index_pairs.is_empty() {
            return;
        }
        let quartered = comparisons(beats, &index_pairs);
        let common = resolve::find_common_transformations(&quartered);
        if let Some(best) = common.first() {
            for component in Component::from_label(best) {
                if designation.components.contains(&component) {
                    designation
                        .intervals
                        .insert(component, TransformationInterval::Quartered);
                }
            }
        }
    }
}

fn comparisons(beats: &[Beat], index_pairs: &[(usize, usize)]) -> Vec<PairComparison> {
    index_pairs
        .iter()
        .map(|(i, j)| compare::compare_beat_pair(&beats[*i], &beats[*j]))
        .collect()
}

fn beat_pairs(
    beats: &[Beat],
    index_pairs: &[(usize, usize)],
    comparisons: &[PairComparison],
) -> Vec<BeatPair> {
    index_pairs
        .iter()
        .zip(comparisons)
        .map(|((i, j), comparison)| {
            let mut raw: Vec<Label> = comparison.labels().into_iter().collect();
            labels::sort_by_priority(&mut raw);
            BeatPair {
                key_beat: beats[*i].number,
                corresponding_beat: beats[*j].number,
                raw_transformations: raw.iter().map(Label::canonical).collect(),
                resolved_label: comparison
                    .best_label()
                    .map(|label| label.display())
                    .unwrap_or_else(|| "UNKNOWN".to_string()),
            }
        })
        .collect()
}

/// Rotation direction implied by the resolved label
///
/// Quarter rotations carry their direction; a half rotation reports the
/// actors' shared direction when it is uniform across the whole sequence.
fn rotation_direction(beats: &[Beat], label: &Label) -> Option<RotationDirection> {
    match label.geometric {
        Some(GeometricTransform::Rotated90Cw) => Some(RotationDirection::Cw),
        Some(GeometricTransform::Rotated90Ccw) => Some(RotationDirection::Ccw),
        Some(GeometricTransform::Rotated180) => {
            let mut shared: Option<RotationDirection> = None;
            for beat in beats {
                for actor in Actor::both() {
                    let dir = beat.attrs(*actor).rot_dir;
                    if !dir.is_informative() {
                        continue;
                    }
                    match shared {
                        None => shared = Some(dir),
                        Some(existing) if existing != dir => return None,
                        Some(_) => {}
                    }
                }
            }
            shared
        }
        _ => None,
    }
}
