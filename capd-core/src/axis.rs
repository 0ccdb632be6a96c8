//! Axis-alternating detection over per-pair resolved labels
//!
//! **[CAP-AXIS-010]** Takes the ordered list of each beat pair's resolved
//! label, normalized by stripping the inversion modifier. When between 2 and
//! 3 distinct labels appear and all belong to one related group, classifies
//! the label sequence as palindromic, alternating, symmetric around the
//! center, or generically structured.

use crate::labels::{GeometricTransform, Label};
use crate::params::DetectorParams;
use serde::{Deserialize, Serialize};

/// A group of labels considered related for alternation purposes
struct RelatedGroup {
    name: &'static str,
    members: &'static [Label],
}

/// Predefined related groups: reflections, rotations, and identity-like
/// labels
static RELATED_GROUPS: &[RelatedGroup] = &[
    RelatedGroup {
        name: "reflection",
        members: &[
            Label::of(GeometricTransform::Mirrored),
            Label::of(GeometricTransform::Flipped),
        ],
    },
    RelatedGroup {
        name: "rotation",
        members: &[
            Label::of(GeometricTransform::Rotated90Cw),
            Label::of(GeometricTransform::Rotated90Ccw),
            Label::of(GeometricTransform::Rotated180),
        ],
    },
    RelatedGroup {
        name: "identity",
        members: &[Label::REPEATED, Label::SWAPPED],
    },
];

/// Shape of the normalized label sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPattern {
    /// Even-length sequence symmetric end-to-end
    Palindromic,
    /// Period-2 repetition of exactly 2 distinct labels
    Alternating,
    /// Odd-length sequence symmetric around its center element
    SymmetricAroundCenter,
    /// Related labels without one of the stronger shapes
    Structured,
}

/// Result of axis-alternation analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisReport {
    /// Detected pattern shape
    pub pattern: AxisPattern,
    /// Name of the related group the labels belong to
    pub group: String,
    /// Normalized per-pair labels, in order
    pub labels: Vec<String>,
}

/// Analyze the per-pair resolved labels for axis alternation
///
/// Returns `None` when the distinct-label count is out of bounds or the
/// labels span more than one related group.
pub fn analyze_axis_alternation(resolved: &[Label], params: &DetectorParams) -> Option<AxisReport> {
    if resolved.is_empty() {
        return None;
    }
    let normalized: Vec<Label> = resolved.iter().map(|label| label.base()).collect();

    let mut distinct: Vec<Label> = Vec::new();
    for label in &normalized {
        if !distinct.contains(label) {
            distinct.push(*label);
        }
    }
    if distinct.len() < params.axis_min_distinct || distinct.len() > params.axis_max_distinct {
        return None;
    }

    let group = RELATED_GROUPS
        .iter()
        .find(|group| distinct.iter().all(|label| group.members.contains(label)))?;

    let n = normalized.len();
    let is_symmetric = (0..n / 2).all(|i| normalized[i] == normalized[n - 1 - i]);
    let is_alternating =
        distinct.len() == 2 && normalized.iter().enumerate().all(|(i, v)| *v == normalized[i % 2]);

    let pattern = if is_symmetric && n % 2 == 0 {
        AxisPattern::Palindromic
    } else if is_alternating {
        AxisPattern::Alternating
    } else if is_symmetric {
        AxisPattern::SymmetricAroundCenter
    } else {
        AxisPattern::Structured
    };

    Some(AxisReport {
        pattern,
        group: group.name.to_string(),
        labels: normalized.iter().map(Label::canonical).collect(),
    })
}
