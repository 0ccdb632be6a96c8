//! Transformation labels, priority ordering and display formatting
//!
//! **[CAP-LBL-010]** Structured label values (geometric component + swap +
//! inversion flags) with a canonical underscore-joined string form
//! **[CAP-LBL-020]** Fixed total priority order with precomputed rank map
//! **[CAP-LBL-030]** Display formatting ("ROTATED 180+SWAPPED+INVERTED")
//!
//! All matching and composition operates on the structured value; the string
//! forms exist only at the input and display boundaries.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Geometric component of a transformation label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometricTransform {
    Rotated90Cw,
    Rotated90Ccw,
    Rotated180,
    Mirrored,
    Flipped,
}

impl GeometricTransform {
    /// Canonical label token
    pub fn token(&self) -> &'static str {
        match self {
            GeometricTransform::Rotated90Cw => "rotated_90_cw",
            GeometricTransform::Rotated90Ccw => "rotated_90_ccw",
            GeometricTransform::Rotated180 => "rotated_180",
            GeometricTransform::Mirrored => "mirrored",
            GeometricTransform::Flipped => "flipped",
        }
    }

    /// Display token (uppercase, spaces instead of underscores)
    pub fn display_token(&self) -> &'static str {
        match self {
            GeometricTransform::Rotated90Cw => "ROTATED 90 CW",
            GeometricTransform::Rotated90Ccw => "ROTATED 90 CCW",
            GeometricTransform::Rotated180 => "ROTATED 180",
            GeometricTransform::Mirrored => "MIRRORED",
            GeometricTransform::Flipped => "FLIPPED",
        }
    }

    /// Whether this is one of the three rotations
    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            GeometricTransform::Rotated90Cw
                | GeometricTransform::Rotated90Ccw
                | GeometricTransform::Rotated180
        )
    }

    /// All variants, rotations first
    pub fn all_variants() -> &'static [GeometricTransform] {
        &[
            GeometricTransform::Rotated90Cw,
            GeometricTransform::Rotated90Ccw,
            GeometricTransform::Rotated180,
            GeometricTransform::Mirrored,
            GeometricTransform::Flipped,
        ]
    }
}

/// A transformation label: optional geometric component plus swap and
/// inversion modifiers
///
/// The empty label (no component, no modifiers) is `repeated`. Component
/// recognition is order-independent: `Label::parse` accepts tokens in any
/// order and always produces the same structured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label {
    /// Geometric component, if any
    pub geometric: Option<GeometricTransform>,
    /// Actor-swap modifier (blue↔red)
    pub swapped: bool,
    /// Inversion modifier (rotation-direction/motion inversion)
    pub inverted: bool,
}

impl Label {
    /// The identity label: both actors repeat their material untransformed
    pub const REPEATED: Label = Label {
        geometric: None,
        swapped: false,
        inverted: false,
    };

    /// Pure actor swap, no geometric transform
    pub const SWAPPED: Label = Label {
        geometric: None,
        swapped: true,
        inverted: false,
    };

    /// Pure inversion, no geometric transform, no swap
    pub const INVERTED: Label = Label {
        geometric: None,
        swapped: false,
        inverted: true,
    };

    /// Label with the given geometric component and no modifiers
    pub const fn of(geometric: GeometricTransform) -> Label {
        Label {
            geometric: Some(geometric),
            swapped: false,
            inverted: false,
        }
    }

    /// This label with the swap modifier added
    pub const fn with_swap(mut self) -> Label {
        self.swapped = true;
        self
    }

    /// This label with the inversion modifier added
    pub const fn with_inversion(mut self) -> Label {
        self.inverted = true;
        self
    }

    /// This label with the inversion modifier stripped
    ///
    /// The base identifies the label's transformation family: a family is
    /// {base, base+inverted}.
    pub const fn base(mut self) -> Label {
        self.inverted = false;
        self
    }

    /// The other member of this label's family
    pub const fn family_partner(self) -> Label {
        Label {
            geometric: self.geometric,
            swapped: self.swapped,
            inverted: !self.inverted,
        }
    }

    /// Canonical underscore-joined string form
    pub fn canonical(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(g) = self.geometric {
            parts.push(g.token());
        }
        if self.swapped {
            parts.push("swapped");
        }
        if self.inverted {
            parts.push("inverted");
        }
        if parts.is_empty() {
            "repeated".to_string()
        } else {
            parts.join("_")
        }
    }

    /// Display form: uppercase components joined with "+"
    ///
    /// e.g. `rotated_180_swapped_inverted` → "ROTATED 180+SWAPPED+INVERTED"
    pub fn display(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(g) = self.geometric {
            parts.push(g.display_token());
        }
        if self.swapped {
            parts.push("SWAPPED");
        }
        if self.inverted {
            parts.push("INVERTED");
        }
        if parts.is_empty() {
            "REPEATED".to_string()
        } else {
            parts.join("+")
        }
    }

    /// Parse a raw label string into a structured label
    ///
    /// Recognizes the `swapped`/`inverted` modifier tokens in any position;
    /// the remaining tokens must form a known geometric token, `repeated`, or
    /// nothing. Returns `None` for unrecognized labels.
    pub fn parse(raw: &str) -> Option<Label> {
        let lowered = raw.to_lowercase();
        let mut swapped = false;
        let mut inverted = false;
        let mut rest: Vec<&str> = Vec::new();
        for token in lowered.split('_') {
            match token {
                "swapped" => swapped = true,
                "inverted" => inverted = true,
                other => rest.push(other),
            }
        }
        let remainder = rest.join("_");
        let geometric = match remainder.as_str() {
            "" => None,
            "repeated" => {
                if swapped || inverted {
                    return None;
                }
                None
            }
            token => Some(
                GeometricTransform::all_variants()
                    .iter()
                    .copied()
                    .find(|g| g.token() == token)?,
            ),
        };
        Some(Label {
            geometric,
            swapped,
            inverted,
        })
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// Sentinel rank for labels absent from the priority list
pub const UNLISTED_RANK: usize = 999;

/// Fixed total priority order over labels
///
/// **[CAP-LBL-020]** Pure directional rotations first, then
/// rotation+inversion, then rotation+swap, then triple compounds, then other
/// compounds, then simple single-axis labels, then `repeated` last.
pub static PRIORITY: Lazy<Vec<Label>> = Lazy::new(|| {
    use GeometricTransform::*;
    let rotations = [Rotated90Cw, Rotated90Ccw, Rotated180];
    let reflections = [Mirrored, Flipped];
    let mut order: Vec<Label> = Vec::new();

    // Pure directional rotations
    for g in rotations {
        order.push(Label::of(g));
    }
    // Rotation + inversion
    for g in rotations {
        order.push(Label::of(g).with_inversion());
    }
    // Rotation + swap
    for g in rotations {
        order.push(Label::of(g).with_swap());
    }
    // Triple compounds (rotation + swap + inversion)
    for g in rotations {
        order.push(Label::of(g).with_swap().with_inversion());
    }
    // Other compounds: reflections with modifiers, then swap+invert
    for g in reflections {
        order.push(Label::of(g).with_inversion());
    }
    for g in reflections {
        order.push(Label::of(g).with_swap());
    }
    for g in reflections {
        order.push(Label::of(g).with_swap().with_inversion());
    }
    order.push(Label::SWAPPED.with_inversion());
    // Simple single-axis labels
    for g in reflections {
        order.push(Label::of(g));
    }
    order.push(Label::SWAPPED);
    order.push(Label::INVERTED);
    // Repeated last
    order.push(Label::REPEATED);
    order
});

/// Precomputed label → rank map
static RANK: Lazy<HashMap<Label, usize>> = Lazy::new(|| {
    PRIORITY
        .iter()
        .enumerate()
        .map(|(i, label)| (*label, i))
        .collect()
});

/// Priority rank of a label; unlisted labels get [`UNLISTED_RANK`]
pub fn rank(label: &Label) -> usize {
    RANK.get(label).copied().unwrap_or(UNLISTED_RANK)
}

/// Stable-sort labels by ascending priority rank
///
/// Unlisted labels sort after all listed ones, preserving their relative
/// order among themselves.
pub fn sort_by_priority(labels: &mut [Label]) {
    labels.sort_by_key(rank);
}

/// Highest-priority label among the candidates, if any
pub fn best(labels: impl IntoIterator<Item = Label>) -> Option<Label> {
    labels.into_iter().min_by_key(|label| rank(label))
}

/// Format a raw label string for display
///
/// Recognized labels render as "+"-joined uppercase components; anything
/// else falls back to uppercasing with underscores replaced by spaces.
pub fn format_label(raw: &str) -> String {
    match Label::parse(raw) {
        Some(label) => label.display(),
        None => raw.to_uppercase().replace('_', " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GeometricTransform::*;

    #[test]
    fn test_canonical_forms() {
        assert_eq!(Label::REPEATED.canonical(), "repeated");
        assert_eq!(Label::SWAPPED.canonical(), "swapped");
        assert_eq!(Label::INVERTED.canonical(), "inverted");
        assert_eq!(Label::of(Rotated180).canonical(), "rotated_180");
        assert_eq!(
            Label::of(Rotated180).with_swap().with_inversion().canonical(),
            "rotated_180_swapped_inverted"
        );
        assert_eq!(Label::of(Mirrored).with_swap().canonical(), "mirrored_swapped");
    }

    #[test]
    fn test_parse_round_trip() {
        for label in PRIORITY.iter() {
            let parsed = Label::parse(&label.canonical());
            assert_eq!(parsed, Some(*label), "round trip failed for {}", label);
        }
    }

    #[test]
    fn test_parse_order_independent() {
        // Components recognized independent of detection order
        assert_eq!(
            Label::parse("swapped_rotated_180_inverted"),
            Some(Label::of(Rotated180).with_swap().with_inversion())
        );
        assert_eq!(
            Label::parse("inverted_swapped"),
            Some(Label::SWAPPED.with_inversion())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Label::parse("warped"), None);
        assert_eq!(Label::parse("rotated_270"), None);
        // "repeated" cannot carry modifiers
        assert_eq!(Label::parse("repeated_swapped"), None);
    }

    #[test]
    fn test_family_partner() {
        let base = Label::of(Rotated180);
        assert_eq!(base.family_partner(), base.with_inversion());
        assert_eq!(base.with_inversion().family_partner(), base);
        assert_eq!(base.with_inversion().base(), base);
    }

    #[test]
    fn test_priority_grouping() {
        // Pure rotations rank above everything else
        assert!(rank(&Label::of(Rotated90Cw)) < rank(&Label::of(Rotated90Cw).with_inversion()));
        assert!(rank(&Label::of(Rotated180).with_inversion()) < rank(&Label::of(Rotated180).with_swap()));
        // Same-actor transformations rank above swapped ones
        assert!(rank(&Label::of(Mirrored).with_inversion()) < rank(&Label::of(Mirrored).with_swap()));
        // Simple single-axis labels rank below compounds
        assert!(rank(&Label::of(Mirrored).with_swap()) < rank(&Label::of(Mirrored)));
        // Repeated is last
        let repeated_rank = rank(&Label::REPEATED);
        for label in PRIORITY.iter().filter(|l| **l != Label::REPEATED) {
            assert!(rank(label) < repeated_rank, "{} should outrank repeated", label);
        }
    }

    #[test]
    fn test_every_priority_entry_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for label in PRIORITY.iter() {
            assert!(seen.insert(*label), "duplicate priority entry {}", label);
        }
    }

    #[test]
    fn test_best_selects_highest_priority() {
        let candidates = vec![
            Label::SWAPPED,
            Label::of(Rotated180),
            Label::of(Mirrored).with_swap(),
        ];
        assert_eq!(best(candidates), Some(Label::of(Rotated180)));
        assert_eq!(best(Vec::new()), None);
    }

    #[test]
    fn test_priority_covers_full_label_space() {
        // 6 geometric options (including none) × swap × inversion = 24 labels
        assert_eq!(PRIORITY.len(), 24);
        for geometric in std::iter::once(None).chain(GeometricTransform::all_variants().iter().map(|g| Some(*g))) {
            for swapped in [false, true] {
                for inverted in [false, true] {
                    let label = Label {
                        geometric,
                        swapped,
                        inverted,
                    };
                    assert!(rank(&label) < UNLISTED_RANK, "{} missing from priority", label);
                }
            }
        }
    }

    #[test]
    fn test_sort_by_priority() {
        let mut labels = vec![Label::REPEATED, Label::of(Mirrored), Label::of(Rotated90Ccw)];
        sort_by_priority(&mut labels);
        assert_eq!(
            labels,
            vec![Label::of(Rotated90Ccw), Label::of(Mirrored), Label::REPEATED]
        );
    }

    #[test]
    fn test_format_label() {
        assert_eq!(
            format_label("rotated_180_swapped_inverted"),
            "ROTATED 180+SWAPPED+INVERTED"
        );
        assert_eq!(format_label("rotated_180"), "ROTATED 180");
        assert_eq!(format_label("mirrored_swapped"), "MIRRORED+SWAPPED");
        assert_eq!(format_label("repeated"), "REPEATED");
        // Unrecognized labels fall back to underscores → spaces
        assert_eq!(format_label("half_warped"), "HALF WARPED");
    }
}
