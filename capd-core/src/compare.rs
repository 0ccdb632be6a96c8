//! Beat-pair comparator
//!
//! **[CAP-CMP-010]** Given an ordered pair of beats, accumulate *every*
//! transformation label that validly explains beat1→beat2. Checks are
//! independent and not mutually exclusive: a pair may simultaneously satisfy
//! "repeated" and a geometric match, or several geometric matches.
//!
//! **[CAP-CMP-020]** Rotation-direction disambiguation: a pure rotation
//! preserves the handedness of rotation, so a preserved direction selects the
//! plain label and a changed direction the "_inverted" variant. A reflection
//! (mirror/flip) naturally reverses handedness, so the expectation is
//! inverted: a changed direction is plain, a preserved one is "_inverted".
//! When neither beat reports a rotation direction the comparator cannot
//! decide and emits an explicit ambiguous outcome carrying both variants;
//! collapsing that ambiguity is the resolver's job, once corroborating pairs
//! are available.

use crate::algebra;
use crate::labels::{GeometricTransform, Label};
use crate::types::{Actor, ActorAttributes, Beat, Position, RotationDirection};
use std::collections::BTreeSet;

/// Outcome of a single transformation check against a beat pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The data definitively indicates this label
    Definitive(Label),
    /// Position data matches but rotation-direction data cannot pick a
    /// family member; both variants remain candidates
    Ambiguous {
        /// Plain family member
        plain: Label,
        /// Inverted family member
        inverted: Label,
    },
}

impl MatchOutcome {
    /// All candidate labels carried by this outcome
    pub fn labels(&self) -> Vec<Label> {
        match self {
            MatchOutcome::Definitive(label) => vec![*label],
            MatchOutcome::Ambiguous { plain, inverted } => vec![*plain, *inverted],
        }
    }

    /// Whether the outcome is definitive
    pub fn is_definitive(&self) -> bool {
        matches!(self, MatchOutcome::Definitive(_))
    }
}

/// Full comparison result for one beat pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairComparison {
    /// One outcome per transformation check that held
    pub outcomes: Vec<MatchOutcome>,
}

impl PairComparison {
    /// The set of all candidate labels across every outcome
    pub fn labels(&self) -> BTreeSet<Label> {
        self.outcomes
            .iter()
            .flat_map(MatchOutcome::labels)
            .collect()
    }

    /// Whether no transformation could be asserted
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Highest-priority candidate label, if any
    pub fn best_label(&self) -> Option<Label> {
        crate::labels::best(self.labels())
    }
}

/// How rotation direction relates across the two compared attribute sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirRelation {
    /// Both actors' directions preserved
    Preserved,
    /// Both actors' directions changed
    Changed,
    /// Actors disagree (one preserved, one changed)
    Mixed,
    /// Neither beat carries directional data
    Uninformative,
}

/// Actor correspondence used by a geometric check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mapping {
    /// blue→blue, red→red
    SameActor,
    /// blue→red, red→blue
    SwappedActor,
}

/// Compare two beats and collect every transformation label that explains
/// beat1→beat2
///
/// Returns an empty comparison when either beat is missing location data for
/// either actor.
pub fn compare_beat_pair(b1: &Beat, b2: &Beat) -> PairComparison {
    if !b1.has_locations() || !b2.has_locations() {
        return PairComparison::default();
    }

    let mut outcomes = Vec::new();

    // Repeated: both actors' material identical with no transform
    if is_repeated(b1, b2) {
        outcomes.push(MatchOutcome::Definitive(Label::REPEATED));
    }

    // Geometric checks, same-actor then actor-swapped
    for mapping in [Mapping::SameActor, Mapping::SwappedActor] {
        for geometric in GeometricTransform::all_variants() {
            if positions_match(b1, b2, *geometric, mapping) {
                outcomes.push(disambiguate(b1, b2, *geometric, mapping));
            }
        }
    }

    // Pure swap: positions exchanged between actors, independent of rotation
    if is_pure_swap(b1, b2) {
        outcomes.push(MatchOutcome::Definitive(Label::SWAPPED));
    }

    // Pure inversion: identical positions, rotation direction reversed
    if is_pure_inversion(b1, b2) {
        outcomes.push(MatchOutcome::Definitive(Label::INVERTED));
    }

    PairComparison { outcomes }
}

fn apply(geometric: GeometricTransform, p: &Position) -> Position {
    match geometric {
        GeometricTransform::Rotated90Cw => algebra::rotate_90_cw(p),
        GeometricTransform::Rotated90Ccw => algebra::rotate_90_ccw(p),
        GeometricTransform::Rotated180 => algebra::rotate_180(p),
        GeometricTransform::Mirrored => algebra::mirror_vertical(p),
        GeometricTransform::Flipped => algebra::flip_horizontal(p),
    }
}

fn target<'a>(b2: &'a Beat, actor: Actor, mapping: Mapping) -> &'a ActorAttributes {
    match mapping {
        Mapping::SameActor => b2.attrs(actor),
        Mapping::SwappedActor => b2.attrs(actor.other()),
    }
}

/// Whether the geometric transform maps both of beat1's actors onto the
/// corresponding actors of beat2
fn positions_match(b1: &Beat, b2: &Beat, geometric: GeometricTransform, mapping: Mapping) -> bool {
    Actor::both().iter().all(|actor| {
        let from = b1.attrs(*actor);
        let to = target(b2, *actor, mapping);
        apply(geometric, &from.start_loc) == to.start_loc
            && apply(geometric, &from.end_loc) == to.end_loc
    })
}

/// Rotation-direction relation across the pair under the given actor mapping
fn dir_relation(b1: &Beat, b2: &Beat, mapping: Mapping) -> DirRelation {
    let mut preserved = 0;
    let mut changed = 0;
    let mut informative = 0;
    for actor in Actor::both() {
        let d1 = b1.attrs(*actor).rot_dir;
        let d2 = target(b2, *actor, mapping).rot_dir;
        if d1 == RotationDirection::NoRotation && d2 == RotationDirection::NoRotation {
            continue;
        }
        informative += 1;
        if d1 == d2 {
            preserved += 1;
        } else {
            changed += 1;
        }
    }
    if informative == 0 {
        DirRelation::Uninformative
    } else if changed == 0 {
        DirRelation::Preserved
    } else if preserved == 0 {
        DirRelation::Changed
    } else {
        DirRelation::Mixed
    }
}

/// Select plain vs inverted variant for a position match, or keep both
fn disambiguate(
    b1: &Beat,
    b2: &Beat,
    geometric: GeometricTransform,
    mapping: Mapping,
) -> MatchOutcome {
    let mut plain = Label::of(geometric);
    if mapping == Mapping::SwappedActor {
        plain = plain.with_swap();
    }
    let inverted = plain.with_inversion();

    // Rotations expect preserved handedness; reflections expect it to change.
    let expectation_met = match dir_relation(b1, b2, mapping) {
        DirRelation::Preserved => Some(geometric.is_rotation()),
        DirRelation::Changed => Some(!geometric.is_rotation()),
        DirRelation::Mixed | DirRelation::Uninformative => None,
    };
    match expectation_met {
        Some(true) => MatchOutcome::Definitive(plain),
        Some(false) => MatchOutcome::Definitive(inverted),
        None => MatchOutcome::Ambiguous { plain, inverted },
    }
}

fn is_repeated(b1: &Beat, b2: &Beat) -> bool {
    Actor::both().iter().all(|actor| {
        let a1 = b1.attrs(*actor);
        let a2 = b2.attrs(*actor);
        a1.start_loc == a2.start_loc
            && a1.end_loc == a2.end_loc
            && a1.motion_type == a2.motion_type
    })
}

fn is_pure_swap(b1: &Beat, b2: &Beat) -> bool {
    Actor::both().iter().all(|actor| {
        let from = b1.attrs(*actor);
        let to = b2.attrs(actor.other());
        from.start_loc == to.start_loc && from.end_loc == to.end_loc
    })
}

fn is_pure_inversion(b1: &Beat, b2: &Beat) -> bool {
    let same_positions = Actor::both().iter().all(|actor| {
        let a1 = b1.attrs(*actor);
        let a2 = b2.attrs(*actor);
        a1.start_loc == a2.start_loc && a1.end_loc == a2.end_loc
    });
    same_positions && dir_relation(b1, b2, Mapping::SameActor) == DirRelation::Changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActorAttributes, MotionType};
    use GeometricTransform::*;

    fn attrs(start: &str, end: &str, motion: MotionType, dir: RotationDirection) -> ActorAttributes {
        ActorAttributes {
            start_loc: Position::parse(start),
            end_loc: Position::parse(end),
            motion_type: motion,
            rot_dir: dir,
        }
    }

    fn beat(number: u32, blue: ActorAttributes, red: ActorAttributes) -> Beat {
        Beat {
            number,
            start_pos: String::new(),
            end_pos: String::new(),
            timing: String::new(),
            letter: String::new(),
            blue,
            red,
        }
    }

    fn base_beat() -> Beat {
        beat(
            1,
            attrs("n", "e", MotionType::Pro, RotationDirection::Cw),
            attrs("ne", "se", MotionType::Anti, RotationDirection::Cw),
        )
    }

    #[test]
    fn test_self_comparison_is_repeated() {
        let b = base_beat();
        let labels = compare_beat_pair(&b, &b).labels();
        assert!(labels.contains(&Label::REPEATED));
        // No geometric transform other than trivial identity matches
        assert!(!labels.contains(&Label::of(Rotated180)));
        assert!(!labels.contains(&Label::of(Mirrored)));
        assert!(!labels.contains(&Label::of(Flipped)));
        assert!(!labels.contains(&Label::INVERTED));
    }

    #[test]
    fn test_rotated_180_same_direction_is_plain() {
        let b1 = base_beat();
        let b2 = beat(
            5,
            attrs("s", "w", MotionType::Pro, RotationDirection::Cw),
            attrs("sw", "nw", MotionType::Anti, RotationDirection::Cw),
        );
        let cmp = compare_beat_pair(&b1, &b2);
        assert!(cmp.labels().contains(&Label::of(Rotated180)));
        assert!(!cmp.labels().contains(&Label::of(Rotated180).with_inversion()));
        assert!(cmp.outcomes.iter().all(MatchOutcome::is_definitive));
    }

    #[test]
    fn test_rotated_180_reversed_direction_is_inverted() {
        let b1 = base_beat();
        let b2 = beat(
            5,
            attrs("s", "w", MotionType::Anti, RotationDirection::Ccw),
            attrs("sw", "nw", MotionType::Pro, RotationDirection::Ccw),
        );
        let labels = compare_beat_pair(&b1, &b2).labels();
        assert!(labels.contains(&Label::of(Rotated180).with_inversion()));
        assert!(!labels.contains(&Label::of(Rotated180)));
    }

    #[test]
    fn test_mirror_expects_reversed_direction() {
        // Mirror across the vertical axis: e→w, ne→nw, se→sw
        let b1 = base_beat();
        let mirrored_reversed = beat(
            5,
            attrs("n", "w", MotionType::Anti, RotationDirection::Ccw),
            attrs("nw", "sw", MotionType::Pro, RotationDirection::Ccw),
        );
        let labels = compare_beat_pair(&b1, &mirrored_reversed).labels();
        assert!(labels.contains(&Label::of(Mirrored)));
        assert!(!labels.contains(&Label::of(Mirrored).with_inversion()));

        // Same rotation direction is the unexpected case for a reflection
        let mirrored_preserved = beat(
            5,
            attrs("n", "w", MotionType::Pro, RotationDirection::Cw),
            attrs("nw", "sw", MotionType::Anti, RotationDirection::Cw),
        );
        let labels = compare_beat_pair(&b1, &mirrored_preserved).labels();
        assert!(labels.contains(&Label::of(Mirrored).with_inversion()));
        assert!(!labels.contains(&Label::of(Mirrored)));
    }

    #[test]
    fn test_missing_rotation_data_emits_both_variants() {
        let b1 = beat(
            1,
            attrs("n", "e", MotionType::Static, RotationDirection::NoRotation),
            attrs("ne", "se", MotionType::Static, RotationDirection::NoRotation),
        );
        let b2 = beat(
            5,
            attrs("s", "w", MotionType::Static, RotationDirection::NoRotation),
            attrs("sw", "nw", MotionType::Static, RotationDirection::NoRotation),
        );
        let cmp = compare_beat_pair(&b1, &b2);
        let labels = cmp.labels();
        assert!(labels.contains(&Label::of(Rotated180)));
        assert!(labels.contains(&Label::of(Rotated180).with_inversion()));
        assert!(cmp
            .outcomes
            .iter()
            .any(|o| matches!(o, MatchOutcome::Ambiguous { .. })));
    }

    #[test]
    fn test_swapped_geometric_transform() {
        let b1 = base_beat();
        // beat2's red is rotate_180 of beat1's blue, and vice versa
        let b2 = beat(
            5,
            attrs("sw", "nw", MotionType::Anti, RotationDirection::Cw),
            attrs("s", "w", MotionType::Pro, RotationDirection::Cw),
        );
        let labels = compare_beat_pair(&b1, &b2).labels();
        assert!(labels.contains(&Label::of(Rotated180).with_swap()));
        assert!(!labels.contains(&Label::of(Rotated180)));
    }

    #[test]
    fn test_pure_swap_and_symmetry() {
        let b1 = base_beat();
        let b2 = beat(
            5,
            attrs("ne", "se", MotionType::Anti, RotationDirection::Ccw),
            attrs("n", "e", MotionType::Pro, RotationDirection::Ccw),
        );
        let forward = compare_beat_pair(&b1, &b2).labels();
        let backward = compare_beat_pair(&b2, &b1).labels();
        assert!(forward.contains(&Label::SWAPPED));
        // Swap is its own inverse
        assert_eq!(
            forward.contains(&Label::SWAPPED),
            backward.contains(&Label::SWAPPED)
        );
    }

    #[test]
    fn test_pure_inversion() {
        let b1 = base_beat();
        let b2 = beat(
            5,
            attrs("n", "e", MotionType::Anti, RotationDirection::Ccw),
            attrs("ne", "se", MotionType::Pro, RotationDirection::Ccw),
        );
        let labels = compare_beat_pair(&b1, &b2).labels();
        assert!(labels.contains(&Label::INVERTED));
        // Motion types changed, so this is not a repeat
        assert!(!labels.contains(&Label::REPEATED));
    }

    #[test]
    fn test_missing_location_yields_empty_set() {
        let b1 = base_beat();
        let incomplete = beat(
            5,
            attrs("", "e", MotionType::Pro, RotationDirection::Cw),
            attrs("ne", "se", MotionType::Anti, RotationDirection::Cw),
        );
        assert!(compare_beat_pair(&b1, &incomplete).is_empty());
        assert!(compare_beat_pair(&incomplete, &b1).is_empty());
    }

    #[test]
    fn test_multiple_labels_accumulate() {
        // A beat whose two actors occupy 180°-opposed material satisfies both
        // the rotation and the swap reading simultaneously.
        let b1 = beat(
            1,
            attrs("n", "e", MotionType::Pro, RotationDirection::Cw),
            attrs("s", "w", MotionType::Pro, RotationDirection::Cw),
        );
        let b2 = beat(
            5,
            attrs("s", "w", MotionType::Pro, RotationDirection::Cw),
            attrs("n", "e", MotionType::Pro, RotationDirection::Cw),
        );
        let labels = compare_beat_pair(&b1, &b2).labels();
        assert!(labels.contains(&Label::of(Rotated180)));
        assert!(labels.contains(&Label::SWAPPED));
    }
}
