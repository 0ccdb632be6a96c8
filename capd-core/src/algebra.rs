//! Position and motion transform algebra
//!
//! **[CAP-ALG-010]** Fixed 8-entry bijections over the compass positions for
//! rotate-90-CW, rotate-90-CCW, rotate-180, mirror-vertical and
//! flip-horizontal, plus motion-type inversion (pro↔anti).
//!
//! Laws (unit-tested below):
//! - rotate_180, mirror_vertical and flip_horizontal are involutions
//! - rotate_90_cw and rotate_90_ccw are mutual inverses
//! - four applications of rotate_90_cw compose to the identity
//!
//! Out-of-vocabulary positions pass through every transform unchanged.

use crate::types::{MotionType, Position};

/// Rotate a position 90° clockwise
pub fn rotate_90_cw(p: &Position) -> Position {
    match p {
        Position::North => Position::East,
        Position::East => Position::South,
        Position::South => Position::West,
        Position::West => Position::North,
        Position::Northeast => Position::Southeast,
        Position::Southeast => Position::Southwest,
        Position::Southwest => Position::Northwest,
        Position::Northwest => Position::Northeast,
        Position::Other(s) => Position::Other(s.clone()),
    }
}

/// Rotate a position 90° counterclockwise
pub fn rotate_90_ccw(p: &Position) -> Position {
    match p {
        Position::North => Position::West,
        Position::West => Position::South,
        Position::South => Position::East,
        Position::East => Position::North,
        Position::Northeast => Position::Northwest,
        Position::Northwest => Position::Southwest,
        Position::Southwest => Position::Southeast,
        Position::Southeast => Position::Northeast,
        Position::Other(s) => Position::Other(s.clone()),
    }
}

/// Rotate a position 180°
pub fn rotate_180(p: &Position) -> Position {
    match p {
        Position::North => Position::South,
        Position::South => Position::North,
        Position::East => Position::West,
        Position::West => Position::East,
        Position::Northeast => Position::Southwest,
        Position::Southwest => Position::Northeast,
        Position::Northwest => Position::Southeast,
        Position::Southeast => Position::Northwest,
        Position::Other(s) => Position::Other(s.clone()),
    }
}

/// Mirror a position across the vertical axis (east↔west)
pub fn mirror_vertical(p: &Position) -> Position {
    match p {
        Position::East => Position::West,
        Position::West => Position::East,
        Position::Northeast => Position::Northwest,
        Position::Northwest => Position::Northeast,
        Position::Southeast => Position::Southwest,
        Position::Southwest => Position::Southeast,
        Position::North => Position::North,
        Position::South => Position::South,
        Position::Other(s) => Position::Other(s.clone()),
    }
}

/// Flip a position across the horizontal axis (north↔south)
pub fn flip_horizontal(p: &Position) -> Position {
    match p {
        Position::North => Position::South,
        Position::South => Position::North,
        Position::Northeast => Position::Southeast,
        Position::Southeast => Position::Northeast,
        Position::Northwest => Position::Southwest,
        Position::Southwest => Position::Northwest,
        Position::East => Position::East,
        Position::West => Position::West,
        Position::Other(s) => Position::Other(s.clone()),
    }
}

/// Invert a motion type: pro↔anti, all others are fixed points
pub fn invert_motion_type(m: MotionType) -> MotionType {
    match m {
        MotionType::Pro => MotionType::Anti,
        MotionType::Anti => MotionType::Pro,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_180_is_involution() {
        for p in Position::compass_variants() {
            assert_eq!(rotate_180(&rotate_180(p)), *p, "rotate_180² != id for {:?}", p);
        }
    }

    #[test]
    fn test_mirror_vertical_is_involution() {
        for p in Position::compass_variants() {
            assert_eq!(
                mirror_vertical(&mirror_vertical(p)),
                *p,
                "mirror_vertical² != id for {:?}",
                p
            );
        }
    }

    #[test]
    fn test_flip_horizontal_is_involution() {
        for p in Position::compass_variants() {
            assert_eq!(
                flip_horizontal(&flip_horizontal(p)),
                *p,
                "flip_horizontal² != id for {:?}",
                p
            );
        }
    }

    #[test]
    fn test_quarter_rotations_are_mutual_inverses() {
        for p in Position::compass_variants() {
            assert_eq!(rotate_90_ccw(&rotate_90_cw(p)), *p);
            assert_eq!(rotate_90_cw(&rotate_90_ccw(p)), *p);
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for p in Position::compass_variants() {
            let q = rotate_90_cw(&rotate_90_cw(&rotate_90_cw(&rotate_90_cw(p))));
            assert_eq!(q, *p);
        }
    }

    #[test]
    fn test_two_quarter_turns_equal_half_turn() {
        for p in Position::compass_variants() {
            assert_eq!(rotate_90_cw(&rotate_90_cw(p)), rotate_180(p));
        }
    }

    #[test]
    fn test_unknown_position_is_fixed_point() {
        let p = Position::Other("center".to_string());
        assert_eq!(rotate_90_cw(&p), p);
        assert_eq!(rotate_90_ccw(&p), p);
        assert_eq!(rotate_180(&p), p);
        assert_eq!(mirror_vertical(&p), p);
        assert_eq!(flip_horizontal(&p), p);
    }

    #[test]
    fn test_invert_motion_type() {
        assert_eq!(invert_motion_type(MotionType::Pro), MotionType::Anti);
        assert_eq!(invert_motion_type(MotionType::Anti), MotionType::Pro);
        assert_eq!(invert_motion_type(MotionType::Static), MotionType::Static);
        assert_eq!(invert_motion_type(MotionType::Dash), MotionType::Dash);
        assert_eq!(invert_motion_type(MotionType::Float), MotionType::Float);
        for m in MotionType::all_variants() {
            assert_eq!(invert_motion_type(invert_motion_type(*m)), *m);
        }
    }
}
