//! Core data model for circular movement sequences
//!
//! **[CAP-DATA-010]** Position, motion type and rotation direction vocabulary
//! **[CAP-DATA-020]** Beat and per-actor attribute records
//!
//! All location/motion values are canonicalized to lowercase on input.
//! Values outside the known vocabulary are preserved verbatim rather than
//! rejected: the transform algebra treats them as fixed points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic compass position
///
/// **[CAP-DATA-010]** Closed set of 8 compass values. Anything else is kept
/// as `Other` and passes through every geometric transform unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    /// Out-of-vocabulary value, preserved verbatim (lowercased)
    Other(String),
}

impl Position {
    /// Parse a position code, case-insensitive
    ///
    /// Unknown codes are preserved as `Other` (lowercased), including the
    /// empty string, which stands for missing location data.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "n" => Position::North,
            "s" => Position::South,
            "e" => Position::East,
            "w" => Position::West,
            "ne" => Position::Northeast,
            "nw" => Position::Northwest,
            "se" => Position::Southeast,
            "sw" => Position::Southwest,
            other => Position::Other(other.to_string()),
        }
    }

    /// Canonical lowercase code
    pub fn as_str(&self) -> &str {
        match self {
            Position::North => "n",
            Position::South => "s",
            Position::East => "e",
            Position::West => "w",
            Position::Northeast => "ne",
            Position::Northwest => "nw",
            Position::Southeast => "se",
            Position::Southwest => "sw",
            Position::Other(s) => s.as_str(),
        }
    }

    /// Whether this is one of the 8 compass values
    pub fn is_compass(&self) -> bool {
        !matches!(self, Position::Other(_))
    }

    /// Whether location data is present at all
    pub fn is_known(&self) -> bool {
        match self {
            Position::Other(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// All 8 compass variants
    pub fn compass_variants() -> &'static [Position] {
        &[
            Position::North,
            Position::South,
            Position::East,
            Position::West,
            Position::Northeast,
            Position::Northwest,
            Position::Southeast,
            Position::Southwest,
        ]
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Position::parse(&s)
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Motion type performed by an actor during a beat
///
/// Only `Pro` and `Anti` participate in motion inversion; all other values
/// are fixed points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MotionType {
    Pro,
    Anti,
    Static,
    Dash,
    Float,
    /// Missing or out-of-vocabulary motion code
    Unknown,
}

impl MotionType {
    /// Parse a motion code, case-insensitive; unknown codes map to `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pro" => MotionType::Pro,
            "anti" => MotionType::Anti,
            "static" => MotionType::Static,
            "dash" => MotionType::Dash,
            "float" => MotionType::Float,
            _ => MotionType::Unknown,
        }
    }

    /// Canonical lowercase code
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionType::Pro => "pro",
            MotionType::Anti => "anti",
            MotionType::Static => "static",
            MotionType::Dash => "dash",
            MotionType::Float => "float",
            MotionType::Unknown => "unknown",
        }
    }

    /// All known variants
    pub fn all_variants() -> &'static [MotionType] {
        &[
            MotionType::Pro,
            MotionType::Anti,
            MotionType::Static,
            MotionType::Dash,
            MotionType::Float,
            MotionType::Unknown,
        ]
    }
}

impl From<String> for MotionType {
    fn from(s: String) -> Self {
        MotionType::parse(&s)
    }
}

impl From<MotionType> for String {
    fn from(m: MotionType) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rotation direction of an actor's prop during a beat
///
/// Used only to resolve which of a "plain" vs "inverted" label variant
/// applies when position/motion data alone is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RotationDirection {
    Cw,
    Ccw,
    /// No rotation reported; uninformative for disambiguation
    NoRotation,
}

impl RotationDirection {
    /// Parse a rotation-direction code; missing/unknown codes map to `NoRotation`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cw" => RotationDirection::Cw,
            "ccw" => RotationDirection::Ccw,
            _ => RotationDirection::NoRotation,
        }
    }

    /// Canonical lowercase code
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationDirection::Cw => "cw",
            RotationDirection::Ccw => "ccw",
            RotationDirection::NoRotation => "no_rot",
        }
    }

    /// Whether the value carries directional information
    pub fn is_informative(&self) -> bool {
        !matches!(self, RotationDirection::NoRotation)
    }
}

impl From<String> for RotationDirection {
    fn from(s: String) -> Self {
        RotationDirection::parse(&s)
    }
}

impl From<RotationDirection> for String {
    fn from(r: RotationDirection) -> Self {
        r.as_str().to_string()
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the two simultaneous performers
///
/// The algebra is fully symmetric in the two actors; the `swapped` transform
/// exchanges them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Blue,
    Red,
}

impl Actor {
    /// The other actor
    pub fn other(&self) -> Actor {
        match self {
            Actor::Blue => Actor::Red,
            Actor::Red => Actor::Blue,
        }
    }

    /// Both actors, in canonical order
    pub fn both() -> &'static [Actor] {
        &[Actor::Blue, Actor::Red]
    }
}

/// Per-actor attributes of a single beat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorAttributes {
    /// Start location
    pub start_loc: Position,
    /// End location
    pub end_loc: Position,
    /// Motion type
    pub motion_type: MotionType,
    /// Prop rotation direction
    pub rot_dir: RotationDirection,
}

impl ActorAttributes {
    /// Whether both locations are present
    pub fn has_locations(&self) -> bool {
        self.start_loc.is_known() && self.end_loc.is_known()
    }
}

impl Default for ActorAttributes {
    fn default() -> Self {
        Self {
            start_loc: Position::Other(String::new()),
            end_loc: Position::Other(String::new()),
            motion_type: MotionType::Unknown,
            rot_dir: RotationDirection::NoRotation,
        }
    }
}

/// One discrete step of a sequence, carrying both actors' motion description
///
/// **[CAP-DATA-020]** Beat numbers are 1-based; the beat-0 start-position
/// pseudo-record is represented separately on [`crate::extract::Sequence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    /// 1-based beat number
    pub number: u32,
    /// Sequence-level start position code (e.g. "alpha1")
    pub start_pos: String,
    /// Sequence-level end position code
    pub end_pos: String,
    /// Timing metadata (e.g. "split", "tog"), lowercased, may be empty
    pub timing: String,
    /// Letter metadata, case preserved, may be empty
    pub letter: String,
    /// Blue actor attributes
    pub blue: ActorAttributes,
    /// Red actor attributes
    pub red: ActorAttributes,
}

impl Beat {
    /// Attributes of the given actor
    pub fn attrs(&self, actor: Actor) -> &ActorAttributes {
        match actor {
            Actor::Blue => &self.blue,
            Actor::Red => &self.red,
        }
    }

    /// Whether both actors carry complete location data
    pub fn has_locations(&self) -> bool {
        self.blue.has_locations() && self.red.has_locations()
    }
}

/// Letter-type bucket used as a tracked periodic property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterType {
    /// Plain ASCII letter (e.g. "A")
    Plain,
    /// Dash-augmented letter (e.g. "A-")
    DashAugmented,
    /// Non-latin letter (e.g. Greek)
    NonLatin,
    /// Missing letter metadata
    Empty,
}

impl LetterType {
    /// Classify a letter string into its bucket
    pub fn classify(letter: &str) -> Self {
        if letter.is_empty() {
            LetterType::Empty
        } else if letter.contains('-') {
            LetterType::DashAugmented
        } else if !letter.is_ascii() {
            LetterType::NonLatin
        } else {
            LetterType::Plain
        }
    }

    /// Canonical code
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterType::Plain => "plain",
            LetterType::DashAugmented => "dash_augmented",
            LetterType::NonLatin => "non_latin",
            LetterType::Empty => "empty",
        }
    }
}
