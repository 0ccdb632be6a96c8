//! # CAPD Core Library
//!
//! Detection and labeling of Circular Automatic Patterns (CAPs) in symbolic
//! movement sequences performed by two simultaneous actors ("blue" and
//! "red"). Given a circular sequence of beats, the engine determines whether
//! its second half (or quarter) is a geometric/combinatorial transformation
//! of an earlier segment and classifies that transformation:
//! - Position/motion transform algebra (rotations, mirror, flip, inversion)
//! - Beat extraction from raw JSON sequence records
//! - Multi-hypothesis beat-pair comparison with ambiguity tracking
//! - Common-transformation resolution with family-based disambiguation
//! - Priority ordering and display formatting of transformation labels
//! - Periodicity/polyrhythm analysis and secondary structure detectors
//!
//! The core is pure, synchronous and deterministic: no I/O, no shared state.
//! Persistence of reviewed designations is a collaborator contract
//! ([`store::DesignationStore`]), never called by the core itself.

pub mod algebra;
pub mod axis;
pub mod compare;
pub mod detect;
pub mod error;
pub mod extract;
pub mod labels;
pub mod layered;
pub mod modular;
pub mod pairs;
pub mod params;
pub mod polyrhythm;
pub mod resolve;
pub mod store;
pub mod types;
pub mod zones;

pub use detect::{BeatPair, CapDesignation, CapDetector, Component, DetectionResult, TransformationInterval};
pub use error::{Error, Result};
pub use extract::Sequence;
pub use labels::{GeometricTransform, Label};
pub use params::DetectorParams;
pub use types::{Actor, Beat, MotionType, Position, RotationDirection};
