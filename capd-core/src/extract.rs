//! Beat extraction from raw sequence records
//!
//! **[CAP-EXT-010]** Normalizes a raw circular sequence (a list of untyped
//! per-beat maps, as serialized from a JSON document store) into a canonical
//! in-memory beat list.
//!
//! Extraction is total: location/motion strings are lowercased, missing
//! fields default to empty/"unknown", records whose beat-number field is not
//! a non-negative integer are dropped, and the input is never mutated. The
//! beat-0 record is the start-position pseudo-beat: it is excluded from the
//! beat list but provides the sequence's starting position for the
//! circularity check.

use crate::error::{Error, Result};
use crate::types::{ActorAttributes, Beat, MotionType, Position, RotationDirection};
use serde_json::Value;
use tracing::debug;

/// An extracted sequence: the starting position plus the ordered beat list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Sequence-level starting position from the beat-0 record (may be empty)
    pub start_position: String,
    /// Ordered beats, beat numbers ≥1
    pub beats: Vec<Beat>,
}

impl Sequence {
    /// Extract a sequence from raw per-beat records
    ///
    /// Total function: malformed records are dropped, malformed fields
    /// default to sentinels.
    pub fn from_records(records: &[Value]) -> Sequence {
        let mut start_position = String::new();
        let mut beats = Vec::new();

        for record in records {
            let map = match record.as_object() {
                Some(map) => map,
                None => continue,
            };
            let number = match map.get("beat").and_then(Value::as_u64) {
                Some(n) => n,
                None => continue,
            };
            if number == 0 {
                // Start-position pseudo-beat: its end position is the
                // sequence's starting position.
                let end_pos = str_field(map, "end_pos");
                start_position = if end_pos.is_empty() {
                    str_field(map, "start_pos")
                } else {
                    end_pos
                };
                continue;
            }
            beats.push(Beat {
                number: number as u32,
                start_pos: str_field(map, "start_pos"),
                end_pos: str_field(map, "end_pos"),
                timing: str_field(map, "timing"),
                letter: raw_field(map, "letter"),
                blue: actor_attrs(map, "blue_attributes"),
                red: actor_attrs(map, "red_attributes"),
            });
        }

        debug!(
            beat_count = beats.len(),
            start_position = %start_position,
            "extracted sequence"
        );
        Sequence {
            start_position,
            beats,
        }
    }

    /// Extract a sequence from a JSON value that must be an array of records
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the value is not an array.
    pub fn from_json(value: &Value) -> Result<Sequence> {
        match value.as_array() {
            Some(records) => Ok(Sequence::from_records(records)),
            None => Err(Error::InvalidInput(
                "sequence payload must be a JSON array of beat records".to_string(),
            )),
        }
    }

    /// Number of beats (excluding the start-position pseudo-beat)
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    /// Whether the sequence has no beats
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Whether the sequence is circular
    ///
    /// Circularity requires at least 2 beats, a known starting position, and
    /// the final beat ending where the sequence starts.
    pub fn is_circular(&self) -> bool {
        if self.beats.len() < 2 || self.start_position.is_empty() {
            return false;
        }
        match self.beats.last() {
            Some(last) => last.end_pos == self.start_position,
            None => false,
        }
    }
}

/// Lowercased string field, defaulting to empty
fn str_field(map: &serde_json::Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

/// String field with case preserved (letters are case-significant)
fn raw_field(map: &serde_json::Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Per-actor attributes from a nested attribute object
fn actor_attrs(map: &serde_json::Map<String, Value>, key: &str) -> ActorAttributes {
    let attrs = match map.get(key).and_then(Value::as_object) {
        Some(attrs) => attrs,
        None => return ActorAttributes::default(),
    };
    ActorAttributes {
        start_loc: Position::parse(&str_field(attrs, "start_loc")),
        end_loc: Position::parse(&str_field(attrs, "end_loc")),
        motion_type: MotionType::parse(&str_field(attrs, "motion_type")),
        rot_dir: RotationDirection::parse(&str_field(attrs, "prop_rot_dir")),
    }
}
