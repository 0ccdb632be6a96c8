//! Layered-path detection via per-actor repeating subsequences
//!
//! **[CAP-LAY-010]** For each actor independently, finds the smallest proper
//! factor of the sequence length at which both the path signature
//! (start→end location per beat) and the motion-type sequence repeat. When no
//! such period exists, falls back to motion-type-only repetition as a weak
//! signal at fixed confidence 0.5.
//!
//! **[CAP-LAY-020]** The two actors' cycles combine into an isorhythmic
//! (equal cycle lengths) or polyrhythmic (unequal, ratio "min:max") report.

use crate::params::DetectorParams;
use crate::polyrhythm::proper_factors;
use crate::types::{Actor, Beat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A detected per-actor cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorCycle {
    /// Cycle length in beats
    pub length: usize,
    /// Number of times the cycle repeats over the sequence
    pub repeats: usize,
    /// Whether both path and motion repeat (strong) or motion only (weak)
    pub strong: bool,
    /// Cycle confidence in [0, 1]
    pub confidence: f32,
}

/// Relationship between the two actors' cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayeredKind {
    /// Equal cycle lengths
    Isorhythmic,
    /// Unequal cycle lengths
    Polyrhythmic,
}

/// Result of layered-path analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredReport {
    /// Isorhythmic or polyrhythmic layering
    pub kind: LayeredKind,
    /// "min:max" cycle-length ratio for polyrhythmic layering
    pub ratio: Option<String>,
    /// Blended confidence in [0, 1]
    pub confidence: f32,
    /// Blue actor's cycle, if detected
    pub blue: Option<ActorCycle>,
    /// Red actor's cycle, if detected
    pub red: Option<ActorCycle>,
}

/// Whether the value sequence repeats with the given period
fn repeats_with_period<T: PartialEq>(values: &[T], period: usize) -> bool {
    values.iter().enumerate().all(|(i, v)| *v == values[i % period])
}

/// Detect one actor's cycle
pub fn detect_actor_cycle(
    beats: &[Beat],
    actor: Actor,
    params: &DetectorParams,
) -> Option<ActorCycle> {
    let n = beats.len();
    let paths: Vec<String> = beats
        .iter()
        .map(|b| {
            let attrs = b.attrs(actor);
            format!("{}->{}", attrs.start_loc, attrs.end_loc)
        })
        .collect();
    let motions: Vec<_> = beats.iter().map(|b| b.attrs(actor).motion_type).collect();

    let mut weak: Option<usize> = None;
    for period in proper_factors(n) {
        let motion_repeats = repeats_with_period(&motions, period);
        if motion_repeats && repeats_with_period(&paths, period) {
            // Strong signal: both path and motion repeat at this period
            let repeats = n / period;
            let closed = beats[0].attrs(actor).start_loc == beats[period - 1].attrs(actor).end_loc;
            let mut confidence = params.layered_path_weight + params.layered_motion_weight;
            if closed {
                confidence += params.layered_loop_weight;
            }
            if repeats >= 2 {
                confidence += params.layered_repeat_bonus;
            }
            return Some(ActorCycle {
                length: period,
                repeats,
                strong: true,
                confidence: confidence.min(1.0),
            });
        }
        if motion_repeats && weak.is_none() {
            weak = Some(period);
        }
    }

    weak.map(|period| ActorCycle {
        length: period,
        repeats: n / period,
        strong: false,
        confidence: 0.5,
    })
}

/// Detect layered-path structure across both actors
pub fn detect_layered_paths(beats: &[Beat], params: &DetectorParams) -> Option<LayeredReport> {
    if beats.is_empty() {
        return None;
    }
    let blue = detect_actor_cycle(beats, Actor::Blue, params);
    let red = detect_actor_cycle(beats, Actor::Red, params);
    if blue.is_none() && red.is_none() {
        return None;
    }

    let blue_conf = blue.as_ref().map_or(0.0, |c| c.confidence);
    let red_conf = red.as_ref().map_or(0.0, |c| c.confidence);
    let mut confidence = (blue_conf + red_conf) / 2.0;
    if blue.is_some() && red.is_some() {
        confidence += 0.1;
    }
    let confidence = confidence.min(1.0);

    let (kind, ratio) = match (&blue, &red) {
        (Some(b), Some(r)) if b.length != r.length => {
            let lo = b.length.min(r.length);
            let hi = b.length.max(r.length);
            (LayeredKind::Polyrhythmic, Some(format!("{}:{}", lo, hi)))
        }
        _ => (LayeredKind::Isorhythmic, None),
    };
    debug!(?kind, confidence, "layered-path structure detected");

    Some(LayeredReport {
        kind,
        ratio,
        confidence,
        blue,
        red,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActorAttributes, MotionType, Position, RotationDirection};

    fn attrs(start: &str, end: &str, motion: MotionType) -> ActorAttributes {
        ActorAttributes {
            start_loc: Position::parse(start),
            end_loc: Position::parse(end),
            motion_type: motion,
            rot_dir: RotationDirection::Cw,
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

    /// Blue cycles every 2 beats (closed loop), red every 3 beats
    fn layered_6() -> Vec<Beat> {
        let blue_cycle = [attrs("n", "s", MotionType::Pro), attrs("s", "n", MotionType::Anti)];
        let red_cycle = [
            attrs("e", "w", MotionType::Static),
            attrs("w", "ne", MotionType::Dash),
            attrs("ne", "e", MotionType::Float),
        ];
        (0..6)
            .map(|i| beat((i + 1) as u32, blue_cycle[i % 2].clone(), red_cycle[i % 3].clone()))
            .collect()
    }

    #[test]
    fn test_strong_cycle_confidence() {
        let beats = layered_6();
        let cycle = detect_actor_cycle(&beats, Actor::Blue, &DetectorParams::new()).unwrap();
        assert_eq!(cycle.length, 2);
        assert_eq!(cycle.repeats, 3);
        assert!(cycle.strong);
        // 0.4 path + 0.3 motion + 0.2 closed loop + 0.1 repeats
        assert!((cycle.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_polyrhythmic_layering() {
        let beats = layered_6();
        let report = detect_layered_paths(&beats, &DetectorParams::new()).unwrap();
        assert_eq!(report.kind, LayeredKind::Polyrhythmic);
        assert_eq!(report.ratio.as_deref(), Some("2:3"));
        assert!((report.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_isorhythmic_layering() {
        let cycle_a = [attrs("n", "e", MotionType::Pro), attrs("e", "n", MotionType::Anti)];
        let cycle_b = [attrs("s", "w", MotionType::Pro), attrs("w", "s", MotionType::Anti)];
        let beats: Vec<Beat> = (0..6)
            .map(|i| beat((i + 1) as u32, cycle_a[i % 2].clone(), cycle_b[i % 2].clone()))
            .collect();
        let report = detect_layered_paths(&beats, &DetectorParams::new()).unwrap();
        assert_eq!(report.kind, LayeredKind::Isorhythmic);
        assert!(report.ratio.is_none());
    }

    #[test]
    fn test_weak_motion_only_fallback() {
        // Motion repeats every 2 beats but the path wanders: weak signal
        let locs = ["n", "e", "s", "w", "ne", "se"];
        let beats: Vec<Beat> = (0..6)
            .map(|i| {
                let motion = if i % 2 == 0 { MotionType::Pro } else { MotionType::Anti };
                beat(
                    (i + 1) as u32,
                    attrs(locs[i], locs[(i + 1) % 6], motion),
                    attrs(locs[(i + 3) % 6], locs[(i + 4) % 6], motion),
                )
            })
            .collect();
        let cycle = detect_actor_cycle(&beats, Actor::Blue, &DetectorParams::new()).unwrap();
        assert!(!cycle.strong);
        assert_eq!(cycle.length, 2);
        assert!((cycle.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_no_cycle() {
        let locs = ["n", "e", "s", "w", "ne", "se"];
        let motions = [
            MotionType::Pro,
            MotionType::Anti,
            MotionType::Static,
            MotionType::Dash,
            MotionType::Float,
            MotionType::Pro,
        ];
        let beats: Vec<Beat> = (0..6)
            .map(|i| {
                beat(
                    (i + 1) as u32,
                    attrs(locs[i], locs[(i + 1) % 6], motions[i]),
                    attrs(locs[(i + 2) % 6], locs[(i + 3) % 6], motions[(i + 2) % 6]),
                )
            })
            .collect();
        assert!(detect_layered_paths(&beats, &DetectorParams::new()).is_none());
    }
}
