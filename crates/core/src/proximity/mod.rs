use serde::{Deserialize, Serialize};

use crate::skeleton::{JointId, SkeletonFrame};
use crate::{InteractError, Result};

/// A reference joint observed relative to the primary joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub joint: JointId,
    pub distance: f32,
}

/// Level state and per-tick edge for one proximity pairing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult {
    pub intersecting: bool,
    /// Nearest tracked reference joint this tick, whether or not it is
    /// within the threshold. Absent when the primary joint or every
    /// reference joint is untracked.
    pub nearest: Option<Contact>,
    /// Set only on the tick where `intersecting` transitioned to true.
    pub entered: Option<Contact>,
}

/// Watches the distance from one primary joint to a set of reference joints.
///
/// "Intersecting" holds while the minimum distance to any tracked reference
/// joint is within the threshold, boundary inclusive. The reference set is
/// kept sorted by joint ordinal so an exact distance tie always resolves to
/// the lowest-ordinal joint, keeping repeated runs reproducible.
#[derive(Debug)]
pub struct JointProximityDetector {
    primary: JointId,
    references: Vec<JointId>,
    threshold: f32,
    was_intersecting: bool,
}

impl JointProximityDetector {
    pub fn new(primary: JointId, references: Vec<JointId>, threshold: f32) -> Result<Self> {
        if references.is_empty() {
            return Err(InteractError::invalid_config(
                "proximity detector needs at least one reference joint",
            ));
        }
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(InteractError::invalid_config(format!(
                "proximity threshold {threshold} must be a positive distance"
            )));
        }
        let mut references = references;
        references.sort();
        references.dedup();
        if references.contains(&primary) {
            return Err(InteractError::invalid_config(
                "reference set must not contain the primary joint",
            ));
        }
        Ok(Self {
            primary,
            references,
            threshold,
            was_intersecting: false,
        })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Level state after the most recent evaluation.
    pub fn is_intersecting(&self) -> bool {
        self.was_intersecting
    }

    /// Re-evaluates the pairing against this tick's frame.
    ///
    /// An untracked primary joint makes the result inactive no matter where
    /// the reference joints are.
    pub fn evaluate(&mut self, frame: &SkeletonFrame) -> ProximityResult {
        let nearest = frame.tracked_position(self.primary).and_then(|primary| {
            let mut best: Option<Contact> = None;
            for id in &self.references {
                if let Some(position) = frame.tracked_position(*id) {
                    let distance = primary.distance_to(position);
                    // Strictly-closer keeps the earlier (lower-ordinal)
                    // joint on exact ties.
                    let closer = best.map(|b| distance < b.distance).unwrap_or(true);
                    if closer {
                        best = Some(Contact {
                            joint: *id,
                            distance,
                        });
                    }
                }
            }
            best
        });

        let intersecting = nearest
            .map(|contact| contact.distance <= self.threshold)
            .unwrap_or(false);
        let entered = if intersecting && !self.was_intersecting {
            nearest
        } else {
            None
        };
        self.was_intersecting = intersecting;

        ProximityResult {
            intersecting,
            nearest,
            entered,
        }
    }
}
