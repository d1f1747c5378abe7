use serde::{Deserialize, Serialize};

use crate::geometry::{signed_angle_degrees, Point};
use crate::skeleton::{JointId, SkeletonFrame};

/// Which hand anchors the reference location of the volume measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Hand {
    Left,
    #[default]
    Right,
}

/// Derived hand-volume measurement for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    /// Arithmetic mean of the two hand positions.
    pub midpoint: Point,
    /// Position of the dominant hand.
    pub reference: Point,
    /// Signed angle in degrees of the midpoint → reference vector against
    /// the horizontal axis, counter-clockwise positive, in (-180, 180].
    ///
    /// The angle is continuous frame-to-frame for small joint movements
    /// except for the wrap at ±180, which callers must treat as a valid
    /// jump rather than an error.
    pub angle_degrees: f32,
}

/// Computes a midpoint, a reference location, and a signed angle from the
/// hand joints of a single tracked body.
///
/// Evaluation only runs when every required joint is tracked; otherwise the
/// previous result is returned unchanged, so downstream consumers always see
/// a usable measurement even under noisy tracking.
#[derive(Debug)]
pub struct HandVolumeAnalyzer {
    dominant: Hand,
    required: Vec<JointId>,
    last: VolumeResult,
}

impl HandVolumeAnalyzer {
    /// Analyzer with the default requirements: both hands and both elbows
    /// tracked, right hand dominant.
    pub fn new() -> Self {
        Self::with_dominant(Hand::default())
    }

    pub fn with_dominant(dominant: Hand) -> Self {
        Self::with_required_joints(
            dominant,
            vec![
                JointId::ElbowLeft,
                JointId::HandLeft,
                JointId::ElbowRight,
                JointId::HandRight,
            ],
        )
    }

    /// Analyzer gated on a custom joint subset. Both hands feed the
    /// computation itself, so they are required regardless of the subset
    /// passed in.
    pub fn with_required_joints(dominant: Hand, joints: Vec<JointId>) -> Self {
        let mut required = joints;
        required.push(JointId::HandLeft);
        required.push(JointId::HandRight);
        required.sort();
        required.dedup();
        Self {
            dominant,
            required,
            last: VolumeResult::default(),
        }
    }

    /// Result of the most recent evaluation.
    pub fn latest(&self) -> VolumeResult {
        self.last
    }

    pub fn evaluate(&mut self, frame: &SkeletonFrame) -> VolumeResult {
        let ready = self
            .required
            .iter()
            .all(|id| frame.tracked_position(*id).is_some());
        if !ready {
            return self.last;
        }

        // Required set always contains both hands, checked just above.
        let left = frame.tracked_position(JointId::HandLeft).unwrap_or_default();
        let right = frame.tracked_position(JointId::HandRight).unwrap_or_default();

        let midpoint = left.midpoint(right);
        let reference = match self.dominant {
            Hand::Left => left,
            Hand::Right => right,
        };
        // Coincident hands have no direction; the angle holds its previous
        // value while midpoint and reference still update.
        let angle_degrees =
            signed_angle_degrees(midpoint, reference).unwrap_or(self.last.angle_degrees);

        self.last = VolumeResult {
            midpoint,
            reference,
            angle_degrees,
        };
        self.last
    }
}

impl Default for HandVolumeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
