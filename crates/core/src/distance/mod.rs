use crate::skeleton::{JointId, SkeletonFrame};
use crate::{InteractError, Result};

/// Running scalar distance between two named joints.
///
/// When either joint drops out of tracking the meter holds the last valid
/// value rather than snapping to zero; before the first valid pair it reads
/// 0.0.
#[derive(Debug)]
pub struct JointDistanceMeter {
    first: JointId,
    second: JointId,
    last: f32,
}

impl JointDistanceMeter {
    pub fn new(first: JointId, second: JointId) -> Result<Self> {
        if first == second {
            return Err(InteractError::invalid_config(format!(
                "distance meter needs two distinct joints, got {first:?} twice"
            )));
        }
        Ok(Self {
            first,
            second,
            last: 0.0,
        })
    }

    /// Distance after the most recent evaluation.
    pub fn distance(&self) -> f32 {
        self.last
    }

    pub fn evaluate(&mut self, frame: &SkeletonFrame) -> f32 {
        if let (Some(a), Some(b)) = (
            frame.tracked_position(self.first),
            frame.tracked_position(self.second),
        ) {
            self.last = a.distance_to(b);
        }
        self.last
    }
}
