use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Identifier for a tracked skeletal joint.
///
/// The set is closed and stable across frames. Declaration order defines the
/// ordinal used wherever a deterministic tie-break between joints is needed,
/// which is why the enum derives `Ord`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum JointId {
    HipCenter,
    Spine,
    ShoulderCenter,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
}

/// One joint observation within a frame.
///
/// The position is only meaningful while `tracked` is true; detectors skip
/// untracked samples instead of reading them as the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSample {
    pub id: JointId,
    pub position: Point,
    pub tracked: bool,
}

/// All joints delivered for one body on one sensor tick.
///
/// Frames are built once, consumed by shared reference, and discarded when
/// the tick ends; no detector keeps a frame past the tick that produced it.
/// Joints live in a `BTreeMap` so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonFrame {
    joints: BTreeMap<JointId, JointSample>,
    body_tracked: bool,
}

impl SkeletonFrame {
    /// Frame for a tick on which no body was tracked at all.
    pub fn untracked() -> Self {
        Self::default()
    }

    /// Empty frame for a tracked body; populate it with [`Self::with_joint`].
    pub fn tracked() -> Self {
        Self {
            joints: BTreeMap::new(),
            body_tracked: true,
        }
    }

    /// Adds a tracked joint at the given projected position.
    pub fn with_joint(mut self, id: JointId, x: f32, y: f32) -> Self {
        self.joints.insert(
            id,
            JointSample {
                id,
                position: Point::new(x, y),
                tracked: true,
            },
        );
        self
    }

    /// Records a joint the sensor reported but failed to track this tick.
    pub fn with_untracked_joint(mut self, id: JointId) -> Self {
        self.joints.insert(
            id,
            JointSample {
                id,
                position: Point::default(),
                tracked: false,
            },
        );
        self
    }

    pub fn body_tracked(&self) -> bool {
        self.body_tracked
    }

    pub fn joint(&self, id: JointId) -> Option<&JointSample> {
        self.joints.get(&id)
    }

    /// Position of a joint, provided the body and the joint are both tracked.
    ///
    /// This is the only accessor detectors use, so an untracked body or a
    /// dropped joint sample uniformly reads as "no signal".
    pub fn tracked_position(&self, id: JointId) -> Option<Point> {
        if !self.body_tracked {
            return None;
        }
        self.joints.get(&id).filter(|j| j.tracked).map(|j| j.position)
    }

    /// Iterates over every joint sample in the frame in `JointId` order.
    pub fn joints(&self) -> impl Iterator<Item = &JointSample> {
        self.joints.values()
    }
}
