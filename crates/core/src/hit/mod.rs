use serde::{Deserialize, Serialize};

use crate::geometry::Region;
use crate::skeleton::{JointId, SkeletonFrame};
use crate::{InteractError, Result};

/// Level state and per-tick edge for one button region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    pub is_hitting: bool,
    /// First configured candidate currently inside the region.
    pub hitting_joint: Option<JointId>,
    /// Set only on the tick where `is_hitting` transitioned to true, carrying
    /// the joint that triggered the entry. Sustained hits and releases stay
    /// silent.
    pub entered: Option<JointId>,
}

/// Tests an ordered list of candidate joints against a fixed screen region.
///
/// Candidate order decides which joint is reported when several are inside
/// the region on the same tick. The tester owns exactly one piece of
/// cross-frame state, the previous tick's level, which drives the entry edge.
#[derive(Debug)]
pub struct GeometryHitTester {
    region: Region,
    candidates: Vec<JointId>,
    was_hitting: bool,
}

impl GeometryHitTester {
    pub fn new(region: Region, candidates: Vec<JointId>) -> Result<Self> {
        if candidates.is_empty() {
            return Err(InteractError::invalid_config(
                "hit tester needs at least one candidate joint",
            ));
        }
        Ok(Self {
            region,
            candidates,
            was_hitting: false,
        })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Level state after the most recent evaluation.
    pub fn is_hitting(&self) -> bool {
        self.was_hitting
    }

    /// Re-evaluates the tester against this tick's frame.
    ///
    /// Untracked candidates are skipped; a frame with no usable candidate at
    /// all simply reads as "not hitting".
    pub fn evaluate(&mut self, frame: &SkeletonFrame) -> HitResult {
        let mut hitting_joint = None;
        for id in &self.candidates {
            if let Some(position) = frame.tracked_position(*id) {
                if self.region.contains(position) {
                    hitting_joint = Some(*id);
                    break;
                }
            }
        }

        let is_hitting = hitting_joint.is_some();
        let entered = if is_hitting && !self.was_hitting {
            hitting_joint
        } else {
            None
        };
        self.was_hitting = is_hitting;

        HitResult {
            is_hitting,
            hitting_joint,
            entered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_edge_tester() -> GeometryHitTester {
        GeometryHitTester::new(
            Region::new(0.0, 0.0, 80.0, 480.0).unwrap(),
            vec![JointId::HandLeft],
        )
        .unwrap()
    }

    fn frame_with_left_hand(x: f32, y: f32) -> SkeletonFrame {
        SkeletonFrame::tracked().with_joint(JointId::HandLeft, x, y)
    }

    #[test]
    fn tracked_joint_inside_region_hits() {
        let mut tester = left_edge_tester();
        let result = tester.evaluate(&frame_with_left_hand(40.0, 100.0));
        assert!(result.is_hitting);
        assert_eq!(result.hitting_joint, Some(JointId::HandLeft));
    }

    #[test]
    fn untracked_joint_never_hits() {
        let mut tester = left_edge_tester();
        let frame = SkeletonFrame::tracked().with_untracked_joint(JointId::HandLeft);
        let result = tester.evaluate(&frame);
        assert!(!result.is_hitting);
        assert_eq!(result.hitting_joint, None);
    }

    #[test]
    fn leaving_the_region_clears_the_level() {
        let mut tester = left_edge_tester();
        assert!(tester.evaluate(&frame_with_left_hand(40.0, 100.0)).is_hitting);
        assert!(!tester.evaluate(&frame_with_left_hand(300.0, 100.0)).is_hitting);
    }

    #[test]
    fn entry_edge_fires_exactly_once() {
        let mut tester = left_edge_tester();
        let outside = frame_with_left_hand(300.0, 100.0);
        let inside = frame_with_left_hand(40.0, 100.0);

        assert_eq!(tester.evaluate(&outside).entered, None);
        assert_eq!(tester.evaluate(&inside).entered, Some(JointId::HandLeft));
        assert_eq!(tester.evaluate(&inside).entered, None);
        assert_eq!(tester.evaluate(&inside).entered, None);
    }

    #[test]
    fn reentry_fires_a_fresh_edge() {
        let mut tester = left_edge_tester();
        let outside = frame_with_left_hand(300.0, 100.0);
        let inside = frame_with_left_hand(40.0, 100.0);

        assert!(tester.evaluate(&inside).entered.is_some());
        assert!(tester.evaluate(&outside).entered.is_none());
        assert!(tester.evaluate(&inside).entered.is_some());
    }

    #[test]
    fn first_candidate_in_order_wins() {
        let mut tester = GeometryHitTester::new(
            Region::new(0.0, 0.0, 80.0, 480.0).unwrap(),
            vec![JointId::HandRight, JointId::HandLeft],
        )
        .unwrap();

        let frame = SkeletonFrame::tracked()
            .with_joint(JointId::HandLeft, 10.0, 10.0)
            .with_joint(JointId::HandRight, 20.0, 10.0);
        assert_eq!(tester.evaluate(&frame).hitting_joint, Some(JointId::HandRight));

        // With the preferred candidate untracked the next one reports.
        let frame = SkeletonFrame::tracked()
            .with_joint(JointId::HandLeft, 10.0, 10.0)
            .with_untracked_joint(JointId::HandRight);
        assert_eq!(tester.evaluate(&frame).hitting_joint, Some(JointId::HandLeft));
    }

    #[test]
    fn untracked_body_reads_as_no_signal() {
        let mut tester = left_edge_tester();
        let result = tester.evaluate(&SkeletonFrame::untracked());
        assert!(!result.is_hitting);
    }

    #[test]
    fn empty_candidate_list_is_rejected() {
        let region = Region::new(0.0, 0.0, 80.0, 480.0).unwrap();
        assert!(GeometryHitTester::new(region, Vec::new()).is_err());
    }
}
