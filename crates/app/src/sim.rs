//! Scripted skeleton source standing in for the sensor.
//!
//! Frames are a pure function of the tick index, so a run of the simulator is
//! reproducible and the detector rig can be exercised end to end without any
//! hardware attached. The script sweeps the left hand across the full frame
//! width (crossing both button regions), dips the right hand onto the right
//! knee near the end of each dip cycle, and periodically drops the left hand
//! out of tracking to exercise the last-known-good paths.

use std::f32::consts::TAU;

use skeleton_interact_core::{JointId, SkeletonFrame};

/// Projected frame size the script is laid out for, matching the rig built by
/// `InteractConfig::live_defaults()`.
pub const FRAME_WIDTH: f32 = 640.0;
pub const FRAME_HEIGHT: f32 = 480.0;

/// Ticks for one full left-right-left sweep of the left hand.
const SWEEP_PERIOD: u64 = 240;
/// The right hand dips onto the right knee in the last ticks of each cycle.
const DIP_PERIOD: u64 = 150;
const DIP_TICKS: u64 = 8;
/// The left hand loses tracking in the last ticks of each cycle.
const DROPOUT_PERIOD: u64 = 100;
const DROPOUT_TICKS: u64 = 3;

/// Deterministic scripted body, one frame per tick.
#[derive(Debug, Default)]
pub struct ScriptedSource;

impl ScriptedSource {
    pub fn new() -> Self {
        Self
    }

    /// The single tracked body at the given tick.
    pub fn frame_at(&self, tick: u64) -> SkeletonFrame {
        let phase = (tick % SWEEP_PERIOD) as f32 / SWEEP_PERIOD as f32 * TAU;

        // Left hand sweeps 20..620 horizontally with a gentle vertical bob.
        let left_x = 320.0 - 300.0 * phase.cos();
        let left_y = 240.0 + 40.0 * (phase * 2.0).sin();

        // Right hand hovers mid-frame except while dipping onto the knee.
        let dipping = tick % DIP_PERIOD >= DIP_PERIOD - DIP_TICKS;
        let (right_x, right_y) = if dipping {
            (392.0, 416.0)
        } else {
            (430.0, 220.0 + 15.0 * (phase * 3.0).sin())
        };

        let mut frame = SkeletonFrame::tracked()
            .with_joint(JointId::HandRight, right_x, right_y)
            .with_joint(JointId::ElbowLeft, 220.0, 300.0)
            .with_joint(JointId::ElbowRight, 420.0, 300.0)
            .with_joint(JointId::ShoulderCenter, 320.0, 180.0)
            .with_joint(JointId::KneeLeft, 250.0, 420.0)
            .with_joint(JointId::KneeRight, 390.0, 420.0);

        let dropped = tick % DROPOUT_PERIOD >= DROPOUT_PERIOD - DROPOUT_TICKS;
        if dropped {
            frame = frame.with_untracked_joint(JointId::HandLeft);
        } else {
            frame = frame.with_joint(JointId::HandLeft, left_x, left_y);
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_deterministic_per_tick() {
        let source = ScriptedSource::new();
        assert_eq!(source.frame_at(42), source.frame_at(42));
        assert_eq!(source.frame_at(137), source.frame_at(137));
    }

    #[test]
    fn sweep_starts_inside_the_left_button_region() {
        let source = ScriptedSource::new();
        let start = source.frame_at(0).tracked_position(JointId::HandLeft).unwrap();
        assert!(start.x < 80.0);

        // A quarter sweep later the hand is mid-frame, clear of both regions.
        let mid = source
            .frame_at(SWEEP_PERIOD / 4)
            .tracked_position(JointId::HandLeft)
            .unwrap();
        assert!(mid.x > 80.0 && mid.x < 560.0);
    }

    #[test]
    fn sweep_reaches_the_right_button_region() {
        let source = ScriptedSource::new();
        let far = source
            .frame_at(SWEEP_PERIOD / 2)
            .tracked_position(JointId::HandLeft)
            .unwrap();
        assert!(far.x > 560.0);
        assert!(far.x <= FRAME_WIDTH);
    }

    #[test]
    fn dropout_window_hides_the_left_hand() {
        let source = ScriptedSource::new();
        let frame = source.frame_at(DROPOUT_PERIOD - 1);
        assert!(frame.tracked_position(JointId::HandLeft).is_none());

        let frame = source.frame_at(DROPOUT_PERIOD);
        assert!(frame.tracked_position(JointId::HandLeft).is_some());
    }

    #[test]
    fn dip_window_lands_the_right_hand_near_the_knee() {
        let source = ScriptedSource::new();
        let frame = source.frame_at(DIP_PERIOD - 1);
        let hand = frame.tracked_position(JointId::HandRight).unwrap();
        let knee = frame.tracked_position(JointId::KneeRight).unwrap();
        assert!(hand.distance_to(knee) <= 30.0);
    }

    #[test]
    fn script_stays_inside_the_frame() {
        let source = ScriptedSource::new();
        for tick in 0..SWEEP_PERIOD {
            let frame = source.frame_at(tick);
            for joint in frame.joints().filter(|j| j.tracked) {
                assert!(joint.position.x >= 0.0 && joint.position.x <= FRAME_WIDTH);
                assert!(joint.position.y >= 0.0 && joint.position.y <= FRAME_HEIGHT);
            }
        }
    }
}
