//! Core library for the skeleton interaction toolkit.
//!
//! One `SkeletonFrame` arrives per sensor tick; the detectors in this crate
//! turn those noisy, possibly-absent joint samples into stable interaction
//! signals: region hits, joint proximity, joint-pair distance, and a derived
//! hand-volume measurement. Each module owns one detector kind, and
//! `dispatch` drives them all in a fixed order before fanning edge events
//! out to registered consumers. Everything here is pure computation over the
//! current frame plus each detector's own previous state; acquisition,
//! rendering, and playback stay outside the crate.

pub mod config;
pub mod dispatch;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod proximity;
pub mod skeleton;
pub mod volume;

pub use config::{
    ButtonConfig, DistancePairConfig, InteractConfig, IntersectionConfig, RegionConfig,
    VolumeConfig, DEFAULT_PROXIMITY_THRESHOLD,
};
pub use dispatch::{EventSink, FrameDispatcher, InteractionEvent, TickSnapshot};
pub use distance::JointDistanceMeter;
pub use error::{InteractError, Result};
pub use geometry::{signed_angle_degrees, Point, Region};
pub use hit::{GeometryHitTester, HitResult};
pub use proximity::{Contact, JointProximityDetector, ProximityResult};
pub use skeleton::{JointId, JointSample, SkeletonFrame};
pub use volume::{Hand, HandVolumeAnalyzer, VolumeResult};
