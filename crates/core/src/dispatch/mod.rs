//! Per-tick fan-out of one skeleton frame to every registered detector.
//!
//! The dispatcher is the single consumer of the frame source: it re-evaluates
//! all detectors in a fixed order, snapshots their results for read-only
//! collaborators such as a renderer, and hands the tick's edge events to the
//! registered sinks once evaluation has finished.

use std::fmt;

use crate::config::InteractConfig;
use crate::distance::JointDistanceMeter;
use crate::hit::{GeometryHitTester, HitResult};
use crate::proximity::{JointProximityDetector, ProximityResult};
use crate::skeleton::{JointId, SkeletonFrame};
use crate::volume::{HandVolumeAnalyzer, VolumeResult};
use crate::Result;

/// Discrete edge-triggered notification produced by one tick.
///
/// Events carry the index of the detector that fired (registration order) so
/// consumers can tell multiple buttons or pairings apart. Only entry edges
/// exist; leaving a region or separating two joints is silent.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// A candidate joint entered a button region.
    RegionEntered { button: usize, joint: JointId },
    /// A primary joint came within threshold of a reference joint.
    ProximityEntered {
        pair: usize,
        joint: JointId,
        distance: f32,
    },
}

/// Consumer of edge events, registered on the dispatcher.
///
/// `on_event` runs inside the tick and must not block it; anything slow
/// (audio playback, network writes) belongs on a worker fed over a channel.
pub trait EventSink {
    fn on_event(&mut self, event: &InteractionEvent);
}

/// Latest results for every registered detector plus the edge events the
/// most recent tick produced. Read-only view for rendering collaborators;
/// indices line up with detector registration order.
#[derive(Debug, Default, Clone)]
pub struct TickSnapshot {
    pub hits: Vec<HitResult>,
    pub proximities: Vec<ProximityResult>,
    pub distances: Vec<f32>,
    pub volumes: Vec<VolumeResult>,
    pub events: Vec<InteractionEvent>,
}

/// Drives every registered detector once per sensor tick.
///
/// Evaluation order is fixed: buttons, then proximity pairings, then
/// distance meters, then volume analyzers, each in registration order. All
/// evaluation for a tick completes before events reach any sink, and no
/// frame reference survives the call.
#[derive(Default)]
pub struct FrameDispatcher {
    buttons: Vec<GeometryHitTester>,
    intersections: Vec<JointProximityDetector>,
    meters: Vec<JointDistanceMeter>,
    volumes: Vec<HandVolumeAnalyzer>,
    sinks: Vec<Box<dyn EventSink>>,
    snapshot: TickSnapshot,
}

impl FrameDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dispatcher from a rig configuration, validating every
    /// detector up front.
    pub fn from_config(config: &InteractConfig) -> Result<Self> {
        let mut dispatcher = Self::new();
        for button in &config.buttons {
            dispatcher.add_button(GeometryHitTester::new(
                button.region.to_region()?,
                button.joints.clone(),
            )?);
        }
        for pairing in &config.intersections {
            dispatcher.add_intersection(JointProximityDetector::new(
                pairing.primary,
                pairing.references.clone(),
                pairing.threshold,
            )?);
        }
        for pair in &config.distances {
            dispatcher.add_meter(JointDistanceMeter::new(pair.first, pair.second)?);
        }
        for volume in &config.volumes {
            dispatcher.add_volume(HandVolumeAnalyzer::with_dominant(volume.dominant));
        }
        Ok(dispatcher)
    }

    /// Registers a button tester; returns its index in snapshots and events.
    pub fn add_button(&mut self, tester: GeometryHitTester) -> usize {
        self.buttons.push(tester);
        self.buttons.len() - 1
    }

    /// Registers a proximity pairing; returns its index.
    pub fn add_intersection(&mut self, detector: JointProximityDetector) -> usize {
        self.intersections.push(detector);
        self.intersections.len() - 1
    }

    /// Registers a distance meter; returns its index.
    pub fn add_meter(&mut self, meter: JointDistanceMeter) -> usize {
        self.meters.push(meter);
        self.meters.len() - 1
    }

    /// Registers a volume analyzer; returns its index.
    pub fn add_volume(&mut self, analyzer: HandVolumeAnalyzer) -> usize {
        self.volumes.push(analyzer);
        self.volumes.len() - 1
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Snapshot of the most recent tick.
    pub fn latest(&self) -> &TickSnapshot {
        &self.snapshot
    }

    /// Processes one sensor tick.
    ///
    /// When several bodies are delivered, the first one with a tracked
    /// skeleton wins, matching the enumeration-order selection the sensor
    /// pipeline has always used; the rest are ignored this tick. With no
    /// tracked body at all, every detector degrades to its no-signal state
    /// (inactive or last-known-good) instead of faulting.
    pub fn dispatch(&mut self, bodies: &[SkeletonFrame]) -> &TickSnapshot {
        let fallback = SkeletonFrame::untracked();
        let frame = bodies
            .iter()
            .find(|body| body.body_tracked())
            .unwrap_or(&fallback);

        self.snapshot.hits.clear();
        self.snapshot.proximities.clear();
        self.snapshot.distances.clear();
        self.snapshot.volumes.clear();
        self.snapshot.events.clear();

        for (button, tester) in self.buttons.iter_mut().enumerate() {
            let result = tester.evaluate(frame);
            if let Some(joint) = result.entered {
                self.snapshot
                    .events
                    .push(InteractionEvent::RegionEntered { button, joint });
            }
            self.snapshot.hits.push(result);
        }
        for (pair, detector) in self.intersections.iter_mut().enumerate() {
            let result = detector.evaluate(frame);
            if let Some(contact) = result.entered {
                self.snapshot.events.push(InteractionEvent::ProximityEntered {
                    pair,
                    joint: contact.joint,
                    distance: contact.distance,
                });
            }
            self.snapshot.proximities.push(result);
        }
        for meter in &mut self.meters {
            self.snapshot.distances.push(meter.evaluate(frame));
        }
        for analyzer in &mut self.volumes {
            self.snapshot.volumes.push(analyzer.evaluate(frame));
        }

        for sink in &mut self.sinks {
            for event in &self.snapshot.events {
                sink.on_event(event);
            }
        }

        &self.snapshot
    }
}

impl fmt::Debug for FrameDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameDispatcher")
            .field("buttons", &self.buttons.len())
            .field("intersections", &self.intersections.len())
            .field("meters", &self.meters.len())
            .field("volumes", &self.volumes.len())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::geometry::Region;

    struct RecordingSink {
        seen: Rc<RefCell<Vec<InteractionEvent>>>,
    }

    impl EventSink for RecordingSink {
        fn on_event(&mut self, event: &InteractionEvent) {
            self.seen.borrow_mut().push(event.clone());
        }
    }

    fn rigged_dispatcher() -> FrameDispatcher {
        let mut dispatcher = FrameDispatcher::new();
        dispatcher.add_button(
            GeometryHitTester::new(
                Region::new(0.0, 0.0, 80.0, 480.0).unwrap(),
                vec![JointId::HandLeft],
            )
            .unwrap(),
        );
        dispatcher.add_intersection(
            JointProximityDetector::new(
                JointId::HandLeft,
                vec![JointId::KneeLeft, JointId::KneeRight],
                30.0,
            )
            .unwrap(),
        );
        dispatcher.add_meter(JointDistanceMeter::new(JointId::HandLeft, JointId::HandRight).unwrap());
        dispatcher.add_volume(HandVolumeAnalyzer::new());
        dispatcher
    }

    fn full_body(left_hand: (f32, f32)) -> SkeletonFrame {
        SkeletonFrame::tracked()
            .with_joint(JointId::HandLeft, left_hand.0, left_hand.1)
            .with_joint(JointId::HandRight, 400.0, 200.0)
            .with_joint(JointId::ElbowLeft, 150.0, 250.0)
            .with_joint(JointId::ElbowRight, 350.0, 250.0)
            .with_joint(JointId::KneeLeft, 250.0, 420.0)
            .with_joint(JointId::KneeRight, 390.0, 420.0)
    }

    #[test]
    fn snapshot_covers_every_registered_detector() {
        let mut dispatcher = rigged_dispatcher();
        let snapshot = dispatcher.dispatch(&[full_body((200.0, 200.0))]);

        assert_eq!(snapshot.hits.len(), 1);
        assert_eq!(snapshot.proximities.len(), 1);
        assert_eq!(snapshot.distances.len(), 1);
        assert_eq!(snapshot.volumes.len(), 1);
    }

    #[test]
    fn first_tracked_body_wins() {
        let mut dispatcher = rigged_dispatcher();
        let bodies = [
            SkeletonFrame::untracked(),
            full_body((40.0, 100.0)),
            full_body((300.0, 100.0)),
        ];
        let snapshot = dispatcher.dispatch(&bodies);
        assert!(snapshot.hits[0].is_hitting);
    }

    #[test]
    fn no_tracked_body_degrades_to_no_signal() {
        let mut dispatcher = rigged_dispatcher();
        let before = dispatcher.dispatch(&[full_body((200.0, 200.0))]).distances[0];
        assert!(before > 0.0);

        let snapshot = dispatcher.dispatch(&[]);
        assert!(!snapshot.hits[0].is_hitting);
        assert!(!snapshot.proximities[0].intersecting);
        // Last-known-good values survive the empty tick.
        assert_eq!(snapshot.distances[0], before);
    }

    #[test]
    fn sinks_see_each_edge_event_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = rigged_dispatcher();
        dispatcher.add_sink(Box::new(RecordingSink { seen: seen.clone() }));

        // Hand outside everything, then inside the button region, held there.
        dispatcher.dispatch(&[full_body((200.0, 200.0))]);
        dispatcher.dispatch(&[full_body((40.0, 100.0))]);
        dispatcher.dispatch(&[full_body((40.0, 100.0))]);

        let events = seen.borrow();
        assert_eq!(
            events.as_slice(),
            &[InteractionEvent::RegionEntered {
                button: 0,
                joint: JointId::HandLeft
            }]
        );
    }

    #[test]
    fn proximity_events_carry_pair_index_and_contact() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = rigged_dispatcher();
        dispatcher.add_sink(Box::new(RecordingSink { seen: seen.clone() }));

        dispatcher.dispatch(&[full_body((200.0, 200.0))]);
        // Left hand lands on the left knee.
        dispatcher.dispatch(&[full_body((250.0, 420.0))]);

        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        match &events[0] {
            InteractionEvent::ProximityEntered {
                pair,
                joint,
                distance,
            } => {
                assert_eq!(*pair, 0);
                assert_eq!(*joint, JointId::KneeLeft);
                assert!(*distance <= 30.0);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn builds_the_default_rig_from_config() {
        let config = InteractConfig::live_defaults();
        let mut dispatcher = FrameDispatcher::from_config(&config).unwrap();
        let snapshot = dispatcher.dispatch(&[full_body((200.0, 200.0))]);

        assert_eq!(snapshot.hits.len(), 2);
        assert_eq!(snapshot.proximities.len(), 2);
        assert_eq!(snapshot.distances.len(), 1);
        assert_eq!(snapshot.volumes.len(), 1);
    }

    #[test]
    fn invalid_config_fails_before_any_tick() {
        let mut config = InteractConfig::live_defaults();
        config.intersections[0].threshold = 0.0;
        assert!(FrameDispatcher::from_config(&config).is_err());
    }
}
