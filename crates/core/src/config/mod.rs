use serde::{Deserialize, Serialize};

use crate::geometry::Region;
use crate::skeleton::JointId;
use crate::volume::Hand;
use crate::Result;

/// Default proximity threshold in projected-space units, roughly a hand's
/// width at the default 640x480 frame size.
pub const DEFAULT_PROXIMITY_THRESHOLD: f32 = 30.0;

fn default_threshold() -> f32 {
    DEFAULT_PROXIMITY_THRESHOLD
}

/// Geometry of a button region, as written in configuration files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegionConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RegionConfig {
    /// Converts into a validated [`Region`].
    pub fn to_region(&self) -> Result<Region> {
        Region::new(self.x, self.y, self.width, self.height)
    }
}

/// One button: a region plus the ordered candidate joints tested against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonConfig {
    pub region: RegionConfig,
    pub joints: Vec<JointId>,
}

/// One proximity pairing: a primary joint watched against reference joints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntersectionConfig {
    pub primary: JointId,
    pub references: Vec<JointId>,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

/// One running distance measurement between two joints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DistancePairConfig {
    pub first: JointId,
    pub second: JointId,
}

/// One hand-volume analyzer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VolumeConfig {
    #[serde(default)]
    pub dominant: Hand,
}

/// Construction-time description of a full detector rig.
///
/// A config is plain data; nothing is validated until a dispatcher is built
/// from it, at which point every detector's constructor runs and the first
/// invalid entry fails the whole build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractConfig {
    #[serde(default)]
    pub buttons: Vec<ButtonConfig>,
    #[serde(default)]
    pub intersections: Vec<IntersectionConfig>,
    #[serde(default)]
    pub distances: Vec<DistancePairConfig>,
    #[serde(default)]
    pub volumes: Vec<VolumeConfig>,
}

impl InteractConfig {
    /// The default live rig, sized for a 640x480 projected frame: a button
    /// along each vertical screen edge, each hand watched against both
    /// knees, a hand-to-hand distance meter, and one right-dominant volume
    /// analyzer.
    pub fn live_defaults() -> Self {
        Self {
            buttons: vec![
                ButtonConfig {
                    region: RegionConfig {
                        x: 0.0,
                        y: 0.0,
                        width: 80.0,
                        height: 480.0,
                    },
                    joints: vec![JointId::HandLeft, JointId::HandRight],
                },
                ButtonConfig {
                    region: RegionConfig {
                        x: 560.0,
                        y: 0.0,
                        width: 80.0,
                        height: 480.0,
                    },
                    joints: vec![JointId::HandRight, JointId::HandLeft],
                },
            ],
            intersections: vec![
                IntersectionConfig {
                    primary: JointId::HandLeft,
                    references: vec![JointId::KneeLeft, JointId::KneeRight],
                    threshold: DEFAULT_PROXIMITY_THRESHOLD,
                },
                IntersectionConfig {
                    primary: JointId::HandRight,
                    references: vec![JointId::KneeLeft, JointId::KneeRight],
                    threshold: DEFAULT_PROXIMITY_THRESHOLD,
                },
            ],
            distances: vec![DistancePairConfig {
                first: JointId::HandLeft,
                second: JointId::HandRight,
            }],
            volumes: vec![VolumeConfig {
                dominant: Hand::Right,
            }],
        }
    }

    /// Decodes a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
