use serde::{Deserialize, Serialize};

use crate::{InteractError, Result};

/// Two directions are treated as identical below this squared length.
const DEGENERATE_LENGTH_SQ: f32 = 1e-8;

/// A position in the projected screen space every detector operates in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Arithmetic mean of this point and another.
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// Signed angle in degrees of the vector `from → to` measured against the
/// horizontal axis, counter-clockwise positive.
///
/// The result lies in (-180, 180], with the unavoidable wrap at ±180 that
/// callers must treat as a valid jump. Returns `None` when the two points
/// coincide, since no direction exists.
pub fn signed_angle_degrees(from: Point, to: Point) -> Option<f32> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx * dx + dy * dy < DEGENERATE_LENGTH_SQ {
        return None;
    }
    Some(dy.atan2(dx).to_degrees())
}

/// Axis-aligned rectangular area in screen space.
///
/// Regions are configured once when a detector is built and never mutated;
/// the constructor rejects degenerate geometry so a running stream only ever
/// sees valid rectangles. Containment is inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(InteractError::invalid_config(
                "region coordinates must be finite",
            ));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(InteractError::invalid_config(format!(
                "region of {width}x{height} units is degenerate"
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}
