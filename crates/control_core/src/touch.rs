use std::f64::consts::PI;

use shared::{
    domain::{DirectionVector, Point2D},
    error::GeometryError,
};
use tracing::debug;

use crate::geometry::{distance, interior_angle};

/// Frame of the circular control and the knob that tracks the finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGeometry {
    pub center: Point2D,
    pub diameter: f64,
    pub knob_diameter: f64,
}

impl ControlGeometry {
    pub fn new(center: Point2D, diameter: f64, knob_diameter: f64) -> Self {
        Self {
            center,
            diameter,
            knob_diameter,
        }
    }

    pub fn top(&self) -> Point2D {
        Point2D::new(self.center.x, self.center.y - self.track_radius())
    }

    pub fn bottom(&self) -> Point2D {
        Point2D::new(self.center.x, self.center.y + self.track_radius())
    }

    /// Distance from the center that maps to magnitude 1.
    pub fn track_radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Furthest the knob center can travel while staying inside the ring.
    pub fn max_radius(&self) -> f64 {
        ((self.diameter - self.knob_diameter) / 2.0).max(0.0)
    }

    /// Half-open containment test against the control's bounding square.
    pub fn frame_contains(&self, point: Point2D) -> bool {
        let half = self.track_radius();
        let (min_x, min_y) = (self.center.x - half, self.center.y - half);
        point.x >= min_x
            && point.x < min_x + self.diameter
            && point.y >= min_y
            && point.y < min_y + self.diameter
    }

    /// Knob position for a clockwise-from-up `angle` at `radius` from center.
    pub fn knob_position(&self, angle: f64, radius: f64) -> Point2D {
        Point2D::new(
            self.center.x + angle.sin() * radius,
            self.center.y - angle.cos() * radius,
        )
    }
}

/// Clockwise angle from "up" of `touch` around `center`, in screen
/// coordinates (y grows downward). Not normalized: a touch just left of
/// straight up resolves close to 2π.
pub fn resolve_angle(
    touch: Point2D,
    center: Point2D,
    top: Point2D,
    bottom: Point2D,
) -> Result<f64, GeometryError> {
    let right_half = touch.x >= center.x;
    let reference = if right_half { top } else { bottom };

    let theta = interior_angle(touch, reference, center)?;
    if right_half {
        Ok(theta)
    } else {
        Ok(theta + PI)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchUpdate {
    pub vector: DirectionVector,
    pub knob: Point2D,
}

pub fn touch_vector(geometry: &ControlGeometry, touch: Point2D) -> TouchUpdate {
    if !(touch.x.is_finite() && touch.y.is_finite()) {
        debug!(x = touch.x, y = touch.y, "touch: non-finite position; stopping");
        return TouchUpdate {
            vector: DirectionVector::STOP,
            knob: geometry.center,
        };
    }

    let angle = match resolve_angle(touch, geometry.center, geometry.top(), geometry.bottom()) {
        Ok(angle) => angle,
        Err(err) => {
            debug!(x = touch.x, y = touch.y, "touch: {err}; using angle 0");
            0.0
        }
    };

    let radius = geometry.max_radius().min(distance(touch, geometry.center));
    let magnitude = if geometry.track_radius() > 0.0 {
        radius / geometry.track_radius()
    } else {
        0.0
    };

    TouchUpdate {
        vector: DirectionVector::new(angle, magnitude),
        knob: geometry.knob_position(angle, radius),
    }
}

/// Tracks whether the active touch started inside the control.
#[derive(Debug, Clone)]
pub struct TouchTracker {
    geometry: ControlGeometry,
    touched_inside: bool,
}

impl TouchTracker {
    pub fn new(geometry: ControlGeometry) -> Self {
        Self {
            geometry,
            touched_inside: false,
        }
    }

    pub fn geometry(&self) -> &ControlGeometry {
        &self.geometry
    }

    pub fn is_active(&self) -> bool {
        self.touched_inside
    }

    /// Returns the knob position when the touch lands inside the frame.
    pub fn begin(&mut self, touch: Point2D) -> Option<Point2D> {
        if !self.geometry.frame_contains(touch) {
            return None;
        }
        self.touched_inside = true;
        Some(touch)
    }

    pub fn moved(&mut self, touch: Point2D) -> Option<TouchUpdate> {
        if !self.touched_inside {
            return None;
        }
        Some(touch_vector(&self.geometry, touch))
    }

    pub fn end(&mut self) {
        self.touched_inside = false;
    }
}

#[cfg(test)]
#[path = "tests/touch_tests.rs"]
mod tests;
