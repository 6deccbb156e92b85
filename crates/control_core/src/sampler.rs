use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;

use shared::{
    domain::{DirectionVector, Point2D},
    error::SensorError,
};
use tracing::{debug, info};

use crate::geometry::distance;
use crate::MotionSensor;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_CHANGE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerPhase {
    Idle,
    Sampling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerState {
    pub last_vector: Point2D,
    pub threshold: f64,
}

/// Turns periodic tilt readings into direction vectors, suppressing changes
/// no larger than the threshold.
#[derive(Debug, Clone)]
pub struct MotionSampler {
    state: SamplerState,
    phase: SamplerPhase,
    interval: Duration,
}

impl Default for MotionSampler {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGE_THRESHOLD, DEFAULT_TICK_INTERVAL)
    }
}

impl MotionSampler {
    pub fn new(threshold: f64, interval: Duration) -> Self {
        Self {
            state: SamplerState {
                last_vector: Point2D::ORIGIN,
                threshold,
            },
            phase: SamplerPhase::Idle,
            interval,
        }
    }

    pub fn phase(&self) -> SamplerPhase {
        self.phase
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> &SamplerState {
        &self.state
    }

    /// Returns `Ok(true)` when this call moved the sampler out of Idle.
    pub fn start(&mut self, sensor: &dyn MotionSensor) -> Result<bool, SensorError> {
        if self.phase == SamplerPhase::Sampling {
            return Ok(false);
        }
        sensor.start_updates()?;
        self.phase = SamplerPhase::Sampling;
        info!(interval_ms = self.interval.as_millis() as u64, "motion: sampling started");
        Ok(true)
    }

    /// Returns `true` when this call moved the sampler back to Idle.
    pub fn stop(&mut self, sensor: &dyn MotionSensor) -> bool {
        if self.phase == SamplerPhase::Idle {
            return false;
        }
        sensor.stop_updates();
        self.phase = SamplerPhase::Idle;
        info!("motion: sampling stopped");
        true
    }

    pub fn tick(&mut self, sensor: &dyn MotionSensor) -> Option<DirectionVector> {
        if self.phase == SamplerPhase::Idle {
            return None;
        }
        let reading = sensor.current_tilt()?;
        self.sample(reading)
    }

    pub fn sample(&mut self, reading: Point2D) -> Option<DirectionVector> {
        let dist = distance(reading, self.state.last_vector);
        if dist <= self.state.threshold {
            return None;
        }

        debug!(x = reading.x, y = reading.y, dist, "motion: accepted reading");
        self.state.last_vector = reading;
        let magnitude = reading.x.hypot(reading.y);
        Some(DirectionVector::new(
            signed_angle(reading.x, reading.y),
            magnitude,
        ))
    }

    pub fn reset(&mut self) {
        self.state.last_vector = Point2D::ORIGIN;
    }
}

/// Quadrant-aware angle of `(x, y)` in `[0, 2π)` built on arcsine.
///
/// Points on the y axis short-circuit to π/2 or 3π/2; the left half is
/// mirrored through the origin and offset by π.
pub fn signed_angle(x: f64, y: f64) -> f64 {
    let r = (x * x + y * y).sqrt();
    if r == 0.0 {
        return 0.0;
    }

    if x == 0.0 {
        if y > 0.0 {
            return FRAC_PI_2;
        }
        return 3.0 * PI / 2.0;
    }

    let (y, offset) = if x < 0.0 { (-y, PI) } else { (y, 0.0) };

    let mut angle = (y / r).asin() + offset;
    if angle < 0.0 {
        angle += TAU;
    }
    // a tiny negative arcsine rounds up to a full turn
    if angle >= TAU {
        0.0
    } else {
        angle
    }
}

#[cfg(test)]
#[path = "tests/sampler_tests.rs"]
mod tests;
