use serde::{Deserialize, Serialize};
use shared::domain::DirectionVector;

pub const DEFAULT_SPEED_SCALE: f64 = 0.5;

/// Quantized roll command for the actuator. Only [`CommandMapper`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActuatorCommand {
    speed: u8,
    heading: u16,
}

impl ActuatorCommand {
    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn heading(&self) -> u16 {
        self.heading
    }

    pub fn is_stop(&self) -> bool {
        self.speed == 0
    }
}

/// What to do with a heading that rounds to 360 degrees or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingPolicy {
    /// Reduce modulo 360.
    #[default]
    Wrap,
    /// Forward the rounded degree value unchanged.
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandMapper {
    speed_scale: f64,
    heading_policy: HeadingPolicy,
}

impl Default for CommandMapper {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_SCALE, HeadingPolicy::default())
    }
}

impl CommandMapper {
    /// `speed_scale` is the fraction of the full speed byte reached at
    /// magnitude 1; it is clamped to `[0, 1]`.
    pub fn new(speed_scale: f64, heading_policy: HeadingPolicy) -> Self {
        let speed_scale = if speed_scale.is_nan() {
            DEFAULT_SPEED_SCALE
        } else {
            speed_scale.clamp(0.0, 1.0)
        };
        Self {
            speed_scale,
            heading_policy,
        }
    }

    pub fn speed_scale(&self) -> f64 {
        self.speed_scale
    }

    pub fn heading_policy(&self) -> HeadingPolicy {
        self.heading_policy
    }

    pub fn to_command(&self, vector: DirectionVector) -> ActuatorCommand {
        // truncation: magnitude 1 at the default scale gives 127, not 128
        let speed = (vector.magnitude() * self.speed_scale * f64::from(u8::MAX))
            .trunc()
            .clamp(0.0, f64::from(u8::MAX)) as u8;

        let degrees = vector.angle().to_degrees().round();
        let heading = match self.heading_policy {
            HeadingPolicy::Wrap => degrees.rem_euclid(360.0) as u16,
            HeadingPolicy::PassThrough => degrees.clamp(0.0, f64::from(u16::MAX)) as u16,
        };

        ActuatorCommand { speed, heading }
    }
}

pub fn to_command(vector: DirectionVector) -> ActuatorCommand {
    CommandMapper::default().to_command(vector)
}

#[cfg(test)]
#[path = "tests/mapper_tests.rs"]
mod tests;
