use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{Color, DirectionVector, Point2D},
    error::SensorError,
};

pub mod bridge;
pub mod geometry;
pub mod interaction;
pub mod mapper;
pub mod sampler;
pub mod session;
pub mod touch;

pub use bridge::spawn_actuator_bridge;
pub use mapper::{to_command, ActuatorCommand, CommandMapper, HeadingPolicy};
pub use session::{ControlSession, SessionConfig, SessionError};
pub use touch::ControlGeometry;

/// Source of device tilt readings, each axis in `[-1, 1]`.
pub trait MotionSensor: Send + Sync {
    fn start_updates(&self) -> std::result::Result<(), SensorError>;
    fn stop_updates(&self);
    /// `None` until the sensor has produced its first reading.
    fn current_tilt(&self) -> Option<Point2D>;
}

pub struct MissingMotionSensor;

impl MotionSensor for MissingMotionSensor {
    fn start_updates(&self) -> std::result::Result<(), SensorError> {
        Err(SensorError::unavailable("no motion sensor on this device"))
    }

    fn stop_updates(&self) {}

    fn current_tilt(&self) -> Option<Point2D> {
        None
    }
}

/// Transport to the robot. Implementations own the wire protocol and
/// connection handling.
#[async_trait]
pub trait ActuatorDriver: Send + Sync {
    async fn roll(&self, command: ActuatorCommand) -> Result<()>;
    async fn set_color(&self, color: Color) -> Result<()>;
}

pub struct DisconnectedActuator;

#[async_trait]
impl ActuatorDriver for DisconnectedActuator {
    async fn roll(&self, _command: ActuatorCommand) -> Result<()> {
        Err(anyhow!("no robot connected"))
    }

    async fn set_color(&self, _color: Color) -> Result<()> {
        Err(anyhow!("no robot connected"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    VectorChanged(DirectionVector),
    /// `None` re-centres the knob.
    KnobMoved(Option<Point2D>),
    ColorSelected(Color),
    MotionStarted,
    MotionStopped,
}
