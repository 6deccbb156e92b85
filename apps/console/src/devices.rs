//! Stand-ins for the motion hardware and the robot link.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use anyhow::Result;
use async_trait::async_trait;
use control_core::{ActuatorCommand, ActuatorDriver, MotionSensor};
use serde_json::json;
use shared::{
    domain::{Color, Point2D},
    error::SensorError,
};

/// Motion sensor fed by script steps instead of hardware.
pub struct ScriptedSensor {
    available: AtomicBool,
    updating: AtomicBool,
    tilt: Mutex<Option<Point2D>>,
}

impl Default for ScriptedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSensor {
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            updating: AtomicBool::new(false),
            tilt: Mutex::new(None),
        }
    }

    pub fn set_tilt(&self, tilt: Point2D) {
        *self.reading() = Some(tilt);
    }

    /// Simulates losing the sensor: readings stop and restarts fail.
    pub fn lose(&self) {
        self.available.store(false, Ordering::SeqCst);
        *self.reading() = None;
    }

    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::SeqCst)
    }

    fn reading(&self) -> MutexGuard<'_, Option<Point2D>> {
        self.tilt.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MotionSensor for ScriptedSensor {
    fn start_updates(&self) -> std::result::Result<(), SensorError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(SensorError::unavailable("scripted sensor was lost"));
        }
        self.updating.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop_updates(&self) {
        self.updating.store(false, Ordering::SeqCst);
    }

    fn current_tilt(&self) -> Option<Point2D> {
        if !self.is_updating() {
            return None;
        }
        *self.reading()
    }
}

/// Prints every actuator call as one JSON line on stdout.
pub struct StdoutActuator;

#[async_trait]
impl ActuatorDriver for StdoutActuator {
    async fn roll(&self, command: ActuatorCommand) -> Result<()> {
        println!("{}", json!({ "roll": command }));
        Ok(())
    }

    async fn set_color(&self, color: Color) -> Result<()> {
        println!("{}", json!({ "color": color.to_rgb8() }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_only_flow_while_updating() {
        let sensor = ScriptedSensor::new();
        sensor.set_tilt(Point2D::new(0.2, -0.1));
        assert_eq!(sensor.current_tilt(), None);

        sensor.start_updates().expect("start");
        assert_eq!(sensor.current_tilt(), Some(Point2D::new(0.2, -0.1)));

        sensor.stop_updates();
        assert_eq!(sensor.current_tilt(), None);
    }

    #[test]
    fn poisoned_lock_still_accepts_readings() {
        let sensor = std::sync::Arc::new(ScriptedSensor::new());
        let holder = sensor.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.tilt.lock().expect("lock");
            panic!("reader died holding the lock");
        })
        .join();
        assert!(sensor.tilt.is_poisoned());

        sensor.start_updates().expect("start");
        sensor.set_tilt(Point2D::new(0.4, 0.1));
        assert_eq!(sensor.current_tilt(), Some(Point2D::new(0.4, 0.1)));
    }

    #[test]
    fn lost_sensor_refuses_to_start() {
        let sensor = ScriptedSensor::new();
        sensor.lose();
        assert!(matches!(
            sensor.start_updates(),
            Err(SensorError::Unavailable { .. })
        ));
        assert!(!sensor.is_updating());
    }
}
