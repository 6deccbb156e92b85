use std::sync::Arc;

use shared::domain::DirectionVector;
use tokio::{
    sync::{
        broadcast::{self, error::RecvError},
        watch,
    },
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::{mapper::CommandMapper, ActuatorDriver, ControlEvent};

/// Forwards session output to the actuator until the session closes.
///
/// Vectors are read from the session's latest-value channel, so a slow
/// driver skips intermediate vectors but always receives the newest one,
/// including the stop sent on release. Colors come from the event stream;
/// a receiver that falls behind there skips to the newest events. Failed
/// driver calls are logged and dropped.
pub fn spawn_actuator_bridge(
    mut events: broadcast::Receiver<ControlEvent>,
    mut vectors: watch::Receiver<DirectionVector>,
    driver: Arc<dyn ActuatorDriver>,
    mapper: CommandMapper,
) -> JoinHandle<()> {
    let mut last_rolled = *vectors.borrow_and_update();
    tokio::spawn(async move {
        let mut vectors_open = true;
        loop {
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Ok(ControlEvent::ColorSelected(color)) => {
                        if let Err(err) = driver.set_color(color).await {
                            warn!("actuator: set color failed: {err:#}");
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "actuator: fell behind, dropped oldest events");
                    }
                    Err(RecvError::Closed) => break,
                },
                changed = vectors.changed(), if vectors_open => match changed {
                    Ok(()) => {
                        let vector = *vectors.borrow_and_update();
                        roll(driver.as_ref(), mapper, vector).await;
                        last_rolled = vector;
                    }
                    Err(_) => vectors_open = false,
                },
            }
        }

        // the session may close before the final vector was picked up
        let latest = *vectors.borrow();
        if latest != last_rolled {
            roll(driver.as_ref(), mapper, latest).await;
        }
        debug!("actuator: bridge closed");
    })
}

async fn roll(driver: &dyn ActuatorDriver, mapper: CommandMapper, vector: DirectionVector) {
    let command = mapper.to_command(vector);
    debug!(
        speed = command.speed(),
        heading = command.heading(),
        "actuator: roll"
    );
    if let Err(err) = driver.roll(command).await {
        warn!("actuator: roll failed: {err:#}");
    }
}

#[cfg(test)]
#[path = "tests/bridge_tests.rs"]
mod tests;
