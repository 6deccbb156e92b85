use std::{sync::Arc, time::Duration};

use shared::{
    domain::{color_well, Color, DirectionVector, Point2D},
    error::SensorError,
    protocol::ControlRequest,
};
use thiserror::Error;
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    interaction::InteractionState,
    sampler::{MotionSampler, DEFAULT_CHANGE_THRESHOLD, DEFAULT_TICK_INTERVAL},
    touch::{ControlGeometry, TouchTracker},
    ControlEvent, MotionSensor,
};

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub geometry: ControlGeometry,
    pub tick_interval: Duration,
    pub change_threshold: f64,
    pub command_capacity: usize,
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            geometry: ControlGeometry::new(Point2D::new(180.0, 180.0), 300.0, 65.0),
            tick_interval: DEFAULT_TICK_INTERVAL,
            change_threshold: DEFAULT_CHANGE_THRESHOLD,
            command_capacity: 32,
            event_capacity: 64,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("control session is closed")]
    Closed,
    #[error(transparent)]
    Sensor(#[from] SensorError),
    #[error("no color well at index {0}")]
    UnknownColorWell(usize),
}

enum SessionCommand {
    TouchBegan(Point2D),
    TouchMoved(Point2D),
    TouchEnded,
    SelectColor(Color),
    StartMotion(oneshot::Sender<Result<(), SensorError>>),
    StopMotion(oneshot::Sender<()>),
}

/// Handle to the task that owns all control state.
///
/// Touch input and motion ticks are applied one at a time in arrival order.
/// Subscribers that fall behind lose the oldest events; producers never wait
/// on them. The most recent vector is also kept on a latest-value channel
/// that no amount of lag can evict.
pub struct ControlSession {
    commands: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<ControlEvent>,
    vectors: watch::Receiver<DirectionVector>,
    task: JoinHandle<()>,
}

impl ControlSession {
    pub fn spawn(config: SessionConfig, sensor: Arc<dyn MotionSensor>) -> Self {
        let (commands, command_rx) = mpsc::channel(config.command_capacity.max(1));
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let (vector_tx, vectors) = watch::channel(DirectionVector::STOP);
        let actor = SessionActor {
            sensor,
            tracker: TouchTracker::new(config.geometry),
            sampler: MotionSampler::new(
                config.change_threshold,
                config.tick_interval.max(MIN_TICK_INTERVAL),
            ),
            interaction: InteractionState::new(),
            events: events.clone(),
            vectors: vector_tx,
            ticker: None,
        };
        let task = tokio::spawn(actor.run(command_rx));
        Self {
            commands,
            events,
            vectors,
            task,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControlEvent> {
        self.events.subscribe()
    }

    /// The newest vector the session produced, starting at `STOP`.
    pub fn latest_vector(&self) -> watch::Receiver<DirectionVector> {
        self.vectors.clone()
    }

    pub async fn touch_began(&self, point: Point2D) -> Result<(), SessionError> {
        self.send(SessionCommand::TouchBegan(point)).await
    }

    pub async fn touch_moved(&self, point: Point2D) -> Result<(), SessionError> {
        self.send(SessionCommand::TouchMoved(point)).await
    }

    pub async fn touch_ended(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::TouchEnded).await
    }

    pub async fn select_color(&self, color: Color) -> Result<(), SessionError> {
        self.send(SessionCommand::SelectColor(color)).await
    }

    /// Begins periodic sampling. Fails when the sensor cannot start; the
    /// session then stays idle.
    pub async fn start_motion(&self) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::StartMotion(reply)).await?;
        response.await.map_err(|_| SessionError::Closed)??;
        Ok(())
    }

    pub async fn stop_motion(&self) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(SessionCommand::StopMotion(reply)).await?;
        response.await.map_err(|_| SessionError::Closed)
    }

    pub async fn apply(&self, request: ControlRequest) -> Result<(), SessionError> {
        match request {
            ControlRequest::TouchBegan { x, y } => self.touch_began(Point2D::new(x, y)).await,
            ControlRequest::TouchMoved { x, y } => self.touch_moved(Point2D::new(x, y)).await,
            ControlRequest::TouchEnded => self.touch_ended().await,
            ControlRequest::SelectColor { well } => {
                let color = color_well(well).ok_or(SessionError::UnknownColorWell(well))?;
                self.select_color(color).await
            }
            ControlRequest::StartMotion => self.start_motion().await,
            ControlRequest::StopMotion => self.stop_motion().await,
        }
    }

    /// Stops sampling and waits for the session task to finish.
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(err) = task.await {
            warn!("session: task ended abnormally: {err}");
        }
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

struct SessionActor {
    sensor: Arc<dyn MotionSensor>,
    tracker: TouchTracker,
    sampler: MotionSampler,
    interaction: InteractionState,
    events: broadcast::Sender<ControlEvent>,
    vectors: watch::Sender<DirectionVector>,
    ticker: Option<Interval>,
}

impl SessionActor {
    async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) {
        info!("session: started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = next_tick(&mut self.ticker) => self.on_tick(),
            }
        }
        self.sampler.stop(self.sensor.as_ref());
        info!("session: stopped");
    }

    fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::TouchBegan(point) => match self.tracker.begin(point) {
                Some(knob) => self.emit(ControlEvent::KnobMoved(Some(knob))),
                None => debug!(x = point.x, y = point.y, "session: touch outside control"),
            },
            SessionCommand::TouchMoved(point) => {
                if let Some(update) = self.tracker.moved(point) {
                    self.emit(ControlEvent::VectorChanged(update.vector));
                    self.emit(ControlEvent::KnobMoved(Some(update.knob)));
                }
            }
            SessionCommand::TouchEnded => {
                let vector = self.interaction.release_touch(&mut self.tracker);
                self.emit(ControlEvent::VectorChanged(vector));
                self.emit(ControlEvent::KnobMoved(None));
            }
            SessionCommand::SelectColor(color) => {
                let vector = self.interaction.select_color(color, &mut self.sampler);
                self.emit(ControlEvent::ColorSelected(color));
                self.emit(ControlEvent::VectorChanged(vector));
            }
            SessionCommand::StartMotion(reply) => {
                let result = match self.sampler.start(self.sensor.as_ref()) {
                    Ok(started) => {
                        if started {
                            self.ticker = Some(motion_ticker(self.sampler.interval()));
                            self.emit(ControlEvent::MotionStarted);
                        }
                        Ok(())
                    }
                    Err(err) => {
                        warn!("session: {err}");
                        Err(err)
                    }
                };
                let _ = reply.send(result);
            }
            SessionCommand::StopMotion(reply) => {
                if self.sampler.stop(self.sensor.as_ref()) {
                    self.ticker = None;
                    self.emit(ControlEvent::MotionStopped);
                }
                let _ = reply.send(());
            }
        }
    }

    fn on_tick(&mut self) {
        let Some(vector) = self.sampler.tick(self.sensor.as_ref()) else {
            return;
        };
        let geometry = self.tracker.geometry();
        let knob = geometry.knob_position(vector.angle(), vector.magnitude() * geometry.track_radius());
        self.emit(ControlEvent::VectorChanged(vector));
        self.emit(ControlEvent::KnobMoved(Some(knob)));
    }

    fn emit(&self, event: ControlEvent) {
        if let ControlEvent::VectorChanged(vector) = event {
            self.vectors.send_replace(vector);
        }
        // no subscribers is not an error
        let _ = self.events.send(event);
    }
}

fn motion_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
