use shared::domain::{Color, DirectionVector};
use tracing::debug;

use crate::sampler::MotionSampler;
use crate::touch::TouchTracker;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected_color: Option<Color>,
}

/// User actions that park the robot.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    selection: SelectionState,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_color(&self) -> Option<Color> {
        self.selection.selected_color
    }

    /// Store `color`, forget the last tilt reading and return a stop vector.
    pub fn select_color(&mut self, color: Color, sampler: &mut MotionSampler) -> DirectionVector {
        self.selection.selected_color = Some(color);
        sampler.reset();
        debug!(?color, "interaction: color selected");
        DirectionVector::STOP
    }

    pub fn release_touch(&mut self, tracker: &mut TouchTracker) -> DirectionVector {
        tracker.end();
        DirectionVector::STOP
    }
}
