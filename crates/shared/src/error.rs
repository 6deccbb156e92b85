use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Two triangle vertices coincide, so the law of cosines divides by zero.
    #[error("degenerate triangle: coincident vertices")]
    DegenerateTriangle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("motion sensor unavailable: {reason}")]
    Unavailable { reason: String },
}

impl SensorError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
