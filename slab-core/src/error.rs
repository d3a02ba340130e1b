use thiserror::Error;

/// Failure kinds reported by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// Non-positive or non-finite geometry/time parameters, or a grid with fewer than two points.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Mesh ratio `r = a * tau / h^2` above the explicit scheme's limit.
    #[error("unstable configuration: mesh ratio r = {ratio} exceeds {limit}")]
    Unstable { ratio: f64, limit: f64 },

    /// Caller-supplied output buffer cannot hold `2N` values.
    #[error("output buffer too small: need {required} values, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },
}

impl SolverError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SolverError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
