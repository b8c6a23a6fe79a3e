/// Convenience result type used across pitchline.
pub type PitchResult<T> = Result<T, PitchError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum PitchError {
    /// Required internal state was missing when an operation assumed it exists.
    ///
    /// Aborts the current operation; never degraded into a silent no-op.
    #[error("internal invariant violated: {0}")]
    Invariant(String),

    /// Host data disagrees with itself (frame rates, phoneme/frequency lengths).
    ///
    /// Abandons the current derivation pass; previously rendered state is kept.
    #[error("inconsistent data: {0}")]
    Inconsistent(String),

    /// Invalid caller-provided values (zoom, tempo map, frame rate).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing project snapshots.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PitchError {
    /// Build a [`PitchError::Invariant`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Build a [`PitchError::Inconsistent`] value.
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::Inconsistent(msg.into())
    }

    /// Build a [`PitchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PitchError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors that mean a derivation pass must be abandoned, not retried.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::Inconsistent(_) | Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
