/// Convenience result type used across scrollstage.
pub type StageResult<T> = Result<T, StageError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only construction and configuration paths return these. Per-frame operations recover
/// locally and never surface an error.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// Invalid user-provided configuration or manifest data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A stage or binding references page content that is not present.
    #[error("missing target: {target}")]
    MissingTarget {
        /// Identifier of the absent element.
        target: String,
    },

    /// Geometry could not be resolved for a region.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    /// Build a [`StageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StageError::MissingTarget`] value.
    pub fn missing_target(target: impl Into<String>) -> Self {
        Self::MissingTarget {
            target: target.into(),
        }
    }

    /// Build a [`StageError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`StageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for faults that only cost a decorative animation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingTarget { .. } | Self::Geometry(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
