//! Error types for the party guests core engine

#[cfg(feature = "python")]
use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
#[cfg(feature = "python")]
use pyo3::PyErr;
use thiserror::Error;

/// Main error type for the party guests core engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuestEffectError {
    #[error("Malformed range segment '{segment}': {reason}")]
    MalformedRange { segment: String, reason: String },

    #[error("Malformed effect descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("Invalid drop chance: {0}")]
    InvalidChance(String),

    #[error("Unknown recovery target: {0}")]
    UnknownTarget(String),

    #[error("Item not found: {0}")]
    ItemNotFound(i32),

    #[error("Actor not found: {0}")]
    ActorNotFound(i32),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Config not initialized. Call init_config() first.")]
    ConfigNotInitialized,
}

impl GuestEffectError {
    pub(crate) fn malformed_range(segment: &str, reason: impl Into<String>) -> Self {
        GuestEffectError::MalformedRange {
            segment: segment.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GuestEffectError {
    fn from(err: serde_json::Error) -> Self {
        GuestEffectError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<GuestEffectError> for PyErr {
    fn from(err: GuestEffectError) -> PyErr {
        match err {
            GuestEffectError::ItemNotFound(_) | GuestEffectError::ActorNotFound(_) => {
                PyKeyError::new_err(err.to_string())
            }
            GuestEffectError::ConfigNotInitialized => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the party guests core engine
pub type Result<T> = std::result::Result<T, GuestEffectError>;
