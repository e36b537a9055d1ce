//! Error types for vehicle construction and stepping.

use thiserror::Error;

/// Coarse classification of an [`AsvError`], useful when the caller only
/// needs to branch on the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSpecification,
    InvalidGeometry,
    InvalidThrust,
    InvalidState,
    NotInitialized,
    FatalConfiguration,
}

/// Errors raised by the simulation core.
///
/// Every variant carries a human-readable message. Construction errors leave no
/// object behind; a `FatalConfiguration` raised while stepping invalidates the
/// vehicle for any further `advance`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AsvError {
    #[error("Invalid specification: {what}")]
    InvalidSpecification { what: String },

    #[error("Invalid actuator geometry: {what}")]
    InvalidGeometry { what: String },

    #[error("Invalid thrust: {what}")]
    InvalidThrust { what: String },

    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    #[error("Not initialized: {what}")]
    NotInitialized { what: String },

    #[error("Fatal configuration: {what}")]
    FatalConfiguration { what: String },
}

pub type AsvResult<T> = Result<T, AsvError>;

impl AsvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AsvError::InvalidSpecification { .. } => ErrorKind::InvalidSpecification,
            AsvError::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            AsvError::InvalidThrust { .. } => ErrorKind::InvalidThrust,
            AsvError::InvalidState { .. } => ErrorKind::InvalidState,
            AsvError::NotInitialized { .. } => ErrorKind::NotInitialized,
            AsvError::FatalConfiguration { .. } => ErrorKind::FatalConfiguration,
        }
    }

    pub(crate) fn specification(what: impl Into<String>) -> Self {
        AsvError::InvalidSpecification { what: what.into() }
    }

    pub(crate) fn geometry(what: impl Into<String>) -> Self {
        AsvError::InvalidGeometry { what: what.into() }
    }

    pub(crate) fn thrust(what: impl Into<String>) -> Self {
        AsvError::InvalidThrust { what: what.into() }
    }

    pub(crate) fn state(what: impl Into<String>) -> Self {
        AsvError::InvalidState { what: what.into() }
    }

    pub(crate) fn not_initialized(what: impl Into<String>) -> Self {
        AsvError::NotInitialized { what: what.into() }
    }

    pub(crate) fn fatal(what: impl Into<String>) -> Self {
        AsvError::FatalConfiguration { what: what.into() }
    }
}
