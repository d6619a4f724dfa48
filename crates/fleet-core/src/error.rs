//! Unified error types for the fleet planning crates
//!
//! [`FleetError`] covers everything that can go wrong before or around a
//! solve: reading scenario files, parsing them, and validating the planning
//! data. Solver-specific failures live in `fleet-algo` and convert into this
//! type at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use fleet_core::{FleetError, FleetResult};
//!
//! fn check(path: &str) -> FleetResult<()> {
//!     let data = load_scenario(path)?;
//!     data.validate()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for fleet planning operations.
#[derive(Error, Debug)]
pub enum FleetError {
    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Planning data is incomplete or inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Solver/algorithm errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using FleetError.
pub type FleetResult<T> = Result<T, FleetError>;

impl From<anyhow::Error> for FleetError {
    fn from(err: anyhow::Error) -> Self {
        FleetError::Other(err.to_string())
    }
}

impl From<String> for FleetError {
    fn from(s: String) -> Self {
        FleetError::Other(s)
    }
}

impl From<&str> for FleetError {
    fn from(s: &str) -> Self {
        FleetError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for FleetError {
    fn from(err: serde_json::Error) -> Self {
        FleetError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FleetError::Config("missing spec for (Electric, S2)".into());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("(Electric, S2)"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FleetError = io_err.into();
        assert!(matches!(err, FleetError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FleetError = json_err.into();
        assert!(matches!(err, FleetError::Parse(_)));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> FleetResult<()> {
            Err(FleetError::Config("test".into()))
        }

        fn outer() -> FleetResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
