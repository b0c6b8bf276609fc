//! Error types
//!
//! Probe-level faults never leave a probe: they are collapsed to "signal not
//! fired" at the probe boundary. Only an evaluator-level fault reaches the
//! caller, and the bridge wraps it in the `SECURITY_CHECK_ERROR` rejection.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fault raised by an ambient-state provider while a probe is running
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("{0} is not available on this device")]
    Unavailable(String),

    #[error("could not parse {what} from {raw:?}")]
    Parse { what: String, raw: String },
}

impl ProbeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProbeError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn unavailable(what: impl Into<String>) -> Self {
        ProbeError::Unavailable(what.into())
    }
}

/// Unrecoverable fault during an evaluation pass
#[derive(Debug, Error)]
pub enum SecurityCheckError {
    #[error("evaluation aborted: {message}")]
    Aborted { message: String },
}

/// Rejection handed to the host application
#[derive(Debug, Error)]
#[error("Error performing security checks: {source}")]
pub struct BridgeError {
    #[source]
    source: SecurityCheckError,
}

impl BridgeError {
    pub const CODE: &'static str = "SECURITY_CHECK_ERROR";

    pub fn code(&self) -> &'static str {
        Self::CODE
    }

    pub fn cause(&self) -> &SecurityCheckError {
        &self.source
    }
}

impl From<SecurityCheckError> for BridgeError {
    fn from(source: SecurityCheckError) -> Self {
        BridgeError { source }
    }
}

/// Configuration file could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_bridge_error_message_and_code() {
        let err = BridgeError::from(SecurityCheckError::Aborted {
            message: "probe exploded".to_string(),
        });
        assert_eq!(err.code(), "SECURITY_CHECK_ERROR");
        assert_eq!(
            err.to_string(),
            "Error performing security checks: evaluation aborted: probe exploded"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_timeout_display() {
        let err = ProbeError::Timeout {
            program: "which".to_string(),
            timeout: Duration::from_millis(250),
        };
        assert!(err.to_string().contains("which"));
        assert!(err.to_string().contains("250ms"));
    }
}
