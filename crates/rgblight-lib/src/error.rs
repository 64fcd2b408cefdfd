//! Unified error type for the rgblight-lib crate.
//!
//! [`LightError`] covers the service-level failures (`RoleNotSupported`,
//! `ChannelUnavailable`) as well as configuration, color parsing and request
//! decoding. `From` impls allow `?` to propagate I/O and JSON errors.

use std::fmt;

use crate::state::Role;

/// Unified error type for rgblight-lib operations.
#[derive(Debug)]
pub enum LightError {
    /// The role is outside the controller's supported set. No write was made.
    RoleNotSupported(Role),
    /// One or more control attributes failed to open.
    ChannelUnavailable(String),
    /// Standard I/O error (config persistence, reading max brightness).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
    /// Malformed service request.
    Protocol(String),
}

impl fmt::Display for LightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightError::RoleNotSupported(role) => write!(f, "Light not supported: {role}"),
            LightError::ChannelUnavailable(e) => write!(f, "Channel unavailable: {e}"),
            LightError::Io(e) => write!(f, "I/O error: {e}"),
            LightError::Config(e) => write!(f, "Config error: {e}"),
            LightError::Color(e) => write!(f, "Color error: {e}"),
            LightError::Protocol(e) => write!(f, "Protocol error: {e}"),
        }
    }
}

impl std::error::Error for LightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LightError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LightError {
    fn from(e: std::io::Error) -> Self {
        LightError::Io(e)
    }
}

impl From<serde_json::Error> for LightError {
    fn from(e: serde_json::Error) -> Self {
        LightError::Protocol(e.to_string())
    }
}

/// Crate-level Result alias using [`LightError`].
pub type Result<T> = std::result::Result<T, LightError>;
