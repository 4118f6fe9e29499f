//! Error types for the window manager and its configuration.

use thiserror::Error;

use crate::window::WindowId;

/// Errors raised by registry and gesture operations.
///
/// None of these are user-visible: the host logs them and keeps the last
/// good snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WmError {
    #[error("window not found: {0}")]
    UnknownWindow(WindowId),

    #[error("duplicate window id in manifest: {0}")]
    DuplicateWindow(WindowId),

    #[error("windows {first} and {second} share z-index {z_index}")]
    DuplicateZIndex {
        first: WindowId,
        second: WindowId,
        z_index: u32,
    },

    #[error("manifest is empty")]
    EmptyManifest,

    #[error("window {0} is hidden")]
    WindowHidden(WindowId),
}

/// Result type alias for window manager operations.
pub type WmResult<T> = Result<T, WmError>;

/// Errors raised while validating command-line configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell {axis} must be between {min} and {max} pixels, got {value}")]
    CellMetric {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("fps must be between 1 and 240, got {0}")]
    Fps(f64),

    #[error("unknown log level: {0}")]
    LogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WmError::UnknownWindow(WindowId(42));
        assert_eq!(err.to_string(), "window not found: 42");

        let err = WmError::DuplicateZIndex {
            first: WindowId(1),
            second: WindowId(3),
            z_index: 7,
        };
        assert_eq!(err.to_string(), "windows 1 and 3 share z-index 7");

        let err = ConfigError::Fps(0.0);
        assert_eq!(err.to_string(), "fps must be between 1 and 240, got 0");
    }
}
