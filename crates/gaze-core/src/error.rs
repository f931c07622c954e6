//! Crate-level error types.

use std::fmt;

/// Errors produced by the gaze crate.
#[derive(Debug)]
pub enum FaceError {
    /// A blink interval must be strictly positive.
    InvalidBlinkInterval(f32),
    /// Preset or config JSON failed to parse or serialize.
    Config(serde_json::Error),
}

impl fmt::Display for FaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlinkInterval(value) => {
                write!(f, "blink interval must be > 0, got {value}")
            }
            Self::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl std::error::Error for FaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::InvalidBlinkInterval(_) => None,
        }
    }
}

impl From<serde_json::Error> for FaceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}
