// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for pattern compilation and playback.

use std::fmt;

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Config(String),
    /// Pattern, event, or duration validation error
    Validation(ValidationError),
    /// Failure reported by the haptic sink
    Sink(SinkError),
    /// Malformed textual input (event specs, durations)
    Parse(String),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Sink(e) => write!(f, "Sink error: {}", e),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Sink(e) => Some(e),
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<SinkError> for Error {
    fn from(e: SinkError) -> Self {
        Error::Sink(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Errors reported by the haptic sink, tagged with the phase that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Capability probe failed
    HapticsUnsupported,
    /// Engine could not be created or started
    EngineUnavailable(String),
    /// Engine rejected the compiled plan
    PatternRejected(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::HapticsUnsupported => write!(f, "Haptics are not supported on this device"),
            SinkError::EngineUnavailable(msg) => write!(f, "Haptic engine unavailable: {}", msg),
            SinkError::PatternRejected(msg) => write!(f, "Pattern rejected by engine: {}", msg),
        }
    }
}

impl std::error::Error for SinkError {}

/// Validation errors. All are detected before the sink is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Pattern string is empty
    EmptyPattern,
    /// Pattern string exceeds the supported length
    PatternTooLong { max: usize, actual: usize },
    /// Intensity outside [0, 1]
    IntensityOutOfRange(f32),
    /// Sharpness outside [0, 1]
    SharpnessOutOfRange(f32),
    /// Pattern contains a character outside its alphabet
    InvalidPatternCharacters {
        character: char,
        position: usize,
        allowed: String,
    },
    /// No events were given to play
    NoEvents,
    /// Events in one batch have different pattern lengths
    PatternLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    /// Duration is zero, negative, or NaN
    DurationNotPositive(f64),
    /// Duration exceeds the supported maximum
    DurationTooLong { max_secs: f64, requested_secs: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPattern => write!(f, "Pattern string is empty"),
            ValidationError::PatternTooLong { max, actual } => {
                write!(
                    f,
                    "Pattern string should be at most {} characters, got {}",
                    max, actual
                )
            }
            ValidationError::IntensityOutOfRange(v) => {
                write!(f, "Intensity {} is outside [0, 1]", v)
            }
            ValidationError::SharpnessOutOfRange(v) => {
                write!(f, "Sharpness {} is outside [0, 1]", v)
            }
            ValidationError::InvalidPatternCharacters {
                character,
                position,
                allowed,
            } => {
                write!(
                    f,
                    "Pattern string has invalid character {:?} at position {} (allowed: \"{}\")",
                    character, position, allowed
                )
            }
            ValidationError::NoEvents => write!(f, "Event list is empty"),
            ValidationError::PatternLengthMismatch {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Pattern length does not match: event {} has length {}, expected {}",
                    index, actual, expected
                )
            }
            ValidationError::DurationNotPositive(secs) => {
                write!(f, "Duration should be over zero, got {}s", secs)
            }
            ValidationError::DurationTooLong {
                max_secs,
                requested_secs,
            } => {
                write!(
                    f,
                    "Duration should be at most {}s, got {}s",
                    max_secs, requested_secs
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
