// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for pattern events and playback requests.

use crate::error::{Result, ValidationError};
use crate::time::{PlaybackDuration, MAX_DURATION_SECS};

/// Maximum number of characters in a pattern string.
pub const MAX_PATTERN_LENGTH: usize = 256;

/// Validate a raw pattern string and its intensity/sharpness.
///
/// Checks run in a fixed order and the first failure is returned:
/// emptiness, length, intensity, sharpness, alphabet.
pub fn validate_pattern(
    pattern: &str,
    allowed: &[char],
    intensity: f32,
    sharpness: f32,
) -> Result<()> {
    if pattern.is_empty() {
        return Err(ValidationError::EmptyPattern.into());
    }

    let length = pattern.chars().count();
    if length > MAX_PATTERN_LENGTH {
        return Err(ValidationError::PatternTooLong {
            max: MAX_PATTERN_LENGTH,
            actual: length,
        }
        .into());
    }

    if !is_unit_range(intensity) {
        return Err(ValidationError::IntensityOutOfRange(intensity).into());
    }

    if !is_unit_range(sharpness) {
        return Err(ValidationError::SharpnessOutOfRange(sharpness).into());
    }

    if let Some((position, character)) = pattern
        .chars()
        .enumerate()
        .find(|(_, c)| !allowed.contains(c))
    {
        return Err(ValidationError::InvalidPatternCharacters {
            character,
            position,
            allowed: allowed.iter().collect(),
        }
        .into());
    }

    Ok(())
}

/// Validate that a batch of events shares one pattern length.
///
/// Returns the common length.
pub fn validate_event_shapes<I>(lengths: I) -> Result<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut lengths = lengths.into_iter();
    let expected = lengths.next().ok_or(ValidationError::NoEvents)?;

    for (i, actual) in lengths.enumerate() {
        if actual != expected {
            return Err(ValidationError::PatternLengthMismatch {
                index: i + 1,
                expected,
                actual,
            }
            .into());
        }
    }

    Ok(expected)
}

/// Validate a playback duration and return it in seconds.
pub fn validate_duration(duration: PlaybackDuration) -> Result<f64> {
    let secs = duration.as_secs_f64();

    // NaN fails this comparison too
    if !(secs > 0.0) {
        return Err(ValidationError::DurationNotPositive(secs).into());
    }

    if secs > MAX_DURATION_SECS {
        return Err(ValidationError::DurationTooLong {
            max_secs: MAX_DURATION_SECS,
            requested_secs: secs,
        }
        .into());
    }

    Ok(secs)
}

fn is_unit_range(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}
