// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Playback duration.
//!
//! A [`PlaybackDuration`] is the total time a batch of pattern events is
//! stretched over. It can be given in seconds or milliseconds; everything
//! downstream works in seconds via [`PlaybackDuration::as_secs_f64`].
//!
//! Range checks (`0 < d <= 3600 s`) are the planner's job, not this type's:
//! a duration can be built from any value so that the planner can report
//! the precise validation error.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Maximum supported playback duration in seconds.
pub const MAX_DURATION_SECS: f64 = 3600.0;

/// Requested playback duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackDuration {
    /// Duration in seconds
    Seconds(f64),
    /// Duration in milliseconds
    Milliseconds(f64),
}

impl PlaybackDuration {
    /// Duration in seconds.
    pub fn seconds(secs: f64) -> Self {
        Self::Seconds(secs)
    }

    /// Duration in milliseconds.
    pub fn milliseconds(ms: f64) -> Self {
        Self::Milliseconds(ms)
    }

    /// Normalized value in seconds.
    pub fn as_secs_f64(&self) -> f64 {
        match self {
            Self::Seconds(s) => *s,
            Self::Milliseconds(ms) => ms / 1000.0,
        }
    }

    /// Normalized value in milliseconds.
    pub fn as_millis_f64(&self) -> f64 {
        match self {
            Self::Seconds(s) => s * 1000.0,
            Self::Milliseconds(ms) => *ms,
        }
    }
}

impl fmt::Display for PlaybackDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(s) => write!(f, "{}s", s),
            Self::Milliseconds(ms) => write!(f, "{}ms", ms),
        }
    }
}

/// Parses `"1.5s"`, `"250ms"`, or a bare number of seconds.
impl FromStr for PlaybackDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |num: &str| {
            num.trim()
                .parse::<f64>()
                .map_err(|e| Error::Parse(format!("invalid duration '{s}': {e}")))
        };

        if let Some(num) = s.strip_suffix("ms") {
            Ok(Self::Milliseconds(parse(num)?))
        } else if let Some(num) = s.strip_suffix('s') {
            Ok(Self::Seconds(parse(num)?))
        } else {
            Ok(Self::Seconds(parse(s)?))
        }
    }
}
