// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pattern events and their compilers.
//!
//! A pattern is a short string where every character stands for one equal
//! slice of the playback duration:
//!
//! | Kind | Alphabet | Active symbol | Compiles to |
//! |------|----------|---------------|-------------|
//! | [`BuzzEvent`] | `_` `-` | `-` | one continuous vibration per run of `-` |
//! | [`BeatEvent`] | `_` `|` | `|` | one pulse per `|` |
//!
//! For a 10-character buzz `"---___----"` played over one second, the
//! result is a 0.3 s vibration, 0.3 s of silence, then a 0.4 s vibration.
//!
//! Events are validated when they are built and are immutable afterwards.

pub mod beat;
pub mod buzz;

pub use beat::BeatEvent;
pub use buzz::BuzzEvent;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::plan::TimedSegment;
use crate::time::PlaybackDuration;

/// Kind of pattern event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Sustained vibration pattern
    Buzz,
    /// Pulse pattern
    Beat,
}

impl PatternKind {
    /// Characters allowed in a pattern of this kind.
    pub fn alphabet(&self) -> &'static [char] {
        match self {
            PatternKind::Buzz => buzz::ALPHABET,
            PatternKind::Beat => beat::ALPHABET,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Buzz => write!(f, "buzz"),
            PatternKind::Beat => write!(f, "beat"),
        }
    }
}

impl FromStr for PatternKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "buzz" => Ok(PatternKind::Buzz),
            "beat" => Ok(PatternKind::Beat),
            other => Err(Error::Parse(format!(
                "unknown pattern kind '{other}' (expected 'buzz' or 'beat')"
            ))),
        }
    }
}

/// A validated pattern event.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PatternEvent {
    /// Sustained vibration pattern (`_` `-`)
    Buzz(BuzzEvent),
    /// Pulse pattern (`_` `|`)
    Beat(BeatEvent),
}

impl PatternEvent {
    /// Build a validated event of the given kind.
    pub fn new(kind: PatternKind, pattern: &str, intensity: f32, sharpness: f32) -> Result<Self> {
        match kind {
            PatternKind::Buzz => BuzzEvent::new(pattern, intensity, sharpness).map(Self::Buzz),
            PatternKind::Beat => BeatEvent::new(pattern, intensity, sharpness).map(Self::Beat),
        }
    }

    /// Build a validated buzz event.
    pub fn buzz(pattern: &str, intensity: f32, sharpness: f32) -> Result<Self> {
        Self::new(PatternKind::Buzz, pattern, intensity, sharpness)
    }

    /// Build a validated beat event.
    pub fn beat(pattern: &str, intensity: f32, sharpness: f32) -> Result<Self> {
        Self::new(PatternKind::Beat, pattern, intensity, sharpness)
    }

    /// Parse a textual event spec: `KIND:PATTERN[:INTENSITY[:SHARPNESS]]`.
    ///
    /// Missing intensity or sharpness fall back to the given defaults. In
    /// buzz patterns a long dash (as inserted by smart punctuation) is read
    /// as `-`.
    pub fn parse_spec(spec: &str, default_intensity: f32, default_sharpness: f32) -> Result<Self> {
        let mut parts = spec.splitn(4, ':');

        let kind: PatternKind = parts.next().unwrap_or_default().parse()?;
        let pattern = parts
            .next()
            .ok_or_else(|| Error::Parse(format!("event spec '{spec}' has no pattern")))?;
        let intensity = parse_unit(parts.next(), default_intensity, "intensity")?;
        let sharpness = parse_unit(parts.next(), default_sharpness, "sharpness")?;

        let pattern = match kind {
            PatternKind::Buzz => pattern.replace('\u{2014}', "-"),
            PatternKind::Beat => pattern.to_string(),
        };

        Self::new(kind, &pattern, intensity, sharpness)
    }

    /// Kind of this event.
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Buzz(_) => PatternKind::Buzz,
            Self::Beat(_) => PatternKind::Beat,
        }
    }

    /// The pattern string as given.
    pub fn raw_pattern(&self) -> &str {
        match self {
            Self::Buzz(e) => e.raw_pattern(),
            Self::Beat(e) => e.raw_pattern(),
        }
    }

    /// Vibration strength in [0, 1].
    pub fn intensity(&self) -> f32 {
        match self {
            Self::Buzz(e) => e.intensity(),
            Self::Beat(e) => e.intensity(),
        }
    }

    /// Vibration sharpness in [0, 1].
    pub fn sharpness(&self) -> f32 {
        match self {
            Self::Buzz(e) => e.sharpness(),
            Self::Beat(e) => e.sharpness(),
        }
    }

    /// Number of sub-intervals (pattern characters).
    pub fn len(&self) -> usize {
        match self {
            Self::Buzz(e) => e.len(),
            Self::Beat(e) => e.len(),
        }
    }

    /// Always false for a constructed event; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compile this event into timed segments over `duration`.
    pub fn compile(&self, duration: PlaybackDuration) -> Vec<TimedSegment> {
        match self {
            Self::Buzz(e) => e.compile(duration),
            Self::Beat(e) => e.compile(duration),
        }
    }
}

impl From<BuzzEvent> for PatternEvent {
    fn from(e: BuzzEvent) -> Self {
        Self::Buzz(e)
    }
}

impl From<BeatEvent> for PatternEvent {
    fn from(e: BeatEvent) -> Self {
        Self::Beat(e)
    }
}

impl fmt::Display for PatternEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.kind(),
            self.raw_pattern(),
            self.intensity(),
            self.sharpness()
        )
    }
}

fn parse_unit(value: Option<&str>, default: f32, field: &str) -> Result<f32> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse::<f32>()
            .map_err(|e| Error::Parse(format!("invalid {field} '{v}': {e}"))),
    }
}

/// Width of one sub-interval, or `None` when there is nothing to compile.
pub(crate) fn unit_secs(duration: PlaybackDuration, length: usize) -> Option<f64> {
    let secs = duration.as_secs_f64();
    if secs == 0.0 || length == 0 {
        return None;
    }
    Some(secs / length as f64)
}
