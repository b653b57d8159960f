// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pulse patterns.

use tracing::debug;

use crate::error::Result;
use crate::plan::TimedSegment;
use crate::time::PlaybackDuration;
use crate::validation::validate_pattern;

/// Characters allowed in a beat pattern.
pub const ALPHABET: &[char] = &['_', '|'];

const PULSE: char = '|';

/// A beat pattern: every `|` is one instantaneous pulse at the start of its
/// sub-interval. `"_|________"` over one second is a single tap at 0.1 s,
/// not a 0.1 s vibration.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatEvent {
    raw_pattern: String,
    intensity: f32,
    sharpness: f32,
}

impl BeatEvent {
    /// Create a validated beat event.
    pub fn new(pattern: &str, intensity: f32, sharpness: f32) -> Result<Self> {
        validate_pattern(pattern, ALPHABET, intensity, sharpness)?;
        Ok(Self {
            raw_pattern: pattern.to_string(),
            intensity,
            sharpness,
        })
    }

    /// The pattern string as given.
    pub fn raw_pattern(&self) -> &str {
        &self.raw_pattern
    }

    /// Vibration strength in [0, 1].
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Vibration sharpness in [0, 1].
    pub fn sharpness(&self) -> f32 {
        self.sharpness
    }

    /// Number of sub-intervals.
    pub fn len(&self) -> usize {
        self.raw_pattern.chars().count()
    }

    /// Always false for a constructed event.
    pub fn is_empty(&self) -> bool {
        self.raw_pattern.is_empty()
    }

    /// Compile into pulse segments, one per `|` at `index * unit`.
    pub fn compile(&self, duration: PlaybackDuration) -> Vec<TimedSegment> {
        let Some(unit) = super::unit_secs(duration, self.len()) else {
            return Vec::new();
        };

        let segments: Vec<TimedSegment> = self
            .raw_pattern
            .chars()
            .enumerate()
            .filter(|&(_, c)| c == PULSE)
            .map(|(i, _)| TimedSegment::Pulse {
                at_secs: i as f64 * unit,
                intensity: self.intensity,
                sharpness: self.sharpness,
            })
            .collect();

        debug!(
            pattern = %self.raw_pattern,
            unit_secs = unit,
            segments = segments.len(),
            "Compiled beat pattern"
        );

        segments
    }
}
