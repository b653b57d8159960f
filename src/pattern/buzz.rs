// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sustained vibration patterns.

use tracing::debug;

use crate::error::Result;
use crate::plan::TimedSegment;
use crate::time::PlaybackDuration;
use crate::validation::validate_pattern;

/// Characters allowed in a buzz pattern.
pub const ALPHABET: &[char] = &['_', '-'];

const VIBRATE: char = '-';

/// A buzz pattern: every maximal run of `-` is one continuous vibration.
#[derive(Debug, Clone, PartialEq)]
pub struct BuzzEvent {
    raw_pattern: String,
    intensity: f32,
    sharpness: f32,
}

impl BuzzEvent {
    /// Create a validated buzz event.
    ///
    /// # Errors
    ///
    /// Any [`ValidationError`](crate::error::ValidationError) raised by
    /// [`validate_pattern`] against the `_-` alphabet.
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

    /// Compile into continuous segments.
    ///
    /// The duration is split into one sub-interval per character. A run of
    /// `-` covering sub-intervals `i..=j` becomes a segment from boundary
    /// `i` to boundary `j + 1`, where boundary `k` is `duration * k / len`.
    /// A run still open at the end of the pattern is flushed and ends
    /// exactly at `duration`.
    pub fn compile(&self, duration: PlaybackDuration) -> Vec<TimedSegment> {
        let length = self.len();
        let Some(unit) = super::unit_secs(duration, length) else {
            return Vec::new();
        };
        let secs = duration.as_secs_f64();

        let mut segments = Vec::new();
        let mut run_start: Option<usize> = None;

        for (i, c) in self.raw_pattern.chars().enumerate() {
            match (run_start, c == VIBRATE) {
                (None, true) => run_start = Some(i),
                (Some(start), false) => {
                    segments.push(self.segment(start, i, length, secs));
                    run_start = None;
                }
                _ => {}
            }
        }

        if let Some(start) = run_start {
            segments.push(self.segment(start, length, length, secs));
        }

        debug!(
            pattern = %self.raw_pattern,
            unit_secs = unit,
            segments = segments.len(),
            "Compiled buzz pattern"
        );

        segments
    }

    /// Segment covering sub-intervals `start..end` of `length`.
    fn segment(&self, start: usize, end: usize, length: usize, secs: f64) -> TimedSegment {
        let start_secs = boundary(secs, start, length);
        let end_secs = boundary(secs, end, length);

        // start + duration must not round past the end boundary
        let mut duration_secs = end_secs - start_secs;
        while duration_secs > 0.0 && start_secs + duration_secs > end_secs {
            duration_secs = f64::from_bits(duration_secs.to_bits() - 1);
        }

        TimedSegment::Continuous {
            start_secs,
            duration_secs,
            intensity: self.intensity,
            sharpness: self.sharpness,
        }
    }
}

/// Time of sub-interval boundary `k`; the last boundary is exactly `secs`.
fn boundary(secs: f64, k: usize, length: usize) -> f64 {
    if k == length {
        secs
    } else {
        secs * k as f64 / length as f64
    }
}
