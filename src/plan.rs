// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Compiled playback plans.
//!
//! [`TimedSegment`] is one primitive haptic event placed on the timeline.
//! [`PlaybackPlan`] is the flattened set of segments compiled from one batch
//! of pattern events sharing one duration. All times are in seconds relative
//! to the start of playback.

use std::cmp::Ordering;

use serde::Serialize;

/// A primitive haptic event placed at a specific time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimedSegment {
    /// Instantaneous tap.
    Pulse {
        at_secs: f64,
        intensity: f32,
        sharpness: f32,
    },
    /// Sustained vibration.
    Continuous {
        start_secs: f64,
        duration_secs: f64,
        intensity: f32,
        sharpness: f32,
    },
}

impl TimedSegment {
    /// When this segment begins.
    pub fn start_secs(&self) -> f64 {
        match self {
            Self::Pulse { at_secs, .. } => *at_secs,
            Self::Continuous { start_secs, .. } => *start_secs,
        }
    }

    /// How long this segment lasts (zero for pulses).
    pub fn duration_secs(&self) -> f64 {
        match self {
            Self::Pulse { .. } => 0.0,
            Self::Continuous { duration_secs, .. } => *duration_secs,
        }
    }

    /// When this segment ends.
    pub fn end_secs(&self) -> f64 {
        self.start_secs() + self.duration_secs()
    }

    /// Strength of this segment.
    pub fn intensity(&self) -> f32 {
        match self {
            Self::Pulse { intensity, .. } | Self::Continuous { intensity, .. } => *intensity,
        }
    }

    /// Sharpness of this segment.
    pub fn sharpness(&self) -> f32 {
        match self {
            Self::Pulse { sharpness, .. } | Self::Continuous { sharpness, .. } => *sharpness,
        }
    }

    /// Whether this is an instantaneous pulse.
    pub fn is_pulse(&self) -> bool {
        matches!(self, Self::Pulse { .. })
    }
}

/// The flattened, time-aligned set of segments for one playback.
///
/// Segment order carries no meaning: the sink treats them as a
/// simultaneous set, each scheduled relative to time zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackPlan {
    /// Playback duration in seconds the plan was compiled for.
    pub duration_secs: f64,
    /// All segments from all events.
    pub segments: Vec<TimedSegment>,
}

impl PlaybackPlan {
    /// Create a plan from compiled segments.
    pub fn new(duration_secs: f64, segments: Vec<TimedSegment>) -> Self {
        Self {
            duration_secs,
            segments,
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the plan has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterator over pulse segments.
    pub fn pulses(&self) -> impl Iterator<Item = &TimedSegment> {
        self.segments.iter().filter(|s| s.is_pulse())
    }

    /// Iterator over continuous segments.
    pub fn continuous(&self) -> impl Iterator<Item = &TimedSegment> {
        self.segments.iter().filter(|s| !s.is_pulse())
    }

    /// Latest end time across all segments (0 for an empty plan).
    pub fn end_secs(&self) -> f64 {
        self.segments
            .iter()
            .map(TimedSegment::end_secs)
            .fold(0.0, f64::max)
    }

    /// Segments sorted by start time, pulses before vibrations on ties.
    pub fn ordered(&self) -> Vec<TimedSegment> {
        let mut segments = self.segments.clone();
        segments.sort_by(|a, b| match a.start_secs().total_cmp(&b.start_secs()) {
            Ordering::Equal => b.is_pulse().cmp(&a.is_pulse()),
            other => other,
        });
        segments
    }
}
