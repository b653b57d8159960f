// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Playback planning.
//!
//! [`PlaybackPlanner`] turns a batch of pattern events sharing one duration
//! into a single [`PlaybackPlan`] and hands it to a [`HapticSink`]. Every
//! check runs before the sink is touched, so a rejected batch never starts
//! partial playback.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::pattern::PatternEvent;
use crate::plan::PlaybackPlan;
use crate::sink::HapticSink;
use crate::time::PlaybackDuration;
use crate::validation::{validate_duration, validate_event_shapes};

/// Compiles pattern events and plays them on a sink.
///
/// The planner keeps no state between calls; concurrent calls are
/// independent and their ordering is up to the sink.
#[derive(Clone)]
pub struct PlaybackPlanner {
    sink: Arc<dyn HapticSink>,
}

impl PlaybackPlanner {
    /// Create a planner that plays on `sink`.
    pub fn new(sink: Arc<dyn HapticSink>) -> Self {
        Self { sink }
    }

    /// The sink plans are played on.
    pub fn sink(&self) -> &Arc<dyn HapticSink> {
        &self.sink
    }

    /// Validate and compile `events` over `duration` without playing.
    ///
    /// # Errors
    ///
    /// - [`NoEvents`] if `events` is empty
    /// - [`PatternLengthMismatch`] if the patterns differ in length
    /// - [`DurationNotPositive`] / [`DurationTooLong`] for a bad duration
    ///
    /// [`NoEvents`]: crate::error::ValidationError::NoEvents
    /// [`PatternLengthMismatch`]: crate::error::ValidationError::PatternLengthMismatch
    /// [`DurationNotPositive`]: crate::error::ValidationError::DurationNotPositive
    /// [`DurationTooLong`]: crate::error::ValidationError::DurationTooLong
    pub fn compile(
        &self,
        events: &[PatternEvent],
        duration: PlaybackDuration,
    ) -> Result<PlaybackPlan> {
        let length = validate_event_shapes(events.iter().map(PatternEvent::len))?;
        let duration_secs = validate_duration(duration)?;

        let segments: Vec<_> = events
            .iter()
            .flat_map(|event| event.compile(duration))
            .collect();

        debug!(
            events = events.len(),
            pattern_length = length,
            duration_secs,
            segments = segments.len(),
            "Compiled playback plan"
        );

        Ok(PlaybackPlan::new(duration_secs, segments))
    }

    /// Compile `events` over `duration` and start playing them.
    ///
    /// Returns the plan that was handed to the sink. Sink failures surface
    /// as [`Error::Sink`].
    pub fn play(
        &self,
        events: &[PatternEvent],
        duration: PlaybackDuration,
    ) -> Result<PlaybackPlan> {
        let plan = self.compile(events, duration)?;

        if let Err(e) = self.sink.prepare_and_play(&plan) {
            warn!(sink = %self.sink.name(), error = %e, "Playback failed");
            return Err(Error::Sink(e));
        }

        info!(
            sink = %self.sink.name(),
            events = events.len(),
            segments = plan.len(),
            duration = %duration,
            "Playing haptic pattern"
        );

        Ok(plan)
    }

    /// Stop the current playback on the sink.
    pub fn stop(&self) -> Result<()> {
        self.sink.stop()?;
        debug!(sink = %self.sink.name(), "Playback stopped");
        Ok(())
    }
}
