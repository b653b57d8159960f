// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Haptic sink and driver trait definitions.

use crate::error::SinkError;
use crate::plan::PlaybackPlan;

/// The boundary that accepts compiled plans and performs actuation.
///
/// Calls are synchronous. Implementations own whatever engine state they
/// need and must be shareable across threads.
pub trait HapticSink: Send + Sync {
    /// Sink name, used in logs.
    fn name(&self) -> &str;

    /// Capability probe.
    fn is_available(&self) -> bool;

    /// Start playback of every segment in `plan` immediately, each scheduled
    /// relative to plan time zero.
    fn prepare_and_play(&self, plan: &PlaybackPlan) -> Result<(), SinkError>;

    /// Stop the current playback, if any.
    fn stop(&self) -> Result<(), SinkError>;
}

/// A physical (or simulated) haptic device.
///
/// Driver failures are reported as plain messages; [`EngineSink`] maps them
/// to the [`SinkError`] for the phase that failed.
///
/// [`EngineSink`]: super::EngineSink
pub trait HapticDevice: Send + Sync {
    type Engine: HapticEngine;

    /// Whether the hardware can play haptics at all.
    fn supports_haptics(&self) -> bool;

    /// Create a new engine. Called at most once per engine lifetime.
    fn create_engine(&self) -> Result<Self::Engine, String>;
}

/// A running haptic engine created by a [`HapticDevice`].
pub trait HapticEngine: Send {
    /// Start (or restart) the engine. Must be cheap when already running.
    fn start(&mut self) -> Result<(), String>;

    /// Schedule a plan for immediate playback.
    fn play(&mut self, plan: &PlaybackPlan) -> Result<(), String>;

    /// Stop playback and shut the engine down.
    fn stop(&mut self) -> Result<(), String>;
}
