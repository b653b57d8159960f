// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Haptic Patterns
//!
//! This crate compiles short textual haptic patterns into timed vibration
//! segments and plays them on a haptic device.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            PlaybackPlanner              │
//! ├──────────────────┬──────────────────────┤
//! │   BuzzEvent      │   BeatEvent          │
//! │   (_ -) runs     │   (_ |) pulses       │
//! ├──────────────────┴──────────────────────┤
//! │             PlaybackPlan                │
//! ├─────────────────────────────────────────┤
//! │   HapticSink  →  EngineSink<Device>     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`pattern`]: Pattern events and their compilers
//! - [`plan`]: Compiled timed segments
//! - [`planner`]: Validation, compilation and playback of event batches
//! - [`sink`]: Haptic sink trait, engine handle and simulated device
//! - [`time`]: Playback durations
//! - [`validation`]: Input validation utilities
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod pattern;
pub mod plan;
pub mod planner;
pub mod sink;
pub mod time;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use pattern::{PatternEvent, PatternKind};
pub use plan::{PlaybackPlan, TimedSegment};
pub use planner::PlaybackPlanner;
pub use time::PlaybackDuration;

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
