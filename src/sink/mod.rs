// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Haptic sinks.
//!
//! This module provides the [`HapticSink`] trait consumed by the planner and
//! the device layer underneath it:
//!
//! - [`EngineSink`]: owns one lazily created engine for a [`HapticDevice`]
//! - [`SimulatedDevice`]: in-process device used by the CLI and tests

pub mod engine;
pub mod simulated;
pub mod r#trait;

pub use engine::EngineSink;
pub use r#trait::{HapticDevice, HapticEngine, HapticSink};
pub use simulated::{SimulatedDevice, SimulatedEngine};
