// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-process simulated haptic device.
//!
//! The simulated device does not vibrate anything. It logs every segment of
//! a played plan in start-time order and keeps a copy of the plan so callers
//! can inspect what was sent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::r#trait::{HapticDevice, HapticEngine};
use crate::config::SinkConfig;
use crate::plan::{PlaybackPlan, TimedSegment};

/// Simulated haptic device.
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    supports_haptics: bool,
    max_segments: usize,
    engines_created: Arc<AtomicUsize>,
    played: Arc<Mutex<Vec<PlaybackPlan>>>,
}

impl SimulatedDevice {
    /// Create a device that accepts plans of up to `max_segments` segments.
    pub fn new(supports_haptics: bool, max_segments: usize) -> Self {
        Self {
            supports_haptics,
            max_segments,
            engines_created: Arc::new(AtomicUsize::new(0)),
            played: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a device from sink configuration.
    pub fn from_config(config: &SinkConfig) -> Self {
        Self::new(config.supports_haptics, config.max_segments)
    }

    /// Number of engines created so far.
    pub fn engines_created(&self) -> usize {
        self.engines_created.load(Ordering::SeqCst)
    }

    /// Every plan played so far, oldest first.
    pub fn played(&self) -> Vec<PlaybackPlan> {
        self.played.lock().clone()
    }

    /// The most recently played plan.
    pub fn last_played(&self) -> Option<PlaybackPlan> {
        self.played.lock().last().cloned()
    }
}

impl HapticDevice for SimulatedDevice {
    type Engine = SimulatedEngine;

    fn supports_haptics(&self) -> bool {
        self.supports_haptics
    }

    fn create_engine(&self) -> Result<SimulatedEngine, String> {
        let id = self.engines_created.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(engine_id = id, "Simulated engine created");
        Ok(SimulatedEngine {
            id,
            running: false,
            max_segments: self.max_segments,
            played: Arc::clone(&self.played),
        })
    }
}

/// Engine created by [`SimulatedDevice`].
#[derive(Debug)]
pub struct SimulatedEngine {
    id: usize,
    running: bool,
    max_segments: usize,
    played: Arc<Mutex<Vec<PlaybackPlan>>>,
}

impl SimulatedEngine {
    /// Whether the engine has been started and not stopped since.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl HapticEngine for SimulatedEngine {
    fn start(&mut self) -> Result<(), String> {
        if !self.running {
            debug!(engine_id = self.id, "Simulated engine started");
            self.running = true;
        }
        Ok(())
    }

    fn play(&mut self, plan: &PlaybackPlan) -> Result<(), String> {
        if !self.running {
            return Err("engine is not running".into());
        }
        if plan.len() > self.max_segments {
            return Err(format!(
                "plan has {} segments, engine accepts at most {}",
                plan.len(),
                self.max_segments
            ));
        }

        info!(
            engine_id = self.id,
            segments = plan.len(),
            duration_secs = plan.duration_secs,
            "Playing pattern"
        );
        for segment in plan.ordered() {
            match segment {
                TimedSegment::Pulse {
                    at_secs,
                    intensity,
                    sharpness,
                } => debug!(at_secs, intensity, sharpness, "pulse"),
                TimedSegment::Continuous {
                    start_secs,
                    duration_secs,
                    intensity,
                    sharpness,
                } => debug!(start_secs, duration_secs, intensity, sharpness, "vibrate"),
            }
        }

        self.played.lock().push(plan.clone());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), String> {
        if self.running {
            debug!(engine_id = self.id, "Simulated engine stopped");
            self.running = false;
        }
        Ok(())
    }
}
