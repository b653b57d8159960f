// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities for sink and planner tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SinkError;
use crate::plan::PlaybackPlan;
use crate::sink::{HapticDevice, HapticEngine, HapticSink};

/// Mock sink that accepts every plan and records it.
#[derive(Default)]
pub struct RecordingSink {
    pub plans: Mutex<Vec<PlaybackPlan>>,
    pub stops: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn plays(&self) -> usize {
        self.plans.lock().len()
    }

    pub fn last(&self) -> Option<PlaybackPlan> {
        self.plans.lock().last().cloned()
    }
}

impl HapticSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn prepare_and_play(&self, plan: &PlaybackPlan) -> Result<(), SinkError> {
        self.plans.lock().push(plan.clone());
        Ok(())
    }

    fn stop(&self) -> Result<(), SinkError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Mock sink that always returns the same error.
pub struct FailingSink {
    pub error: SinkError,
    pub calls: AtomicUsize,
}

impl FailingSink {
    pub fn new(error: SinkError) -> Arc<Self> {
        Arc::new(Self {
            error,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HapticSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        !matches!(self.error, SinkError::HapticsUnsupported)
    }

    fn prepare_and_play(&self, _plan: &PlaybackPlan) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn stop(&self) -> Result<(), SinkError> {
        Err(self.error.clone())
    }
}

/// Phase in which a [`FlakyDevice`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlakyPhase {
    Create,
    Start,
    Play,
}

#[derive(Default)]
struct Counters {
    engines_created: AtomicUsize,
    plays: AtomicUsize,
    stops: AtomicUsize,
}

/// Mock device that counts engine activity and can fail in one phase.
pub struct FlakyDevice {
    supported: bool,
    fail: Option<FlakyPhase>,
    counters: Arc<Counters>,
}

impl FlakyDevice {
    fn with(supported: bool, fail: Option<FlakyPhase>) -> Self {
        Self {
            supported,
            fail,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn healthy() -> Self {
        Self::with(true, None)
    }

    pub fn unsupported() -> Self {
        Self::with(false, None)
    }

    pub fn failing(phase: FlakyPhase) -> Self {
        Self::with(true, Some(phase))
    }

    pub fn engines_created(&self) -> usize {
        self.counters.engines_created.load(Ordering::SeqCst)
    }

    pub fn plays(&self) -> usize {
        self.counters.plays.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.counters.stops.load(Ordering::SeqCst)
    }
}

impl HapticDevice for FlakyDevice {
    type Engine = FlakyEngine;

    fn supports_haptics(&self) -> bool {
        self.supported
    }

    fn create_engine(&self) -> Result<FlakyEngine, String> {
        if self.fail == Some(FlakyPhase::Create) {
            return Err("mock create failure".to_string());
        }
        self.counters.engines_created.fetch_add(1, Ordering::SeqCst);
        Ok(FlakyEngine {
            fail: self.fail,
            counters: Arc::clone(&self.counters),
        })
    }
}

/// Engine created by [`FlakyDevice`].
pub struct FlakyEngine {
    fail: Option<FlakyPhase>,
    counters: Arc<Counters>,
}

impl HapticEngine for FlakyEngine {
    fn start(&mut self) -> Result<(), String> {
        if self.fail == Some(FlakyPhase::Start) {
            return Err("mock start failure".to_string());
        }
        Ok(())
    }

    fn play(&mut self, _plan: &PlaybackPlan) -> Result<(), String> {
        if self.fail == Some(FlakyPhase::Play) {
            return Err("mock play failure".to_string());
        }
        self.counters.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), String> {
        self.counters.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
