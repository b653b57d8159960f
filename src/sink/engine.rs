// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Lazily initialized engine handle.
//!
//! [`EngineSink`] adapts a [`HapticDevice`] to the [`HapticSink`] contract.
//! It owns at most one engine: created on first use, reused by every later
//! playback, and released once it has been idle longer than the configured
//! timeout.

use std::time::{Duration, Instant};

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use super::r#trait::{HapticDevice, HapticEngine, HapticSink};
use crate::error::SinkError;
use crate::plan::PlaybackPlan;

struct EngineSlot<E> {
    engine: E,
    last_used: Instant,
}

/// Sink that drives a [`HapticDevice`] through a single shared engine.
pub struct EngineSink<D: HapticDevice> {
    name: String,
    device: D,
    idle_timeout: Option<Duration>,
    slot: Mutex<Option<EngineSlot<D::Engine>>>,
}

impl<D: HapticDevice> EngineSink<D> {
    /// Create a sink. `idle_timeout = None` keeps the engine alive forever.
    pub fn new(name: impl Into<String>, device: D, idle_timeout: Option<Duration>) -> Self {
        Self {
            name: name.into(),
            device,
            idle_timeout,
            slot: Mutex::new(None),
        }
    }

    /// The wrapped device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Whether an engine is currently held.
    pub fn is_engine_alive(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Get the engine, creating it on first use.
    ///
    /// # Errors
    ///
    /// - [`SinkError::HapticsUnsupported`] if the capability probe fails
    /// - [`SinkError::EngineUnavailable`] if the engine cannot be created
    pub fn acquire(&self) -> Result<MappedMutexGuard<'_, D::Engine>, SinkError> {
        if !self.device.supports_haptics() {
            return Err(SinkError::HapticsUnsupported);
        }

        let mut slot = self.slot.lock();
        if slot.is_none() {
            let engine = self.device.create_engine().map_err(|e| {
                SinkError::EngineUnavailable(format!("failed to create engine: {e}"))
            })?;
            info!(sink = %self.name, "Created haptic engine");
            *slot = Some(EngineSlot {
                engine,
                last_used: Instant::now(),
            });
        }

        MutexGuard::try_map(slot, |slot| {
            slot.as_mut().map(|entry| {
                entry.last_used = Instant::now();
                &mut entry.engine
            })
        })
        .map_err(|_| SinkError::EngineUnavailable("engine slot is empty".into()))
    }

    /// Release the engine if it has been idle longer than the timeout.
    ///
    /// Returns whether an engine was released.
    pub fn release_if_idle(&self) -> bool {
        let Some(timeout) = self.idle_timeout else {
            return false;
        };

        let mut slot = self.slot.lock();
        let idle = match slot.as_ref() {
            Some(entry) => entry.last_used.elapsed(),
            None => return false,
        };
        if idle < timeout {
            return false;
        }

        debug!(sink = %self.name, idle_ms = idle.as_millis() as u64, "Releasing idle engine");
        if let Some(mut entry) = slot.take() {
            shut_down(&self.name, &mut entry.engine);
        }
        true
    }

    /// Stop and drop the engine unconditionally.
    ///
    /// Returns whether an engine was released.
    pub fn release(&self) -> bool {
        match self.slot.lock().take() {
            Some(mut entry) => {
                shut_down(&self.name, &mut entry.engine);
                true
            }
            None => false,
        }
    }
}

fn shut_down<E: HapticEngine>(name: &str, engine: &mut E) {
    match engine.stop() {
        Ok(()) => info!(sink = %name, "Released haptic engine"),
        Err(e) => warn!(sink = %name, error = %e, "Engine failed to stop cleanly"),
    }
}

impl<D: HapticDevice> HapticSink for EngineSink<D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.device.supports_haptics()
    }

    fn prepare_and_play(&self, plan: &PlaybackPlan) -> Result<(), SinkError> {
        self.release_if_idle();

        let mut engine = self.acquire()?;
        engine
            .start()
            .map_err(|e| SinkError::EngineUnavailable(format!("failed to start engine: {e}")))?;
        engine.play(plan).map_err(SinkError::PatternRejected)?;

        debug!(sink = %self.name, segments = plan.len(), "Playback started");
        Ok(())
    }

    fn stop(&self) -> Result<(), SinkError> {
        let mut slot = self.slot.lock();
        match slot.as_mut() {
            Some(entry) => entry
                .engine
                .stop()
                .map_err(|e| SinkError::EngineUnavailable(format!("failed to stop engine: {e}"))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::TimedSegment;
    use crate::test_utils::{FlakyDevice, FlakyPhase};

    fn plan() -> PlaybackPlan {
        PlaybackPlan::new(
            1.0,
            vec![TimedSegment::Pulse {
                at_secs: 0.5,
                intensity: 1.0,
                sharpness: 1.0,
            }],
        )
    }

    // =========================================================================
    // Lazy creation and reuse
    // =========================================================================

    #[test]
    fn test_engine_created_lazily() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), None);
        assert!(!sink.is_engine_alive());
        assert_eq!(sink.device().engines_created(), 0);

        sink.prepare_and_play(&plan()).unwrap();
        assert!(sink.is_engine_alive());
        assert_eq!(sink.device().engines_created(), 1);
    }

    #[test]
    fn test_engine_reused_across_plays() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), None);
        for _ in 0..3 {
            sink.prepare_and_play(&plan()).unwrap();
        }
        assert_eq!(sink.device().engines_created(), 1);
        assert_eq!(sink.device().plays(), 3);
    }

    #[test]
    fn test_acquire_returns_engine() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), None);
        {
            let mut engine = sink.acquire().unwrap();
            engine.start().unwrap();
        }
        assert!(sink.is_engine_alive());
        assert!(sink.acquire().is_ok());
        assert_eq!(sink.device().engines_created(), 1);
    }

    // =========================================================================
    // Idle release
    // =========================================================================

    #[test]
    fn test_release_if_idle_without_timeout() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), None);
        sink.prepare_and_play(&plan()).unwrap();
        assert!(!sink.release_if_idle());
        assert!(sink.is_engine_alive());
    }

    #[test]
    fn test_release_if_idle_after_timeout() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), Some(Duration::ZERO));
        sink.prepare_and_play(&plan()).unwrap();
        assert!(sink.release_if_idle());
        assert!(!sink.is_engine_alive());
        assert_eq!(sink.device().stops(), 1);

        // Next play recreates the engine
        sink.prepare_and_play(&plan()).unwrap();
        assert_eq!(sink.device().engines_created(), 2);
    }

    #[test]
    fn test_release_if_idle_before_timeout() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), Some(Duration::from_secs(3600)));
        sink.prepare_and_play(&plan()).unwrap();
        assert!(!sink.release_if_idle());
        assert!(sink.is_engine_alive());
    }

    #[test]
    fn test_release_unconditional() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), None);
        assert!(!sink.release());

        sink.prepare_and_play(&plan()).unwrap();
        assert!(sink.release());
        assert!(!sink.is_engine_alive());
    }

    // =========================================================================
    // Error mapping per phase
    // =========================================================================

    #[test]
    fn test_unsupported_device() {
        let sink = EngineSink::new("test", FlakyDevice::unsupported(), None);
        assert!(!sink.is_available());
        assert_eq!(
            sink.prepare_and_play(&plan()).unwrap_err(),
            SinkError::HapticsUnsupported
        );
        assert_eq!(sink.device().engines_created(), 0);
    }

    #[test]
    fn test_create_failure() {
        let sink = EngineSink::new("test", FlakyDevice::failing(FlakyPhase::Create), None);
        let err = sink.prepare_and_play(&plan()).unwrap_err();
        assert!(matches!(err, SinkError::EngineUnavailable(msg) if msg.contains("create")));
        assert!(!sink.is_engine_alive());
    }

    #[test]
    fn test_start_failure() {
        let sink = EngineSink::new("test", FlakyDevice::failing(FlakyPhase::Start), None);
        let err = sink.prepare_and_play(&plan()).unwrap_err();
        assert!(matches!(err, SinkError::EngineUnavailable(msg) if msg.contains("start")));
    }

    #[test]
    fn test_play_failure() {
        let sink = EngineSink::new("test", FlakyDevice::failing(FlakyPhase::Play), None);
        let err = sink.prepare_and_play(&plan()).unwrap_err();
        assert!(matches!(err, SinkError::PatternRejected(_)));
    }

    // =========================================================================
    // Stop
    // =========================================================================

    #[test]
    fn test_stop_without_engine_is_noop() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), None);
        assert!(sink.stop().is_ok());
        assert_eq!(sink.device().stops(), 0);
    }

    #[test]
    fn test_stop_keeps_engine() {
        let sink = EngineSink::new("test", FlakyDevice::healthy(), None);
        sink.prepare_and_play(&plan()).unwrap();
        sink.stop().unwrap();
        assert_eq!(sink.device().stops(), 1);
        assert!(sink.is_engine_alive());
    }
}
