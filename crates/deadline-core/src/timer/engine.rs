//! Timer engine implementation.
//!
//! The engine is a caller-ticked state machine. It does not own a thread;
//! whoever drives the countdown calls `tick()` once per elapsed second,
//! identifying itself with the [`DriverHandle`] issued by `start`/`resume`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Completed
//! ```
//!
//! `reset` returns to `Idle` from any state.
//!
//! ## Duplicate drivers
//!
//! Exactly one driver may be active at a time. `start` and `resume`
//! cancel any installed handle before issuing a new one, and `tick`
//! ignores stale handles, so a re-entrant `start` can never leave two
//! drivers double-decrementing the countdown.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use crate::events::Event;
use crate::timer::progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Token identifying the active tick driver.
///
/// Issued by [`TimerEngine::start`] and [`TimerEngine::resume`]; a handle
/// from an earlier run is stale and its ticks are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverHandle(u64);

/// Core countdown engine.
///
/// Single writer of `remaining_secs`; every visual projection is a pure
/// read of this value plus `total_secs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    phase: Phase,
    /// Duration configured at start; fixed for the lifetime of one run.
    total_secs: u64,
    /// 0 <= remaining <= total; decreases by exactly 1 per applied tick.
    remaining_secs: u64,
    label: Option<String>,
    /// Snapshot of `remaining_secs` at the moment of pausing.
    /// Informational only; resume correctness relies on `remaining_secs`.
    paused_at_secs: Option<u64>,
    /// Once entered (remaining <= 10% of total) the urgent tier sticks
    /// until reset, even across pause/resume.
    urgent: bool,
    /// Currently installed driver, if any. `Some` iff phase is Running.
    driver: Option<DriverHandle>,
    /// Issues fresh driver handles; never reused within one engine.
    next_driver: u64,
    /// Timestamp (ms since epoch) the last applied tick accounts for.
    /// Used to catch a persisted engine up to wall-clock time.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
    /// Completion side effects run at most once per run.
    #[serde(default)]
    completion_fired: bool,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Create a fresh engine in the `Idle` state with zeroed fields.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            total_secs: 0,
            remaining_secs: 0,
            label: None,
            paused_at_secs: None,
            urgent: false,
            driver: None,
            next_driver: 0,
            last_tick_epoch_ms: None,
            completion_fired: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn paused_at_secs(&self) -> Option<u64> {
        self.paused_at_secs
    }

    pub fn is_urgent(&self) -> bool {
        self.urgent
    }

    /// The currently installed driver, if the engine is running.
    pub fn driver(&self) -> Option<DriverHandle> {
        self.driver
    }

    /// 0.0 .. 1.0 elapsed fraction of the current run.
    pub fn fraction(&self) -> f64 {
        progress::fraction(self.remaining_secs, self.total_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            fraction: self.fraction(),
            urgent: self.urgent,
            label: self.label.clone(),
            at: Utc::now(),
        }
    }

    /// Whole seconds of wall-clock time the persisted engine has not yet
    /// ticked through, capped at `remaining_secs`. Zero unless Running.
    pub fn pending_ticks(&self) -> u64 {
        if self.phase != Phase::Running {
            return 0;
        }
        match self.last_tick_epoch_ms {
            Some(last) => {
                let elapsed = now_ms().saturating_sub(last) / 1_000;
                elapsed.min(self.remaining_secs)
            }
            None => 0,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a fresh run. Valid from any state: a prior run is discarded
    /// and any installed driver is cancelled before the new handle is
    /// issued.
    ///
    /// # Errors
    /// Returns [`TimerError::ZeroDuration`] for a zero-length duration;
    /// the engine state is unchanged in that case.
    pub fn start(
        &mut self,
        total_secs: u64,
        label: Option<String>,
    ) -> Result<(DriverHandle, Event), TimerError> {
        if total_secs == 0 {
            return Err(TimerError::ZeroDuration);
        }
        self.cancel_driver();
        let handle = self.install_driver();
        self.phase = Phase::Running;
        self.total_secs = total_secs;
        self.remaining_secs = total_secs;
        self.label = label;
        self.paused_at_secs = None;
        self.urgent = false;
        self.completion_fired = false;
        self.last_tick_epoch_ms = Some(now_ms());
        tracing::debug!(total_secs, "timer started");
        Ok((
            handle,
            Event::TimerStarted {
                total_secs,
                label: self.label.clone(),
                at: Utc::now(),
            },
        ))
    }

    /// Apply one elapsed second. Ignored unless the engine is Running
    /// and `handle` is the installed driver.
    ///
    /// Returns `Some(Event::TimerCompleted)` on the terminal tick; the
    /// same tick clamps the countdown at zero, uninstalls the driver and
    /// transitions to `Completed`.
    pub fn tick(&mut self, handle: DriverHandle) -> Option<Event> {
        if self.phase != Phase::Running || self.driver != Some(handle) {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        // A driven tick accounts for all wall-clock time up to now, so a
        // driver whose cadence drifts past 1s never banks phantom seconds
        // for a later catch-up to replay.
        if self.last_tick_epoch_ms.is_some() {
            self.last_tick_epoch_ms = Some(now_ms());
        }
        // Monotonic: once the countdown enters its final 10% the urgent
        // tier stays on until reset.
        if self.remaining_secs.saturating_mul(10) <= self.total_secs {
            self.urgent = true;
        }
        if self.remaining_secs == 0 {
            self.phase = Phase::Completed;
            self.driver = None;
            self.last_tick_epoch_ms = None;
            if self.completion_fired {
                return None;
            }
            self.completion_fired = true;
            tracing::debug!("timer completed");
            return Some(Event::TimerCompleted {
                label: self.label.clone(),
                at: Utc::now(),
            });
        }
        None
    }

    /// Freeze the countdown. No-op unless Running. The driver is
    /// uninstalled before this returns, so no tick applies afterwards.
    pub fn pause(&mut self) -> Option<Event> {
        if self.phase != Phase::Running {
            return None;
        }
        self.cancel_driver();
        self.phase = Phase::Paused;
        self.paused_at_secs = Some(self.remaining_secs);
        self.last_tick_epoch_ms = None;
        tracing::debug!(remaining_secs = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Restart the tick cadence at the preserved `remaining_secs`.
    /// No-op unless Paused with time left.
    pub fn resume(&mut self) -> Option<(DriverHandle, Event)> {
        if self.phase != Phase::Paused || self.remaining_secs == 0 {
            return None;
        }
        let handle = self.install_driver();
        self.phase = Phase::Running;
        self.last_tick_epoch_ms = Some(now_ms());
        tracing::debug!(remaining_secs = self.remaining_secs, "timer resumed");
        Some((
            handle,
            Event::TimerResumed {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            },
        ))
    }

    /// Clear the engine back to `Idle` from any state. Silent: never
    /// runs completion side effects. Idempotent.
    pub fn reset(&mut self) -> Event {
        self.cancel_driver();
        self.phase = Phase::Idle;
        self.total_secs = 0;
        self.remaining_secs = 0;
        self.label = None;
        self.paused_at_secs = None;
        self.urgent = false;
        self.last_tick_epoch_ms = None;
        self.completion_fired = false;
        tracing::debug!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cancel_driver(&mut self) {
        self.driver = None;
    }

    fn install_driver(&mut self) -> DriverHandle {
        self.next_driver += 1;
        let handle = DriverHandle(self.next_driver);
        self.driver = Some(handle);
        handle
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
