//! Periodic reminder scheduler.
//!
//! Like the rest of the core this is a wall-clock state machine with no
//! internal thread: the host calls `tick()` on its event loop and gets a
//! `ReminderFired` event back when a period boundary has passed.
//!
//! ## State Transitions
//!
//! ```text
//! Disarmed --arm--> Armed --disarm(handle)--> Disarmed
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut reminders = ReminderScheduler::default();
//! let (handle, _armed) = reminders.arm().unwrap();
//! // In the host loop:
//! reminders.tick(); // Some(Event::ReminderFired) once per period
//! // On teardown:
//! reminders.disarm(handle);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::events::Event;

/// One hour.
pub const DEFAULT_REMINDER_PERIOD_MS: u64 = 3_600_000;
pub const DEFAULT_REMINDER_MESSAGE: &str = "Remember to log today's health data!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderState {
    Armed,
    Disarmed,
}

/// Proof of a particular arming. Consumed by [`ReminderScheduler::disarm`],
/// so a host can only tear down the arming it was given, and only once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the handle leaves the reminder armed with no way to disarm it"]
pub struct ReminderHandle {
    generation: u64,
}

impl ReminderHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct ReminderScheduler {
    period_ms: u64,
    message: String,
    state: ReminderState,
    /// Bumped on every arm; handles from older armings no longer match.
    generation: u64,
    /// Start of the current arming; period boundaries are counted from here.
    armed_at_epoch_ms: Option<u64>,
    /// Next period boundary (ms since epoch). Only set while armed.
    next_due_epoch_ms: Option<u64>,
    /// Firings since the current arming.
    fired: u64,
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_REMINDER_PERIOD_MS),
            DEFAULT_REMINDER_MESSAGE,
        )
    }
}

impl ReminderScheduler {
    /// Create a disarmed scheduler. A zero period is raised to 1 ms.
    pub fn new(period: Duration, message: impl Into<String>) -> Self {
        let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX).max(1);
        Self {
            period_ms,
            message: message.into(),
            state: ReminderState::Disarmed,
            generation: 0,
            armed_at_epoch_ms: None,
            next_due_epoch_ms: None,
            fired: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ReminderState {
        self.state
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    pub fn armed_at_epoch_ms(&self) -> Option<u64> {
        self.armed_at_epoch_ms
    }

    pub fn next_due_epoch_ms(&self) -> Option<u64> {
        self.next_due_epoch_ms
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn arm(&mut self) -> Option<(ReminderHandle, Event)> {
        self.arm_at(now_ms())
    }

    /// Disarmed -> Armed. Returns `None` if already armed.
    pub fn arm_at(&mut self, now_epoch_ms: u64) -> Option<(ReminderHandle, Event)> {
        if self.state == ReminderState::Armed {
            return None;
        }
        self.generation += 1;
        self.state = ReminderState::Armed;
        self.armed_at_epoch_ms = Some(now_epoch_ms);
        self.next_due_epoch_ms = Some(now_epoch_ms.saturating_add(self.period_ms));
        self.fired = 0;
        tracing::info!(period_ms = self.period_ms, generation = self.generation, "reminder armed");

        Some((
            ReminderHandle {
                generation: self.generation,
            },
            Event::ReminderArmed {
                period_ms: self.period_ms,
                at: Utc::now(),
            },
        ))
    }

    /// Armed -> Disarmed. After this returns `Some`, no tick fires until the
    /// scheduler is armed again. A handle from an earlier arming is ignored.
    pub fn disarm(&mut self, handle: ReminderHandle) -> Option<Event> {
        if self.state != ReminderState::Armed || handle.generation != self.generation {
            tracing::debug!(handle = handle.generation, current = self.generation, "stale reminder handle");
            return None;
        }
        self.state = ReminderState::Disarmed;
        self.armed_at_epoch_ms = None;
        self.next_due_epoch_ms = None;
        tracing::info!(fired = self.fired, "reminder disarmed");
        Some(Event::ReminderDisarmed {
            fired: self.fired,
            at: Utc::now(),
        })
    }

    /// Call periodically. Returns `Some(Event::ReminderFired)` when a period
    /// boundary has passed since the last firing.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Fires at most once per call. If the host stalled across several
    /// boundaries, one reminder is emitted and the schedule jumps to the next
    /// boundary still in the future, keeping the grid anchored at arm time.
    pub fn tick_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        if self.state != ReminderState::Armed {
            return None;
        }
        let due = self.next_due_epoch_ms?;
        if now_epoch_ms < due {
            return None;
        }

        let missed = (now_epoch_ms - due) / self.period_ms;
        self.next_due_epoch_ms = Some(
            due.saturating_add(missed.saturating_add(1).saturating_mul(self.period_ms)),
        );
        self.fired += 1;
        if missed > 0 {
            tracing::debug!(missed, "reminder periods elapsed without a tick");
        }

        Some(Event::ReminderFired {
            sequence: self.fired,
            message: self.message.clone(),
            at: Utc::now(),
        })
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
