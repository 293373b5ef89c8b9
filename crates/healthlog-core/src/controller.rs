//! Session controller.
//!
//! Owns the profile, the record sequence and both form drafts, and is the
//! only thing that mutates them. The host view layer feeds it field edits
//! and submissions, calls `tick()` from its event loop, and repaints from
//! the returned events or from `snapshot()`.
//!
//! ## View Transitions
//!
//! ```text
//! ProfileForm --submit_profile--> Dashboard (record form + trend + log)
//! ```
//!
//! The dashboard mounting arms the reminder; `close()` tears it down.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{GateError, Result, ValidationError};
use crate::events::Event;
use crate::form::{ProfileField, RecordField};
use crate::profile::{ProfileStore, UserProfile};
use crate::record::{self, HealthRecord, RecordDraft, RecordStore};
use crate::reminder::{ReminderHandle, ReminderScheduler};
use crate::storage::{Config, DisplayConfig};
use crate::trend::{Projection, TrendProjector};

/// Which screen is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    ProfileForm,
    Dashboard,
}

#[derive(Debug)]
pub struct Controller {
    profiles: ProfileStore,
    records: RecordStore,
    projector: TrendProjector,
    reminders: ReminderScheduler,
    reminder_enabled: bool,
    /// Present exactly while the dashboard is mounted with reminders on.
    reminder_handle: Option<ReminderHandle>,
    profile_draft: UserProfile,
    record_draft: RecordDraft,
    display: DisplayConfig,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Controller {
    pub fn new(config: &Config) -> Self {
        Self {
            profiles: ProfileStore::new(),
            records: RecordStore::new(),
            projector: TrendProjector::new(config.display.meals_placeholder.clone()),
            reminders: ReminderScheduler::new(
                Duration::from_millis(config.reminder.period_ms),
                config.reminder.message.clone(),
            ),
            reminder_enabled: config.reminder.enabled,
            reminder_handle: None,
            profile_draft: UserProfile::default(),
            record_draft: RecordDraft::default(),
            display: config.display.clone(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn view(&self) -> View {
        if self.profiles.is_open() {
            View::Dashboard
        } else {
            View::ProfileForm
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profiles.profile()
    }

    pub fn profile_draft(&self) -> &UserProfile {
        &self.profile_draft
    }

    pub fn record_draft(&self) -> &RecordDraft {
        &self.record_draft
    }

    pub fn records(&self) -> &[HealthRecord] {
        self.records.records()
    }

    pub fn reminders(&self) -> &ReminderScheduler {
        &self.reminders
    }

    pub fn welcome(&self) -> Option<String> {
        self.profiles.profile().map(|p| self.display.welcome(&p.name))
    }

    /// Trend series and meal log for the current records.
    pub fn dashboard(&self) -> Result<Projection, GateError> {
        self.require_profile()?;
        Ok(self.projector.project(self.records.records()))
    }

    pub fn snapshot(&self) -> Result<Event, GateError> {
        let projection = self.dashboard()?;
        Ok(Event::DashboardSnapshot {
            welcome: self.welcome().unwrap_or_default(),
            record_count: self.records.len(),
            projection,
            at: Utc::now(),
        })
    }

    // ── Form edits ───────────────────────────────────────────────────

    pub fn set_profile_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) -> Result<(), GateError> {
        if self.profiles.is_open() {
            return Err(GateError::ProfileAlreadySet);
        }
        self.profile_draft.set(field, value);
        Ok(())
    }

    pub fn set_record_field(
        &mut self,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<(), GateError> {
        self.require_profile()?;
        self.record_draft.set(field, value);
        Ok(())
    }

    /// Edit a field of whichever form is currently showing, addressed by key.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        match self.view() {
            View::ProfileForm => self.set_profile_field(key.parse()?, value)?,
            View::Dashboard => self.set_record_field(key.parse()?, value)?,
        }
        Ok(())
    }

    // ── Submissions ──────────────────────────────────────────────────

    /// Save the profile draft as-is and open the gate. Mounting the
    /// dashboard arms the reminder when reminders are enabled.
    pub fn submit_profile(&mut self) -> Result<Vec<Event>, GateError> {
        if self.profiles.is_open() {
            return Err(GateError::ProfileAlreadySet);
        }
        let profile = std::mem::take(&mut self.profile_draft);
        self.profiles
            .try_save(profile.clone())
            .unwrap_or_else(|never| match never {});

        let mut events = vec![Event::ProfileSaved {
            welcome: self.display.welcome(&profile.name),
            profile,
            at: Utc::now(),
        }];
        if self.reminder_enabled {
            if let Some((handle, armed)) = self.reminders.arm() {
                self.reminder_handle = Some(handle);
                events.push(armed);
            }
        }
        Ok(events)
    }

    /// Validate the record draft and append it.
    ///
    /// On success the draft is cleared. On a missing date or weight the
    /// submission is dropped, the store is untouched and the draft is kept
    /// for correction; the returned `RecordRejected` carries the notice.
    pub fn submit_record(&mut self) -> Result<Event, GateError> {
        self.require_profile()?;

        match record::validate(&self.record_draft) {
            Ok(record) => {
                let stored = RecordDraft::from(&record);
                let total = self.records.append(record).len();
                self.record_draft.clear();
                Ok(Event::RecordAdded {
                    index: total - 1,
                    record: stored,
                    total,
                    at: Utc::now(),
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, "record submission rejected");
                let ValidationError::MissingRequiredField { field } = err;
                Ok(Event::RecordRejected {
                    field,
                    notice: err.notice().to_string(),
                    at: Utc::now(),
                })
            }
        }
    }

    /// Submit whichever form is currently showing.
    pub fn submit(&mut self) -> Result<Vec<Event>, GateError> {
        match self.view() {
            View::ProfileForm => self.submit_profile(),
            View::Dashboard => Ok(vec![self.submit_record()?]),
        }
    }

    // ── Reminder lifecycle ───────────────────────────────────────────

    /// Call periodically from the host loop.
    pub fn tick(&mut self) -> Option<Event> {
        self.reminders.tick()
    }

    pub fn tick_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        self.reminders.tick_at(now_epoch_ms)
    }

    /// Tear down the dashboard. Disarms the reminder; safe to call twice.
    pub fn close(&mut self) -> Option<Event> {
        let handle = self.reminder_handle.take()?;
        self.reminders.disarm(handle)
    }

    fn require_profile(&self) -> Result<(), GateError> {
        if self.profiles.is_open() {
            Ok(())
        } else {
            Err(GateError::ProfileRequired)
        }
    }
}
