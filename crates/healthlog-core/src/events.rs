use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::RecordField;
use crate::profile::UserProfile;
use crate::record::RecordDraft;
use crate::trend::Projection;

/// Every state change in the system produces an Event.
/// The view layer consumes them to repaint; nothing is polled back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Profile form accepted; the gate is now open.
    ProfileSaved {
        profile: UserProfile,
        welcome: String,
        at: DateTime<Utc>,
    },
    /// Record passed validation and was appended to the store.
    RecordAdded {
        /// Zero-based position in the record sequence.
        index: usize,
        record: RecordDraft,
        total: usize,
        at: DateTime<Utc>,
    },
    /// Submission discarded; the draft is left as it was.
    RecordRejected {
        field: RecordField,
        notice: String,
        at: DateTime<Utc>,
    },
    /// Periodic reminder started; the first firing is one period away.
    ReminderArmed {
        period_ms: u64,
        at: DateTime<Utc>,
    },
    /// A period boundary passed while armed.
    ReminderFired {
        /// 1-based count since the current arming.
        sequence: u64,
        message: String,
        at: DateTime<Utc>,
    },
    /// Reminder stopped; no further firings until re-armed.
    ReminderDisarmed {
        fired: u64,
        at: DateTime<Utc>,
    },
    /// Current projection of all records, as shown on the dashboard.
    DashboardSnapshot {
        welcome: String,
        record_count: usize,
        projection: Projection,
        at: DateTime<Utc>,
    },
}
