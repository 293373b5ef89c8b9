//! # healthlog Core Library
//!
//! This library provides the core logic for the healthlog personal health
//! tracker. The CLI is a thin host over the same library: every state
//! change goes through the [`Controller`] and comes back out as an [`Event`].
//!
//! ## Architecture
//!
//! - **Profile gate**: a write-once profile that must exist before records
//!   can be logged
//! - **Records**: a validator plus an append-only, insertion-ordered store
//! - **Trend**: a pure projection of the records into a weight series and a
//!   meal log
//! - **Reminders**: a wall-clock state machine the host ticks from its loop
//!
//! Records live in memory for the session only. The sole file the library
//! touches is the TOML [`Config`].
//!
//! ## Key Components
//!
//! - [`Controller`]: owner of all session state
//! - [`TrendProjector`]: records to chart series and log
//! - [`ReminderScheduler`]: Armed/Disarmed periodic reminder

pub mod controller;
pub mod error;
pub mod events;
pub mod form;
pub mod profile;
pub mod record;
pub mod reminder;
pub mod storage;
pub mod trend;

pub use controller::{Controller, View};
pub use error::{ConfigError, CoreError, GateError, ValidationError};
pub use events::Event;
pub use form::{FieldSpec, InputKind, ProfileField, RecordField, PROFILE_FORM, RECORD_FORM};
pub use profile::{ProfileStore, UserProfile};
pub use record::{validate, HealthRecord, RecordDraft, RecordStore};
pub use reminder::{ReminderHandle, ReminderScheduler, ReminderState};
pub use storage::Config;
pub use trend::{LogEntry, Projection, TrendPoint, TrendProjector};
