mod scheduler;

pub use scheduler::{
    ReminderHandle, ReminderScheduler, ReminderState, DEFAULT_REMINDER_MESSAGE,
    DEFAULT_REMINDER_PERIOD_MS,
};
