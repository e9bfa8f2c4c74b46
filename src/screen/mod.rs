mod actor;
pub mod render;

pub use actor::{PickApplied, ScreenController};

use thiserror::Error;

use crate::reminder::{DraftReminder, Reminder, ReminderDate, ReminderTime};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommitError {
    #[error("Reminder text is empty")]
    EmptyText,

    #[error("No date was picked")]
    MissingDate,

    #[error("No time was picked")]
    MissingTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage(String);

impl StatusMessage {
    pub fn reminder_set(reminder: &Reminder) -> Self {
        Self(format!(
            "Reminder set for {} at {}",
            reminder.date, reminder.time
        ))
    }

    pub fn reminders_cleared() -> Self {
        Self("Reminders were cleared".to_string())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenSnapshot {
    pub draft: DraftReminder,
    pub reminders: Vec<Reminder>,
}

/// Draft plus committed reminders for one screen session.
#[derive(Debug, Default)]
pub struct ReminderScreen {
    draft: DraftReminder,
    reminders: Vec<Reminder>,
}

impl ReminderScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn set_date(&mut self, date: ReminderDate) {
        self.draft.date = Some(date);
    }

    pub fn set_time(&mut self, time: ReminderTime) {
        self.draft.time = Some(time);
    }

    /// Appends the draft to the list and resets it. Leaves everything
    /// untouched when a field is missing.
    pub fn commit(&mut self) -> Result<StatusMessage, CommitError> {
        if self.draft.text.is_empty() {
            return Err(CommitError::EmptyText);
        }
        let date = self.draft.date.ok_or(CommitError::MissingDate)?;
        let time = self.draft.time.ok_or(CommitError::MissingTime)?;

        let reminder = Reminder {
            text: std::mem::take(&mut self.draft.text),
            date: date.to_string(),
            time: time.to_string(),
        };
        self.draft = DraftReminder::default();

        let status = StatusMessage::reminder_set(&reminder);
        self.reminders.push(reminder);

        Ok(status)
    }

    pub fn clear(&mut self) -> StatusMessage {
        self.reminders.clear();
        StatusMessage::reminders_cleared()
    }

    #[cfg(test)]
    pub fn draft(&self) -> &DraftReminder {
        &self.draft
    }

    #[cfg(test)]
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            draft: self.draft.clone(),
            reminders: self.reminders.clone(),
        }
    }
}
