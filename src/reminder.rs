use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderDate(NaiveDate);

impl ReminderDate {
    pub fn new(inner: NaiveDate) -> Self {
        Self(inner)
    }
}

/// Renders as `D/M/YYYY` without zero padding.
impl fmt::Display for ReminderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.0.day(), self.0.month(), self.0.year())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    pub fn new(inner: NaiveTime) -> Self {
        let normalized_time = NaiveTime::from_hms_opt(inner.hour(), inner.minute(), 0)
            .unwrap_or(inner);
        Self(normalized_time)
    }

    #[cfg(test)]
    pub fn time(&self) -> &NaiveTime {
        &self.0
    }
}

/// Renders as `H:M` with the meridiem glued on. The hour keeps its 24-hour
/// value and the minute is not padded, so 14:05 becomes `14:5PM`.
impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (is_pm, _) = self.0.hour12();
        let meridiem = if is_pm { "PM" } else { "AM" };
        write!(f, "{}:{}{}", self.0.hour(), self.0.minute(), meridiem)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftReminder {
    pub text: String,
    pub date: Option<ReminderDate>,
    pub time: Option<ReminderTime>,
}

impl DraftReminder {
    pub fn formatted_date(&self) -> String {
        self.date.map(|date| date.to_string()).unwrap_or_default()
    }

    pub fn formatted_time(&self) -> String {
        self.time.map(|time| time.to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub text: String,
    pub date: String,
    pub time: String,
}
