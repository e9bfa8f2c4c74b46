use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Date selection dialog. `None` means the dialog was dismissed.
#[async_trait]
pub trait DatePicker: Send + Sync + 'static {
    async fn pick_date(&self, initial: NaiveDate) -> Option<NaiveDate>;
}

/// Time selection dialog, 24-hour. `None` means the dialog was dismissed.
#[async_trait]
pub trait TimePicker: Send + Sync + 'static {
    async fn pick_time(&self, initial: NaiveTime) -> Option<NaiveTime>;
}

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
