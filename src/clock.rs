use chrono::{Local, NaiveDate};

/// Source of "today" for date-window computations.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Host clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Pinned date, used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
