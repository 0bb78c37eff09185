//! Injectable time source. New timelines derive their default date range
//! from it.

use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for tests
#[derive(Debug)]
pub struct MockClock {
    current_time: Cell<DateTime<Utc>>,
}

impl MockClock {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            current_time: Cell::new(start_time),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.current_time.set(self.current_time.get() + by);
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        self.current_time.get()
    }
}
