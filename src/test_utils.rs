//! Fixtures shared by the unit tests

use std::cell::Cell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};

use crate::environment::clock::MockClock;
use crate::environment::defaults::manage_defaults;
use crate::environment::types::TimelineConfig;
use crate::environment::{ActiveTimelineContext, Environment};
use crate::view_model::*;

pub fn init_logging() {
    use env_logger::Env;
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

pub fn test_environment() -> Environment {
    let now = Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap();
    Environment::new(TimelineConfig::default(), Rc::new(RecordingActiveTimeline::default()))
        .with_clock(Rc::new(MockClock::new(now)))
}

pub fn mock_timeline(id: &str) -> TimelineModel {
    manage_defaults(id, &test_environment())
}

/// A snapshot holding a default timeline for every id
pub fn timeline_by_id(ids: &[&str]) -> TimelineById {
    ids.iter()
        .map(|id| (id.to_string(), mock_timeline(id)))
        .collect()
}

/// A snapshot with a single timeline that went through `edit`
pub fn with_timeline(id: &str, edit: impl FnOnce(&mut TimelineModel)) -> TimelineById {
    let mut timeline = mock_timeline(id);
    edit(&mut timeline);
    let mut timelines = timeline_by_id(&["other"]);
    timelines.insert(id.to_string(), timeline);
    timelines
}

pub fn provider(id: &str, field: &str, value: &str) -> DataProvider {
    DataProvider::new(id, QueryMatch::new(field, value))
}

pub fn and_provider(id: &str, field: &str, value: &str) -> DataProviderAnd {
    provider(id, field, value).into_and()
}

/// Counts the resets it receives
#[derive(Debug, Default)]
pub struct RecordingActiveTimeline {
    pub page_resets: Cell<u32>,
    pub detail_resets: Cell<u32>,
}

impl ActiveTimelineContext for RecordingActiveTimeline {
    fn reset_active_page(&self) {
        self.page_resets.set(self.page_resets.get() + 1);
    }

    fn reset_expanded_detail(&self) {
        self.detail_resets.set(self.detail_resets.get() + 1);
    }
}
