pub mod clock;
pub mod defaults;
pub mod types;

use std::rc::Rc;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use self::clock::{Clock, SystemClock};
use self::types::TimelineConfig;
use crate::view_model::DateRange;

/// Page and flyout state of the timeline that is currently open. It lives
/// outside of the timeline records and has to be reset whenever the active
/// timeline switches to another saved object.
pub trait ActiveTimelineContext {
    fn reset_active_page(&self);
    fn reset_expanded_detail(&self);
}

/// For environments without an active timeline view
#[derive(Debug, Default)]
pub struct NoActiveTimeline;

impl ActiveTimelineContext for NoActiveTimeline {
    fn reset_active_page(&self) {}
    fn reset_expanded_detail(&self) {}
}

#[derive(Clone)]
pub struct Environment {
    pub config: TimelineConfig,
    pub active_timeline: Rc<dyn ActiveTimelineContext>,
    pub clock: Rc<dyn Clock>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .field("now", &self.clock.now())
            .finish()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(TimelineConfig::default(), Rc::new(NoActiveTimeline))
    }
}

impl Environment {
    pub fn new(config: TimelineConfig, active_timeline: Rc<dyn ActiveTimelineContext>) -> Self {
        Self {
            config,
            active_timeline,
            clock: Rc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The configured window, ending now
    pub fn default_date_range(&self) -> DateRange {
        let end = self.clock.now();
        let start = end - Duration::minutes(self.config.default_range_minutes);
        DateRange {
            start: iso_string(start),
            end: iso_string(end),
        }
    }
}

fn iso_string(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
