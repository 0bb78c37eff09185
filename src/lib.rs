mod components;
pub mod environment;
mod error;
pub mod view_model;

#[cfg(test)]
mod test_utils;

pub use components::timeline::*;
pub use environment::clock::{Clock, MockClock, SystemClock};
pub use environment::types::TimelineConfig;
pub use environment::{ActiveTimelineContext, Environment, NoActiveTimeline};
pub use error::TimelineError;

/// Handy macro for future localization
#[macro_export]
macro_rules! loc {
    ($x:expr $(,)?) => {
        $x
    };
}
