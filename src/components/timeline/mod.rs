//! State transitions of the timeline grid.
//!
//! Every operation takes the current `TimelineById` snapshot and returns a
//! new one in which only the addressed timeline was replaced. The addressed
//! timeline has to exist; callers go through [`reduce`] to get that checked.

mod columns;
mod events;
mod lifecycle;
mod providers;
mod reducer;
mod settings;

pub use columns::*;
pub use events::*;
pub use lifecycle::*;
pub use providers::*;
pub use reducer::{reduce, Action};
pub use settings::*;

use debug_panic::debug_panic;

use crate::view_model::{TimelineById, TimelineModel};

/// Copy the timeline `id`, let `update` edit the copy and store it in a new
/// snapshot.
pub(crate) fn update_timeline(
    timeline_by_id: &TimelineById,
    id: &str,
    update: impl FnOnce(&mut TimelineModel),
) -> TimelineById {
    let Some(timeline) = timeline_by_id.get(id) else {
        log::error!("no timeline with id {id}");
        debug_panic!();
        return timeline_by_id.clone();
    };
    let mut timeline = timeline.clone();
    update(&mut timeline);
    timeline_by_id.update(id.to_string(), timeline)
}
