use std::collections::HashSet;

use itertools::Itertools;

use super::update_timeline;
use crate::view_model::{SelectedEventIds, TimelineById};

/// Order preserving union without duplicates
fn union(existing: &[String], incoming: &[String]) -> Vec<String> {
    existing.iter().chain(incoming).unique().cloned().collect()
}

fn difference(existing: &[String], removed: &[String]) -> Vec<String> {
    existing
        .iter()
        .filter(|id| !removed.contains(*id))
        .cloned()
        .collect()
}

pub fn add_timeline_note(id: &str, note_id: &str, timeline_by_id: &TimelineById) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.note_ids.push(note_id.to_string());
    })
}

pub fn add_timeline_note_to_event(
    id: &str,
    note_id: &str,
    event_id: &str,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        let existing = timeline
            .event_id_to_note_ids
            .get(event_id)
            .cloned()
            .unwrap_or_default();
        timeline.event_id_to_note_ids.insert(
            event_id.to_string(),
            union(&existing, &[note_id.to_string()]),
        );
    })
}

pub fn pin_timeline_event(id: &str, event_id: &str, timeline_by_id: &TimelineById) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.pinned_event_ids.insert(event_id.to_string(), true);
    })
}

pub fn unpin_timeline_event(
    id: &str,
    event_id: &str,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.pinned_event_ids.remove(event_id);
    })
}

pub fn set_loading_table_events(
    id: &str,
    event_ids: &[String],
    is_loading: bool,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.loading_event_ids = if is_loading {
            union(&timeline.loading_event_ids, event_ids)
        } else {
            difference(&timeline.loading_event_ids, event_ids)
        };
    })
}

/// Select or deselect rows. `is_select_all_checked` replaces the current
/// flag either way.
pub fn set_selected_table_events(
    id: &str,
    event_ids: SelectedEventIds,
    is_select_all_checked: bool,
    is_selected: bool,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        if is_selected {
            timeline.selected_event_ids = event_ids.union(timeline.selected_event_ids.clone());
        } else {
            for event_id in event_ids.keys() {
                timeline.selected_event_ids.remove(event_id);
            }
        }
        timeline.is_select_all_checked = is_select_all_checked;
    })
}

/// Mark rows as deleted (or undo it). Deleted rows drop out of the selection.
pub fn set_deleted_table_events(
    id: &str,
    event_ids: &[String],
    is_deleted: bool,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.deleted_event_ids = if is_deleted {
            union(&timeline.deleted_event_ids, event_ids)
        } else {
            difference(&timeline.deleted_event_ids, event_ids)
        };

        let deleted: HashSet<&String> = timeline.deleted_event_ids.iter().collect();
        timeline
            .selected_event_ids
            .retain(|event_id, _| !deleted.contains(event_id));

        if timeline.selected_event_ids.is_empty() {
            timeline.is_select_all_checked = false;
        }
    })
}
