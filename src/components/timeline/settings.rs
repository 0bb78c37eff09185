use std::str::FromStr;

use enumset::EnumSet;
use serde_json::Value;

use super::update_timeline;
use crate::view_model::{
    DateRange, ExpandedDetail, ExpandedDetailType, KqlMode, PanelView, RowRendererId,
    SerializedFilterQuery, SessionViewConfig, SortColumn, TimelineById, TimelineEventsType,
    ToggleDetailPanel, ACTIVE_TIMELINE_ID,
};

pub fn update_timeline_show_timeline(
    id: &str,
    show: bool,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| timeline.show = show)
}

/// Closing the graph of the active timeline also brings back the tab that
/// was open before it.
pub fn update_timeline_graph_event_id(
    id: &str,
    graph_event_id: &str,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.graph_event_id = graph_event_id.to_string();
        if graph_event_id.is_empty() && id == ACTIVE_TIMELINE_ID {
            std::mem::swap(&mut timeline.active_tab, &mut timeline.prev_active_tab);
        }
    })
}

pub fn update_timeline_session_view_config(
    id: &str,
    session_view_config: Option<SessionViewConfig>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.session_view_config = session_view_config;
    })
}

pub fn apply_kql_filter_query_draft(
    id: &str,
    filter_query: SerializedFilterQuery,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.kql_query.filter_query = Some(filter_query);
    })
}

pub fn update_timeline_kql_mode(
    id: &str,
    kql_mode: KqlMode,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| timeline.kql_mode = kql_mode)
}

pub fn update_timeline_title_and_description(
    id: &str,
    title: &str,
    description: &str,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.title = title.trim().to_string();
        timeline.description = description.trim().to_string();
    })
}

pub fn update_timeline_event_type(
    id: &str,
    event_type: TimelineEventsType,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.event_type = event_type
    })
}

pub fn update_timeline_is_favorite(
    id: &str,
    is_favorite: bool,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.is_favorite = is_favorite
    })
}

pub fn update_timeline_range(
    id: &str,
    start: &str,
    end: &str,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.date_range = DateRange {
            start: start.to_string(),
            end: end.to_string(),
        };
    })
}

pub fn update_timeline_sort(
    id: &str,
    sort: Vec<SortColumn>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| timeline.sort = sort)
}

pub fn update_timeline_items_per_page(
    id: &str,
    items_per_page: u32,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.items_per_page = items_per_page
    })
}

pub fn update_timeline_per_page_options(
    id: &str,
    items_per_page_options: Vec<u32>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.items_per_page_options = items_per_page_options
    })
}

pub fn update_saved_query(
    id: &str,
    saved_query_id: Option<String>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.saved_query_id = saved_query_id
    })
}

pub fn update_filters(id: &str, filters: Vec<Value>, timeline_by_id: &TimelineById) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| timeline.filters = filters)
}

pub fn update_excluded_row_renderers_ids(
    id: &str,
    excluded_row_renderer_ids: EnumSet<RowRendererId>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.excluded_row_renderer_ids = excluded_row_renderer_ids
    })
}

/// The detail flyout for the requested tab (query by default). Unknown panel
/// views close the flyout.
pub fn update_timeline_details_panel(toggle: &ToggleDetailPanel) -> ExpandedDetail {
    let tab_type = toggle.tab_type.unwrap_or_default();
    let panel_view = toggle
        .panel_view
        .as_deref()
        .and_then(|view| PanelView::from_str(view).ok());

    let detail = match panel_view {
        Some(panel_view) => ExpandedDetailType {
            panel_view: Some(panel_view),
            params: Some(toggle.params.clone().unwrap_or_default()),
        },
        None => ExpandedDetailType::default(),
    };
    im::hashmap! { tab_type => detail }
}

/// Open or close the detail flyout of one tab, the other tabs keep theirs
pub fn toggle_timeline_details_panel(
    id: &str,
    toggle: &ToggleDetailPanel,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    let expanded_detail = update_timeline_details_panel(toggle);
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.expanded_detail = expanded_detail.union(timeline.expanded_detail.clone());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::view_model::{Direction, TimelineTab};
    use serde_json::json;

    #[test]
    fn simple_settings() {
        let timelines = timeline_by_id(&["test", "other"]);
        let updated = update_timeline_show_timeline("test", true, &timelines);
        let updated = update_timeline_is_favorite("test", true, &updated);
        let updated = update_timeline_kql_mode("test", KqlMode::Search, &updated);
        let updated = update_timeline_event_type("test", TimelineEventsType::Alert, &updated);
        let updated = update_timeline_items_per_page("test", 100, &updated);
        let updated = update_timeline_per_page_options("test", vec![5, 10], &updated);
        let updated = update_saved_query("test", Some("query-1".to_string()), &updated);
        let updated = update_timeline_range(
            "test",
            "2023-01-01T00:00:00.000Z",
            "2023-01-02T00:00:00.000Z",
            &updated,
        );
        let timeline = &updated["test"];
        assert!(timeline.show);
        assert!(timeline.is_favorite);
        assert_eq!(timeline.kql_mode, KqlMode::Search);
        assert_eq!(timeline.event_type, TimelineEventsType::Alert);
        assert_eq!(timeline.items_per_page, 100);
        assert_eq!(timeline.items_per_page_options, vec![5, 10]);
        assert_eq!(timeline.saved_query_id.as_deref(), Some("query-1"));
        assert_eq!(timeline.date_range.end, "2023-01-02T00:00:00.000Z");
        assert_eq!(updated["other"], timelines["other"]);
    }

    #[test]
    fn title_and_description_are_trimmed() {
        let timelines = timeline_by_id(&["test"]);
        let updated =
            update_timeline_title_and_description("test", "  Lateral  ", "\tnotes\n", &timelines);
        assert_eq!(updated["test"].title, "Lateral");
        assert_eq!(updated["test"].description, "notes");
    }

    #[test]
    fn closing_the_graph_restores_the_previous_tab() {
        let timelines = with_timeline(ACTIVE_TIMELINE_ID, |t| {
            t.active_tab = TimelineTab::Graph;
            t.prev_active_tab = TimelineTab::Notes;
            t.graph_event_id = "e1".to_string();
        });
        let updated = update_timeline_graph_event_id(ACTIVE_TIMELINE_ID, "", &timelines);
        let timeline = &updated[ACTIVE_TIMELINE_ID];
        assert_eq!(timeline.graph_event_id, "");
        assert_eq!(timeline.active_tab, TimelineTab::Notes);
        assert_eq!(timeline.prev_active_tab, TimelineTab::Graph);
    }

    #[test]
    fn graph_of_other_timelines_keeps_tabs() {
        let timelines = with_timeline("test", |t| {
            t.active_tab = TimelineTab::Graph;
            t.prev_active_tab = TimelineTab::Notes;
        });
        let updated = update_timeline_graph_event_id("test", "", &timelines);
        assert_eq!(updated["test"].active_tab, TimelineTab::Graph);
        let updated = update_timeline_graph_event_id("test", "e2", &updated);
        assert_eq!(updated["test"].graph_event_id, "e2");
    }

    #[test]
    fn kql_draft_and_filters() {
        let timelines = timeline_by_id(&["test"]);
        let draft = SerializedFilterQuery {
            kuery: None,
            serialized_query: "host.name: *".to_string(),
        };
        let updated = apply_kql_filter_query_draft("test", draft.clone(), &timelines);
        let updated = update_filters("test", vec![json!({ "meta": { "disabled": false } })], &updated);
        let updated = update_timeline_sort(
            "test",
            vec![SortColumn {
                column_id: "host.name".to_string(),
                column_type: "keyword".to_string(),
                es_types: vec![],
                sort_direction: Direction::Asc,
            }],
            &updated,
        );
        assert_eq!(updated["test"].kql_query.filter_query, Some(draft));
        assert_eq!(updated["test"].filters.len(), 1);
        assert_eq!(updated["test"].sort[0].sort_direction, Direction::Asc);
    }

    #[test]
    fn session_view_and_row_renderers() {
        let timelines = timeline_by_id(&["test"]);
        let config = SessionViewConfig {
            session_entity_id: "session".to_string(),
            ..Default::default()
        };
        let updated = update_timeline_session_view_config("test", Some(config.clone()), &timelines);
        let updated = update_excluded_row_renderers_ids(
            "test",
            RowRendererId::Netflow | RowRendererId::Zeek,
            &updated,
        );
        assert_eq!(updated["test"].session_view_config, Some(config));
        assert!(updated["test"]
            .excluded_row_renderer_ids
            .contains(RowRendererId::Zeek));
        let updated = update_timeline_session_view_config("test", None, &updated);
        assert_eq!(updated["test"].session_view_config, None);
    }

    #[test]
    fn details_panel_for_known_views() {
        let mut params = serde_json::Map::new();
        params.insert("hostName".to_string(), json!("web-01"));
        let toggle = ToggleDetailPanel {
            tab_type: Some(TimelineTab::Pinned),
            id: Some("test".to_string()),
            panel_view: Some("hostDetail".to_string()),
            params: Some(params.clone()),
        };
        let detail = update_timeline_details_panel(&toggle);
        assert_eq!(detail.len(), 1);
        let pinned = &detail[&TimelineTab::Pinned];
        assert_eq!(pinned.panel_view, Some(PanelView::HostDetail));
        assert_eq!(pinned.params, Some(params));
    }

    #[test]
    fn details_panel_closes_for_unknown_views() {
        let toggle = ToggleDetailPanel {
            panel_view: Some("treeDetail".to_string()),
            ..Default::default()
        };
        let detail = update_timeline_details_panel(&toggle);
        assert!(detail[&TimelineTab::Query].is_empty());

        let detail = update_timeline_details_panel(&ToggleDetailPanel::default());
        assert!(detail[&TimelineTab::Query].is_empty());
    }

    #[test]
    fn toggle_keeps_other_tabs() {
        let timelines = timeline_by_id(&["test"]);
        let open = ToggleDetailPanel {
            tab_type: Some(TimelineTab::Notes),
            panel_view: Some("eventDetail".to_string()),
            ..Default::default()
        };
        let updated = toggle_timeline_details_panel("test", &open, &timelines);
        let close = ToggleDetailPanel::default();
        let updated = toggle_timeline_details_panel("test", &close, &updated);
        let detail = &updated["test"].expanded_detail;
        assert_eq!(detail.len(), 2);
        assert_eq!(
            detail[&TimelineTab::Notes].panel_view,
            Some(PanelView::EventDetail)
        );
        assert!(detail[&TimelineTab::Query].is_empty());
    }
}
