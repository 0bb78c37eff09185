use enumset::EnumSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::environment::defaults::{default_sort, manage_defaults, timeline_defaults};
use crate::environment::Environment;
use crate::view_model::*;

/// Switching the active timeline to another saved object invalidates the
/// page and flyout state that lives outside of the store.
pub fn should_reset_active_timeline_context(
    id: &str,
    old_timeline: Option<&TimelineModel>,
    new_timeline: &TimelineModel,
) -> bool {
    id == ACTIVE_TIMELINE_ID
        && old_timeline.and_then(|t| t.saved_object_id.as_deref())
            != new_timeline.saved_object_id.as_deref()
}

/// Put a timeline that was loaded from a saved object into the store.
/// Loading state and initialization of the record it replaces are kept.
pub fn add_timeline_to_store(
    id: &str,
    timeline: TimelineModel,
    resolve_timeline_config: Option<ResolveTimelineConfig>,
    environment: &Environment,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    let previous = timeline_by_id.get(id);
    if should_reset_active_timeline_context(id, previous, &timeline) {
        log::debug!("active timeline switched to {:?}", timeline.saved_object_id);
        environment.active_timeline.reset_active_page();
        environment.active_timeline.reset_expanded_detail();
    }

    let mut timeline = timeline;
    if let Some(previous) = previous {
        timeline.is_loading = previous.is_loading;
        timeline.initialized = previous.initialized;
    }
    timeline.resolve_timeline_config = resolve_timeline_config;
    if timeline.is_immutable_template() {
        timeline.date_range = environment.default_date_range();
    }
    timeline_by_id.update(id.to_string(), timeline)
}

/// The parts of a timeline a caller can choose when creating one
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelinePersistInput {
    pub id: String,
    pub columns: Option<Vec<ColumnHeaderOptions>>,
    pub data_providers: Option<Vec<DataProvider>>,
    pub data_view_id: Option<String>,
    pub date_range: Option<DateRange>,
    pub excluded_row_renderer_ids: Option<EnumSet<RowRendererId>>,
    pub expanded_detail: Option<ExpandedDetail>,
    pub filters: Option<Vec<Value>>,
    pub index_names: Option<Vec<String>>,
    pub items_per_page: Option<u32>,
    pub kql_query: Option<KqlQuery>,
    pub show: Option<bool>,
    pub show_checkboxes: Option<bool>,
    pub sort: Option<Vec<SortColumn>>,
    pub template_timeline_id: Option<String>,
    pub template_timeline_version: Option<u32>,
}

/// Adds a new, unsaved timeline. Whatever was stored under the id is
/// replaced by the defaults; only its initialization survives.
pub fn add_new_timeline(
    input: TimelinePersistInput,
    timeline_type: TimelineType,
    environment: &Environment,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    let TimelinePersistInput {
        id,
        columns,
        data_providers,
        data_view_id,
        date_range,
        excluded_row_renderer_ids,
        expanded_detail,
        filters,
        index_names,
        items_per_page,
        kql_query,
        show,
        show_checkboxes,
        sort,
        template_timeline_id,
        template_timeline_version,
    } = input;

    let defaults = timeline_defaults(environment);
    let mut timeline = TimelineModel {
        id: id.clone(),
        columns: columns.unwrap_or(defaults.columns.clone()),
        data_providers: data_providers.unwrap_or_default(),
        data_view_id: data_view_id.or(defaults.data_view_id.clone()),
        date_range: date_range.unwrap_or_else(|| environment.default_date_range()),
        excluded_row_renderer_ids: excluded_row_renderer_ids
            .unwrap_or(defaults.excluded_row_renderer_ids),
        expanded_detail: expanded_detail.unwrap_or_default(),
        filters: filters.unwrap_or_default(),
        index_names: index_names.unwrap_or_default(),
        items_per_page: items_per_page.unwrap_or(defaults.items_per_page),
        kql_query: kql_query.unwrap_or_default(),
        show: show.unwrap_or(defaults.show),
        show_checkboxes: show_checkboxes.unwrap_or(defaults.show_checkboxes),
        sort: sort.unwrap_or(defaults.sort.clone()),
        template_timeline_id,
        template_timeline_version,
        initialized: timeline_by_id
            .get(&id)
            .map(|t| t.initialized)
            .unwrap_or_default(),
        saved_object_id: None,
        version: None,
        is_saving: false,
        is_loading: false,
        timeline_type,
        ..defaults
    };

    if timeline_type == TimelineType::Template {
        timeline.template_timeline_id = Some(uuid::Uuid::new_v4().to_string());
        timeline.template_timeline_version = Some(1);
    }

    timeline_by_id.update(id, timeline)
}

/// Settings a page hands to the timelines it manages
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineSettings {
    pub default_columns: Option<Vec<ColumnHeaderOptions>>,
    pub document_type: Option<String>,
    pub excluded_row_renderer_ids: Option<EnumSet<RowRendererId>>,
    pub footer_text: Option<String>,
    pub loading_text: Option<String>,
    pub query_fields: Option<Vec<String>>,
    pub select_all: Option<bool>,
    pub show_checkboxes: Option<bool>,
    pub sort: Option<Vec<SortColumn>>,
    pub title: Option<String>,
}

impl TimelineSettings {
    fn apply(&self, timeline: &mut TimelineModel) {
        if let Some(default_columns) = &self.default_columns {
            timeline.default_columns = default_columns.clone();
        }
        if let Some(document_type) = &self.document_type {
            timeline.document_type = document_type.clone();
        }
        if let Some(excluded) = self.excluded_row_renderer_ids {
            timeline.excluded_row_renderer_ids = excluded;
        }
        if let Some(footer_text) = &self.footer_text {
            timeline.footer_text = footer_text.clone();
        }
        if let Some(loading_text) = &self.loading_text {
            timeline.loading_text = loading_text.clone();
        }
        if let Some(query_fields) = &self.query_fields {
            timeline.query_fields = query_fields.clone();
        }
        if let Some(select_all) = self.select_all {
            timeline.select_all = select_all;
        }
        if let Some(show_checkboxes) = self.show_checkboxes {
            timeline.show_checkboxes = show_checkboxes;
        }
        if let Some(title) = &self.title {
            timeline.title = title.clone();
        }
    }
}

/// Set up a timeline the first time a page shows it. Initialized timelines
/// are left alone.
pub fn set_initialize_timeline_settings(
    id: &str,
    settings: &TimelineSettings,
    environment: &Environment,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    let existing = timeline_by_id.get(id);
    if existing.map(|t| t.initialized).unwrap_or_default() {
        return timeline_by_id.clone();
    }

    let use_default_columns = match existing {
        None => true,
        Some(timeline) => {
            timeline.columns.is_empty()
                && settings
                    .default_columns
                    .as_ref()
                    .map(|c| !c.is_empty())
                    .unwrap_or_default()
        }
    };

    let mut timeline = existing
        .cloned()
        .unwrap_or_else(|| manage_defaults(id, environment));
    settings.apply(&mut timeline);
    if use_default_columns {
        if let Some(default_columns) = &settings.default_columns {
            timeline.columns = default_columns.clone();
        }
    }
    timeline.sort = settings.sort.clone().unwrap_or_else(default_sort);
    timeline.loading_event_ids = Vec::new();
    timeline.initialized = true;

    timeline_by_id.update(id.to_string(), timeline)
}
