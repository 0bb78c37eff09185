use enumset::EnumSet;
use serde_json::Value;

use super::*;
use crate::environment::Environment;
use crate::error::TimelineError;
use crate::view_model::*;

#[derive(Clone, Debug)]
pub enum Action {
    AddTimelineToStore {
        id: String,
        timeline: Box<TimelineModel>,
        resolve_timeline_config: Option<ResolveTimelineConfig>,
    },
    AddNewTimeline {
        input: Box<TimelinePersistInput>,
        timeline_type: TimelineType,
    },
    InitializeTimelineSettings {
        id: String,
        settings: TimelineSettings,
    },

    // Columns
    UpsertColumn {
        id: String,
        column: ColumnHeaderOptions,
        index: usize,
    },
    UpsertTableColumn {
        id: String,
        column: ColumnHeaderOptions,
        index: usize,
    },
    RemoveColumn {
        id: String,
        column_id: String,
    },
    RemoveTableColumn {
        id: String,
        column_id: String,
    },
    ApplyDeltaToColumnWidth {
        id: String,
        column_id: String,
        delta: i32,
    },
    ApplyDeltaToTableColumnWidth {
        id: String,
        column_id: String,
        delta: i32,
    },
    UpdateColumns {
        id: String,
        columns: Vec<ColumnHeaderOptions>,
    },
    UpdateTableColumns {
        id: String,
        columns: Vec<ColumnHeaderOptions>,
    },

    // Data providers
    AddProviders {
        id: String,
        providers: Vec<DataProvider>,
    },
    UpdateProviders {
        id: String,
        providers: Vec<DataProvider>,
    },
    RemoveProvider {
        id: String,
        provider_id: String,
        and_provider_id: Option<String>,
    },
    UpdateProviderEnabled {
        id: String,
        provider_id: String,
        and_provider_id: Option<String>,
        enabled: bool,
    },
    UpdateProviderExcluded {
        id: String,
        provider_id: String,
        and_provider_id: Option<String>,
        excluded: bool,
    },
    UpdateProviderProperties {
        id: String,
        provider_id: String,
        and_provider_id: Option<String>,
        properties: ProviderProperties,
    },
    UpdateProviderType {
        id: String,
        provider_id: String,
        and_provider_id: Option<String>,
        kind: DataProviderType,
    },

    // Events
    AddNote {
        id: String,
        note_id: String,
    },
    AddNoteToEvent {
        id: String,
        note_id: String,
        event_id: String,
    },
    PinEvent {
        id: String,
        event_id: String,
    },
    UnpinEvent {
        id: String,
        event_id: String,
    },
    SetEventsLoading {
        id: String,
        event_ids: Vec<String>,
        is_loading: bool,
    },
    SetSelected {
        id: String,
        event_ids: SelectedEventIds,
        is_select_all_checked: bool,
        is_selected: bool,
    },
    SetEventsDeleted {
        id: String,
        event_ids: Vec<String>,
        is_deleted: bool,
    },

    // Settings
    ShowTimeline {
        id: String,
        show: bool,
    },
    UpdateGraphEventId {
        id: String,
        graph_event_id: String,
    },
    UpdateSessionViewConfig {
        id: String,
        session_view_config: Option<SessionViewConfig>,
    },
    ApplyKqlFilterQuery {
        id: String,
        filter_query: SerializedFilterQuery,
    },
    UpdateKqlMode {
        id: String,
        kql_mode: KqlMode,
    },
    UpdateTitleAndDescription {
        id: String,
        title: String,
        description: String,
    },
    UpdateEventType {
        id: String,
        event_type: TimelineEventsType,
    },
    UpdateIsFavorite {
        id: String,
        is_favorite: bool,
    },
    UpdateRange {
        id: String,
        start: String,
        end: String,
    },
    UpdateSort {
        id: String,
        sort: Vec<SortColumn>,
    },
    UpdateTableSort {
        id: String,
        sort: Vec<SortColumn>,
    },
    UpdateItemsPerPage {
        id: String,
        items_per_page: u32,
    },
    UpdateItemsPerPageOptions {
        id: String,
        items_per_page_options: Vec<u32>,
    },
    UpdateSavedQuery {
        id: String,
        saved_query_id: Option<String>,
    },
    UpdateFilters {
        id: String,
        filters: Vec<Value>,
    },
    SetExcludedRowRendererIds {
        id: String,
        excluded_row_renderer_ids: EnumSet<RowRendererId>,
    },
    ToggleDetailPanel {
        id: String,
        toggle: ToggleDetailPanel,
    },
}

impl Action {
    /// The timeline the action is addressed to
    pub fn timeline_id(&self) -> &str {
        match self {
            Action::AddNewTimeline { input, .. } => &input.id,
            Action::AddTimelineToStore { id, .. }
            | Action::InitializeTimelineSettings { id, .. }
            | Action::UpsertColumn { id, .. }
            | Action::UpsertTableColumn { id, .. }
            | Action::RemoveColumn { id, .. }
            | Action::RemoveTableColumn { id, .. }
            | Action::ApplyDeltaToColumnWidth { id, .. }
            | Action::ApplyDeltaToTableColumnWidth { id, .. }
            | Action::UpdateColumns { id, .. }
            | Action::UpdateTableColumns { id, .. }
            | Action::AddProviders { id, .. }
            | Action::UpdateProviders { id, .. }
            | Action::RemoveProvider { id, .. }
            | Action::UpdateProviderEnabled { id, .. }
            | Action::UpdateProviderExcluded { id, .. }
            | Action::UpdateProviderProperties { id, .. }
            | Action::UpdateProviderType { id, .. }
            | Action::AddNote { id, .. }
            | Action::AddNoteToEvent { id, .. }
            | Action::PinEvent { id, .. }
            | Action::UnpinEvent { id, .. }
            | Action::SetEventsLoading { id, .. }
            | Action::SetSelected { id, .. }
            | Action::SetEventsDeleted { id, .. }
            | Action::ShowTimeline { id, .. }
            | Action::UpdateGraphEventId { id, .. }
            | Action::UpdateSessionViewConfig { id, .. }
            | Action::ApplyKqlFilterQuery { id, .. }
            | Action::UpdateKqlMode { id, .. }
            | Action::UpdateTitleAndDescription { id, .. }
            | Action::UpdateEventType { id, .. }
            | Action::UpdateIsFavorite { id, .. }
            | Action::UpdateRange { id, .. }
            | Action::UpdateSort { id, .. }
            | Action::UpdateTableSort { id, .. }
            | Action::UpdateItemsPerPage { id, .. }
            | Action::UpdateItemsPerPageOptions { id, .. }
            | Action::UpdateSavedQuery { id, .. }
            | Action::UpdateFilters { id, .. }
            | Action::SetExcludedRowRendererIds { id, .. }
            | Action::ToggleDetailPanel { id, .. } => id,
        }
    }

    /// Whether the action may add a timeline that isn't stored yet
    fn creates_timeline(&self) -> bool {
        matches!(
            self,
            Action::AddTimelineToStore { .. }
                | Action::AddNewTimeline { .. }
                | Action::InitializeTimelineSettings { .. }
        )
    }
}

pub fn reduce(
    action: Action,
    state: &TimelineById,
    environment: &Environment,
) -> Result<TimelineById, TimelineError> {
    log::trace!("{action:?}");
    if !action.creates_timeline() && !state.contains_key(action.timeline_id()) {
        return Err(TimelineError::UnknownTimeline(
            action.timeline_id().to_string(),
        ));
    }

    let next = match action {
        Action::AddTimelineToStore {
            id,
            timeline,
            resolve_timeline_config,
        } => add_timeline_to_store(&id, *timeline, resolve_timeline_config, environment, state),
        Action::AddNewTimeline {
            input,
            timeline_type,
        } => add_new_timeline(*input, timeline_type, environment, state),
        Action::InitializeTimelineSettings { id, settings } => {
            set_initialize_timeline_settings(&id, &settings, environment, state)
        }
        Action::UpsertColumn { id, column, index }
        | Action::UpsertTableColumn { id, column, index } => {
            upsert_column(&id, column, index, state)
        }
        Action::RemoveColumn { id, column_id } | Action::RemoveTableColumn { id, column_id } => {
            remove_column(&id, &column_id, state)
        }
        Action::ApplyDeltaToColumnWidth {
            id,
            column_id,
            delta,
        }
        | Action::ApplyDeltaToTableColumnWidth {
            id,
            column_id,
            delta,
        } => apply_delta_to_column_width(&id, &column_id, delta, &environment.config, state),
        Action::UpdateColumns { id, columns } | Action::UpdateTableColumns { id, columns } => {
            update_columns(&id, columns, state)
        }
        Action::AddProviders { id, providers } => add_timeline_providers(&id, providers, state),
        Action::UpdateProviders { id, providers } => {
            update_timeline_providers(&id, providers, state)
        }
        Action::RemoveProvider {
            id,
            provider_id,
            and_provider_id,
        } => remove_timeline_provider(&id, &provider_id, and_provider_id.as_deref(), state),
        Action::UpdateProviderEnabled {
            id,
            provider_id,
            and_provider_id,
            enabled,
        } => update_timeline_provider_enabled(
            &id,
            &provider_id,
            and_provider_id.as_deref(),
            enabled,
            state,
        ),
        Action::UpdateProviderExcluded {
            id,
            provider_id,
            and_provider_id,
            excluded,
        } => update_timeline_provider_excluded(
            &id,
            &provider_id,
            and_provider_id.as_deref(),
            excluded,
            state,
        ),
        Action::UpdateProviderProperties {
            id,
            provider_id,
            and_provider_id,
            properties,
        } => update_timeline_provider_properties(
            &id,
            &provider_id,
            and_provider_id.as_deref(),
            properties,
            state,
        ),
        Action::UpdateProviderType {
            id,
            provider_id,
            and_provider_id,
            kind,
        } => update_timeline_provider_type(
            &id,
            &provider_id,
            and_provider_id.as_deref(),
            kind,
            state,
        ),
        Action::AddNote { id, note_id } => add_timeline_note(&id, &note_id, state),
        Action::AddNoteToEvent {
            id,
            note_id,
            event_id,
        } => add_timeline_note_to_event(&id, &note_id, &event_id, state),
        Action::PinEvent { id, event_id } => pin_timeline_event(&id, &event_id, state),
        Action::UnpinEvent { id, event_id } => unpin_timeline_event(&id, &event_id, state),
        Action::SetEventsLoading {
            id,
            event_ids,
            is_loading,
        } => set_loading_table_events(&id, &event_ids, is_loading, state),
        Action::SetSelected {
            id,
            event_ids,
            is_select_all_checked,
            is_selected,
        } => set_selected_table_events(&id, event_ids, is_select_all_checked, is_selected, state),
        Action::SetEventsDeleted {
            id,
            event_ids,
            is_deleted,
        } => set_deleted_table_events(&id, &event_ids, is_deleted, state),
        Action::ShowTimeline { id, show } => update_timeline_show_timeline(&id, show, state),
        Action::UpdateGraphEventId { id, graph_event_id } => {
            update_timeline_graph_event_id(&id, &graph_event_id, state)
        }
        Action::UpdateSessionViewConfig {
            id,
            session_view_config,
        } => update_timeline_session_view_config(&id, session_view_config, state),
        Action::ApplyKqlFilterQuery { id, filter_query } => {
            apply_kql_filter_query_draft(&id, filter_query, state)
        }
        Action::UpdateKqlMode { id, kql_mode } => update_timeline_kql_mode(&id, kql_mode, state),
        Action::UpdateTitleAndDescription {
            id,
            title,
            description,
        } => update_timeline_title_and_description(&id, &title, &description, state),
        Action::UpdateEventType { id, event_type } => {
            update_timeline_event_type(&id, event_type, state)
        }
        Action::UpdateIsFavorite { id, is_favorite } => {
            update_timeline_is_favorite(&id, is_favorite, state)
        }
        Action::UpdateRange { id, start, end } => update_timeline_range(&id, &start, &end, state),
        Action::UpdateSort { id, sort } | Action::UpdateTableSort { id, sort } => {
            update_timeline_sort(&id, sort, state)
        }
        Action::UpdateItemsPerPage { id, items_per_page } => {
            update_timeline_items_per_page(&id, items_per_page, state)
        }
        Action::UpdateItemsPerPageOptions {
            id,
            items_per_page_options,
        } => update_timeline_per_page_options(&id, items_per_page_options, state),
        Action::UpdateSavedQuery { id, saved_query_id } => {
            update_saved_query(&id, saved_query_id, state)
        }
        Action::UpdateFilters { id, filters } => update_filters(&id, filters, state),
        Action::SetExcludedRowRendererIds {
            id,
            excluded_row_renderer_ids,
        } => update_excluded_row_renderers_ids(&id, excluded_row_renderer_ids, state),
        Action::ToggleDetailPanel { id, toggle } => {
            toggle_timeline_details_panel(&id, &toggle, state)
        }
    };
    Ok(next)
}
