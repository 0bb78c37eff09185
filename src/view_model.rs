use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

/// All timelines the UI knows about, keyed by timeline id. Cloning is cheap
/// and untouched entries are shared between snapshots.
pub type TimelineById = im::HashMap<String, TimelineModel>;

/// The expanded detail panel per timeline tab
pub type ExpandedDetail = im::HashMap<TimelineTab, ExpandedDetailType>;

/// Selected rows, keyed by event id
pub type SelectedEventIds = im::HashMap<String, Vec<TimelineNonEcsData>>;

/// The timeline living in the bottom flyout
pub const ACTIVE_TIMELINE_ID: &str = "timeline-1";

#[derive(
    Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Hash, Default, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimelineTab {
    #[default]
    Query,
    Graph,
    Notes,
    Pinned,
    Eql,
    Session,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimelineType {
    #[default]
    Default,
    Template,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimelineStatus {
    Active,
    #[default]
    Draft,
    Immutable,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimelineEventsType {
    #[default]
    All,
    Raw,
    Alert,
    Signal,
    Custom,
    Eql,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KqlMode {
    #[default]
    Filter,
    Search,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

// Data Providers

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
pub enum QueryOperator {
    #[default]
    #[serde(rename = ":")]
    Is,
    #[serde(rename = ":*")]
    Exists,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataProviderType {
    #[default]
    Default,
    Template,
}

/// A query value is either free text or a number
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum QueryValue {
    Number(f64),
    Text(String),
}

impl Default for QueryValue {
    fn default() -> Self {
        QueryValue::Text(String::new())
    }
}

impl std::fmt::Display for QueryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryValue::Number(n) => write!(f, "{n}"),
            QueryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Number(value)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryMatch {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    pub value: QueryValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<QueryValue>,
    pub operator: QueryOperator,
}

impl QueryMatch {
    pub fn new(field: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Two matches describe the same condition if field, value and operator
    /// agree. The display variants are ignored.
    pub fn same_condition(&self, other: &QueryMatch) -> bool {
        self.field == other.field && self.value == other.value && self.operator == other.operator
    }
}

/// A single filter condition of a timeline. It can carry a list of
/// AND-linked conditions, which themselves can't nest any further.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataProvider {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub excluded: bool,
    pub kql_query: String,
    pub query_match: QueryMatch,
    #[serde(rename = "type", default)]
    pub kind: DataProviderType,
    #[serde(default)]
    pub and: Vec<DataProviderAnd>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataProviderAnd {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub excluded: bool,
    pub kql_query: String,
    pub query_match: QueryMatch,
    #[serde(rename = "type", default)]
    pub kind: DataProviderType,
}

impl DataProvider {
    pub fn new(id: impl Into<String>, query_match: QueryMatch) -> Self {
        let name = query_match.value.to_string();
        Self {
            id: id.into(),
            name,
            enabled: true,
            query_match,
            ..Default::default()
        }
    }

    pub fn with_and(mut self, and: Vec<DataProviderAnd>) -> Self {
        self.and = and;
        self
    }

    /// Drops the AND list
    pub fn into_and(self) -> DataProviderAnd {
        DataProviderAnd {
            id: self.id,
            name: self.name,
            enabled: self.enabled,
            excluded: self.excluded,
            kql_query: self.kql_query,
            query_match: self.query_match,
            kind: self.kind,
        }
    }
}

impl DataProviderAnd {
    /// Promote an AND condition to a top level provider
    pub fn into_provider(self, and: Vec<DataProviderAnd>) -> DataProvider {
        DataProvider {
            id: self.id,
            name: self.name,
            enabled: self.enabled,
            excluded: self.excluded,
            kql_query: self.kql_query,
            query_match: self.query_match,
            kind: self.kind,
            and,
        }
    }
}

/// Mutable view on the fields both provider levels share
pub struct ProviderPartsMut<'a> {
    pub name: &'a mut String,
    pub enabled: &'a mut bool,
    pub excluded: &'a mut bool,
    pub kind: &'a mut DataProviderType,
    pub query_match: &'a mut QueryMatch,
}

pub trait ProviderFields {
    fn id(&self) -> &str;
    fn query_match(&self) -> &QueryMatch;
    fn parts_mut(&mut self) -> ProviderPartsMut<'_>;
}

impl ProviderFields for DataProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn query_match(&self) -> &QueryMatch {
        &self.query_match
    }

    fn parts_mut(&mut self) -> ProviderPartsMut<'_> {
        ProviderPartsMut {
            name: &mut self.name,
            enabled: &mut self.enabled,
            excluded: &mut self.excluded,
            kind: &mut self.kind,
            query_match: &mut self.query_match,
        }
    }
}

impl ProviderFields for DataProviderAnd {
    fn id(&self) -> &str {
        &self.id
    }

    fn query_match(&self) -> &QueryMatch {
        &self.query_match
    }

    fn parts_mut(&mut self) -> ProviderPartsMut<'_> {
        ProviderPartsMut {
            name: &mut self.name,
            enabled: &mut self.enabled,
            excluded: &mut self.excluded,
            kind: &mut self.kind,
            query_match: &mut self.query_match,
        }
    }
}

// Columns

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnHeaderType {
    #[default]
    NotFiltered,
    TextFilter,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeaderOptions {
    pub column_header_type: ColumnHeaderType,
    pub id: String,
    /// Width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_types: Option<Vec<String>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregatable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_as_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sortable: Option<bool>,
}

impl ColumnHeaderOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.initial_width = Some(width);
        self
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SortColumn {
    pub column_id: String,
    pub column_type: String,
    #[serde(default)]
    pub es_types: Vec<String>,
    pub sort_direction: Direction,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct DateRange {
    /// ISO-8601 timestamp
    pub start: String,
    /// ISO-8601 timestamp
    pub end: String,
}

// Queries

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryLanguage {
    #[default]
    Kuery,
    Lucene,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct KueryFilterQuery {
    pub kind: QueryLanguage,
    pub expression: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SerializedFilterQuery {
    pub kuery: Option<KueryFilterQuery>,
    pub serialized_query: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KqlQuery {
    pub filter_query: Option<SerializedFilterQuery>,
}

// Event state

/// Non-ECS field values that came with a selected row
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct TimelineNonEcsData {
    pub field: String,
    pub value: Option<Vec<String>>,
}

#[derive(EnumSetType, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[enumset(serialize_repr = "list")]
pub enum RowRendererId {
    Alert,
    Alerts,
    Auditd,
    AuditdFile,
    Library,
    Netflow,
    Plain,
    Registry,
    Suricata,
    System,
    SystemDns,
    SystemEndgameProcess,
    SystemFile,
    SystemFim,
    SystemSecurityEvent,
    SystemSocket,
    ThreatMatch,
    Zeek,
}

// Detail panel

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PanelView {
    EventDetail,
    HostDetail,
    NetworkDetail,
    UserDetail,
}

/// What is shown in the flyout of one tab. An empty value means the flyout
/// is closed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedDetailType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_view: Option<PanelView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

impl ExpandedDetailType {
    pub fn is_empty(&self) -> bool {
        self.panel_view.is_none() && self.params.is_none()
    }
}

/// Request to open or close a detail flyout
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleDetailPanel {
    pub tab_type: Option<TimelineTab>,
    /// The timeline the panel belongs to
    pub id: Option<String>,
    /// Kept as the raw string the UI sent, unknown views close the panel
    pub panel_view: Option<String>,
    pub params: Option<Map<String, Value>>,
}

// Session view

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionViewConfig {
    pub session_entity_id: String,
    pub jump_to_entity_id: Option<String>,
    pub jump_to_cursor: Option<String>,
    pub investigated_alert_id: Option<String>,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ResolveOutcome {
    ExactMatch,
    AliasMatch,
    Conflict,
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTimelineConfig {
    pub outcome: ResolveOutcome,
    pub alias_target_id: Option<String>,
    pub alias_purpose: Option<String>,
}

// The Timeline

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineModel {
    pub id: String,
    pub active_tab: TimelineTab,
    pub prev_active_tab: TimelineTab,
    pub columns: Vec<ColumnHeaderOptions>,
    pub default_columns: Vec<ColumnHeaderOptions>,
    pub data_providers: Vec<DataProvider>,
    pub data_view_id: Option<String>,
    pub date_range: DateRange,
    /// Ordered, no duplicates
    pub deleted_event_ids: Vec<String>,
    pub description: String,
    pub document_type: String,
    pub event_type: TimelineEventsType,
    pub event_id_to_note_ids: im::HashMap<String, Vec<String>>,
    pub excluded_row_renderer_ids: EnumSet<RowRendererId>,
    pub expanded_detail: ExpandedDetail,
    /// Filter-bar filters. Their shape belongs to the query layer
    pub filters: Vec<Value>,
    pub footer_text: String,
    pub graph_event_id: String,
    /// If set, dropped providers are AND-linked to this provider
    pub highlighted_drop_and_provider_id: String,
    pub index_names: Vec<String>,
    pub initialized: bool,
    pub is_favorite: bool,
    pub is_live: bool,
    pub is_loading: bool,
    pub is_saving: bool,
    pub is_select_all_checked: bool,
    pub items_per_page: u32,
    pub items_per_page_options: Vec<u32>,
    pub kql_mode: KqlMode,
    pub kql_query: KqlQuery,
    pub loading_event_ids: Vec<String>,
    pub loading_text: String,
    pub note_ids: Vec<String>,
    pub pinned_event_ids: im::HashMap<String, bool>,
    pub query_fields: Vec<String>,
    pub resolve_timeline_config: Option<ResolveTimelineConfig>,
    pub saved_object_id: Option<String>,
    pub saved_query_id: Option<String>,
    pub select_all: bool,
    pub selected_event_ids: SelectedEventIds,
    pub session_view_config: Option<SessionViewConfig>,
    pub show: bool,
    pub show_checkboxes: bool,
    pub sort: Vec<SortColumn>,
    pub status: TimelineStatus,
    pub template_timeline_id: Option<String>,
    pub template_timeline_version: Option<u32>,
    pub timeline_type: TimelineType,
    pub title: String,
    pub version: Option<String>,
}

impl TimelineModel {
    pub fn is_template(&self) -> bool {
        self.timeline_type == TimelineType::Template
    }

    pub fn is_immutable_template(&self) -> bool {
        self.is_template() && self.status == TimelineStatus::Immutable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;

    fn populated_timeline() -> TimelineModel {
        let mut count = and_provider("b", "destination.port", "");
        count.query_match.value = QueryValue::Number(443.0);
        count.query_match.operator = QueryOperator::Exists;
        TimelineModel {
            data_providers: vec![provider("a", "host.name", "x").with_and(vec![count])],
            excluded_row_renderer_ids: RowRendererId::Zeek | RowRendererId::Netflow,
            expanded_detail: im::hashmap! {
                TimelineTab::Notes => ExpandedDetailType {
                    panel_view: Some(PanelView::HostDetail),
                    params: None,
                }
            },
            ..mock_timeline("test")
        }
    }

    #[test]
    fn timelines_use_the_ui_json_names() {
        let json = serde_json::to_value(populated_timeline()).unwrap();
        let provider = &json["dataProviders"][0];
        assert_eq!(provider["type"], "default");
        assert_eq!(provider["queryMatch"]["operator"], ":");
        assert_eq!(provider["queryMatch"]["value"], "x");
        assert_eq!(provider["and"][0]["queryMatch"]["operator"], ":*");
        assert_eq!(provider["and"][0]["queryMatch"]["value"], 443.0);
        assert_eq!(json["excludedRowRendererIds"], json!(["netflow", "zeek"]));
        assert_eq!(
            json["expandedDetail"],
            json!({ "notes": { "panelView": "hostDetail" } })
        );
        assert_eq!(json["columns"][0]["type"], "date");
        assert_eq!(json["columns"][0]["columnHeaderType"], "not-filtered");
        assert_eq!(json["timelineType"], "default");
        assert_eq!(json["status"], "draft");
    }

    #[test]
    fn timelines_read_back_from_json() {
        let timeline = populated_timeline();
        let json = serde_json::to_string(&timeline).unwrap();
        let read: TimelineModel = serde_json::from_str(&json).unwrap();
        assert_eq!(read, timeline);
        assert_eq!(
            read.data_providers[0].and[0].query_match.value,
            QueryValue::Number(443.0)
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let read: TimelineModel =
            serde_json::from_str(r#"{ "id": "test", "kqlMode": "search" }"#).unwrap();
        assert_eq!(read.id, "test");
        assert_eq!(read.kql_mode, KqlMode::Search);
        assert!(read.data_providers.is_empty());
        assert!(read.excluded_row_renderer_ids.is_empty());
    }
}
