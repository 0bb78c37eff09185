use super::types::{DEFAULT_COLUMN_MIN_WIDTH, DEFAULT_DATE_COLUMN_MIN_WIDTH};
use super::Environment;
use crate::view_model::*;

lazy_static::lazy_static! {
    /// Columns of a fresh timeline
    pub static ref DEFAULT_HEADERS: Vec<ColumnHeaderOptions> = {
        let mut headers = vec![ColumnHeaderOptions {
            es_types: Some(vec!["date".to_string()]),
            column_type: Some("date".to_string()),
            ..ColumnHeaderOptions::new("@timestamp").with_width(DEFAULT_DATE_COLUMN_MIN_WIDTH)
        }];
        headers.extend(
            [
                "message",
                "event.category",
                "event.action",
                "host.name",
                "source.ip",
                "destination.ip",
                "user.name",
            ]
            .into_iter()
            .map(|id| ColumnHeaderOptions::new(id).with_width(DEFAULT_COLUMN_MIN_WIDTH)),
        );
        headers
    };
}

pub fn default_sort() -> Vec<SortColumn> {
    vec![SortColumn {
        column_id: "@timestamp".to_string(),
        column_type: "date".to_string(),
        es_types: vec!["date".to_string()],
        sort_direction: Direction::Desc,
    }]
}

/// The values every timeline starts from
pub fn timeline_defaults(environment: &Environment) -> TimelineModel {
    let config = &environment.config;
    TimelineModel {
        columns: DEFAULT_HEADERS.clone(),
        default_columns: DEFAULT_HEADERS.clone(),
        date_range: environment.default_date_range(),
        items_per_page: config.items_per_page,
        items_per_page_options: config.items_per_page_options.clone(),
        sort: default_sort(),
        ..Default::default()
    }
}

/// Defaults for timelines that are managed by a page (alert tables and the
/// like) rather than opened by the user
pub fn manage_defaults(id: &str, environment: &Environment) -> TimelineModel {
    TimelineModel {
        id: id.to_string(),
        loading_text: crate::loc!("Loading events").to_string(),
        ..timeline_defaults(environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_leads_the_default_headers() {
        assert_eq!(DEFAULT_HEADERS.len(), 8);
        assert_eq!(DEFAULT_HEADERS[0].id, "@timestamp");
        assert_eq!(
            DEFAULT_HEADERS[0].initial_width,
            Some(DEFAULT_DATE_COLUMN_MIN_WIDTH)
        );
        assert!(DEFAULT_HEADERS[1..]
            .iter()
            .all(|c| c.initial_width == Some(DEFAULT_COLUMN_MIN_WIDTH)));
    }

    #[test]
    fn manage_defaults_carry_the_id() {
        let environment = Environment::default();
        let timeline = manage_defaults("alerts-page", &environment);
        assert_eq!(timeline.id, "alerts-page");
        assert_eq!(timeline.loading_text, "Loading events");
        assert_eq!(timeline.items_per_page, 50);
        assert_eq!(timeline.sort, default_sort());
        assert!(!timeline.initialized);
    }
}
