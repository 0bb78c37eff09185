use super::update_timeline;
use crate::environment::types::TimelineConfig;
use crate::view_model::{ColumnHeaderOptions, TimelineById};

/// Adds or updates a column. When updating a column, it will be moved to the
/// new index. An index past the end appends.
pub fn upsert_column(
    id: &str,
    column: ColumnHeaderOptions,
    index: usize,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.columns.retain(|c| c.id != column.id);
        let index = index.min(timeline.columns.len());
        timeline.columns.insert(index, column);
    })
}

pub fn remove_column(id: &str, column_id: &str, timeline_by_id: &TimelineById) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.columns.retain(|c| c.id != column_id);
    })
}

/// Resize a column by `delta` pixels. Columns without a width start from the
/// configured default and never get narrower than the resize minimum.
pub fn apply_delta_to_column_width(
    id: &str,
    column_id: &str,
    delta: i32,
    config: &TimelineConfig,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        let Some(column) = timeline.columns.iter_mut().find(|c| c.id == column_id) else {
            log::debug!("resize of unknown column {column_id} in {id}");
            return;
        };
        let requested = column
            .initial_width
            .unwrap_or(config.default_column_min_width)
            .saturating_add(delta);
        column.initial_width = Some(requested.max(config.resized_column_min_width));
    })
}

pub fn update_columns(
    id: &str,
    columns: Vec<ColumnHeaderOptions>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.columns = columns;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use test_case::test_case;

    fn with_columns(columns: Vec<ColumnHeaderOptions>) -> TimelineById {
        with_timeline("test", |t| t.columns = columns)
    }

    fn column_ids(timelines: &TimelineById) -> Vec<&str> {
        timelines["test"]
            .columns
            .iter()
            .map(|c| c.id.as_str())
            .collect()
    }

    #[test]
    fn upsert_inserts_at_index() {
        let timelines = with_columns(vec![ColumnHeaderOptions::new("y")]);
        let column = ColumnHeaderOptions::new("x").with_width(100);
        let updated = upsert_column("test", column.clone(), 0, &timelines);
        assert_eq!(
            updated["test"].columns,
            vec![column, ColumnHeaderOptions::new("y")]
        );
    }

    #[test]
    fn upsert_moves_and_replaces_existing_column() {
        let timelines = with_columns(vec![
            ColumnHeaderOptions::new("a"),
            ColumnHeaderOptions::new("b"),
            ColumnHeaderOptions::new("c"),
        ]);
        let updated = upsert_column(
            "test",
            ColumnHeaderOptions::new("a").with_width(42),
            2,
            &timelines,
        );
        assert_eq!(column_ids(&updated), vec!["b", "c", "a"]);
        assert_eq!(updated["test"].columns[2].initial_width, Some(42));
    }

    #[test]
    fn upsert_past_the_end_appends() {
        let timelines = with_columns(vec![ColumnHeaderOptions::new("a")]);
        let updated = upsert_column("test", ColumnHeaderOptions::new("b"), 99, &timelines);
        assert_eq!(column_ids(&updated), vec!["a", "b"]);
    }

    #[test]
    fn upsert_twice_is_upsert_once() {
        let timelines = with_columns(vec![
            ColumnHeaderOptions::new("a"),
            ColumnHeaderOptions::new("b"),
        ]);
        let column = ColumnHeaderOptions::new("c").with_width(10);
        let once = upsert_column("test", column.clone(), 1, &timelines);
        let twice = upsert_column("test", column, 1, &once);
        assert_eq!(once["test"].columns, twice["test"].columns);
    }

    #[test]
    fn upsert_leaves_other_timelines_alone() {
        let timelines = with_columns(vec![]);
        let updated = upsert_column("test", ColumnHeaderOptions::new("a"), 0, &timelines);
        assert_eq!(updated["other"], timelines["other"]);
        // the input snapshot is untouched
        assert!(timelines["test"].columns.is_empty());
    }

    #[test]
    fn remove_column_by_id() {
        let timelines = with_columns(vec![
            ColumnHeaderOptions::new("a"),
            ColumnHeaderOptions::new("b"),
        ]);
        let updated = remove_column("test", "a", &timelines);
        assert_eq!(column_ids(&updated), vec!["b"]);
        let unchanged = remove_column("test", "zzz", &updated);
        assert_eq!(unchanged["test"], updated["test"]);
    }

    #[test_case(Some(200), 50 => 250 ; "grow")]
    #[test_case(Some(200), -100 => 100 ; "shrink")]
    #[test_case(Some(200), -150 => 70 ; "shrink below the minimum")]
    #[test_case(Some(200), -1_000_000_000 => 70 ; "huge negative delta")]
    #[test_case(None, 20 => 200 ; "no width starts from the default")]
    #[test_case(None, i32::MAX => i32::MAX ; "saturates")]
    fn width_delta(width: Option<i32>, delta: i32) -> i32 {
        let column = ColumnHeaderOptions {
            initial_width: width,
            ..ColumnHeaderOptions::new("a")
        };
        let timelines = with_columns(vec![column]);
        let updated =
            apply_delta_to_column_width("test", "a", delta, &TimelineConfig::default(), &timelines);
        updated["test"].columns[0].initial_width.unwrap()
    }

    #[test]
    fn width_delta_respects_config() {
        let config = TimelineConfig {
            resized_column_min_width: 120,
            ..Default::default()
        };
        let timelines = with_columns(vec![ColumnHeaderOptions::new("a").with_width(150)]);
        let updated = apply_delta_to_column_width("test", "a", -100, &config, &timelines);
        assert_eq!(updated["test"].columns[0].initial_width, Some(120));
    }

    #[test]
    fn width_delta_of_unknown_column_changes_nothing() {
        let timelines = with_columns(vec![ColumnHeaderOptions::new("a").with_width(150)]);
        let updated =
            apply_delta_to_column_width("test", "b", 10, &TimelineConfig::default(), &timelines);
        assert_eq!(updated["test"], timelines["test"]);
    }

    #[test]
    fn update_columns_replaces_all() {
        let timelines = with_columns(vec![ColumnHeaderOptions::new("a")]);
        let updated = update_columns(
            "test",
            vec![ColumnHeaderOptions::new("c"), ColumnHeaderOptions::new("d")],
            &timelines,
        );
        assert_eq!(column_ids(&updated), vec!["c", "d"]);
    }
}
