use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

pub const DEFAULT_COLUMN_MIN_WIDTH: i32 = 180;
pub const DEFAULT_DATE_COLUMN_MIN_WIDTH: i32 = 190;
/// Columns can't be dragged narrower than this
pub const RESIZED_COLUMN_MIN_WIDTH: i32 = 70;

const DEFAULT_ITEMS_PER_PAGE: u32 = 50;
const DEFAULT_RANGE_MINUTES: i64 = 24 * 60;

// Configuration Types

/// Tunables of the timeline grid. Missing keys fall back to the defaults,
/// so partial JSON documents are valid.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineConfig {
    /// Width assumed for columns that never got an explicit width
    #[serde(default = "default_column_min_width")]
    pub default_column_min_width: i32,
    #[serde(default = "resized_column_min_width")]
    pub resized_column_min_width: i32,
    #[serde(default = "items_per_page")]
    pub items_per_page: u32,
    #[serde(default = "items_per_page_options")]
    pub items_per_page_options: Vec<u32>,
    /// Length of the date range new timelines start with, ending now
    #[serde(default = "default_range_minutes")]
    pub default_range_minutes: i64,
}

fn default_column_min_width() -> i32 {
    DEFAULT_COLUMN_MIN_WIDTH
}

fn resized_column_min_width() -> i32 {
    RESIZED_COLUMN_MIN_WIDTH
}

fn items_per_page() -> u32 {
    DEFAULT_ITEMS_PER_PAGE
}

fn items_per_page_options() -> Vec<u32> {
    vec![10, 25, 50, 100]
}

fn default_range_minutes() -> i64 {
    DEFAULT_RANGE_MINUTES
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            default_column_min_width: default_column_min_width(),
            resized_column_min_width: resized_column_min_width(),
            items_per_page: items_per_page(),
            items_per_page_options: items_per_page_options(),
            default_range_minutes: default_range_minutes(),
        }
    }
}

impl TimelineConfig {
    pub fn from_json(json: &str) -> Result<Self, TimelineError> {
        let config: TimelineConfig = serde_json::from_str(json)?;
        log::debug!("loaded timeline config {config:?}");
        Ok(config)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TimelineError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<String, TimelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
