#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Unknown timeline: {0}")]
    UnknownTimeline(String),

    #[error("Invalid timeline config: {0}")]
    Config(#[from] serde_json::Error),
}
