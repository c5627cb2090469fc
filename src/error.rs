use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid data extent: start={start}, end={end} (end must be finite and > start)")]
    InvalidExtent { start: f64, end: f64 },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("json contract error: {0}")]
    Json(#[from] serde_json::Error),
}
