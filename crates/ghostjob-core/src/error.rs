use thiserror::Error;

/// Failures surfaced by the list/settings layer.
///
/// Scoring itself never fails; only persistence and import can.
#[derive(Debug, Error)]
pub enum Error {
    #[error("import failed: {0}")]
    Import(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to persist `{key}`: {reason}")]
    Settings { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
