use thiserror::Error;

/// Failures talking to the market-data provider.
///
/// Kept apart from [`EngineError::NoData`] so callers can retry transient
/// failures without masking symbols that genuinely have no data.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("provider error: {code} - {description}")]
    Provider { code: String, description: String },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Engine error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no data")]
    NoData,

    #[error("malformed bar at index {index}: {reason}")]
    MalformedBar { index: usize, reason: String },

    #[error("unknown interval: {0}")]
    UnknownInterval(String),

    #[error("unknown scoring profile: {0}")]
    UnknownProfile(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl EngineError {
    /// True for failures worth retrying (provider-side, not data-side).
    pub fn is_transient(&self) -> bool {
        match self {
            EngineError::Fetch(FetchError::Http(_)) => true,
            EngineError::Fetch(FetchError::Status(code)) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
