use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("failed to fetch map descriptor `{path}`: {reason}")]
    Fetch { path: String, reason: String },
    #[error("map descriptor `{path}` could not be decoded: {reason}")]
    Decode { path: String, reason: String },
    #[error("failed to load map image `{path}`")]
    ImageLoad { path: String },
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("load generation {stale} was superseded by generation {current}")]
    StaleGeneration { stale: u64, current: u64 },
    #[error("unknown point of interest `{0}`")]
    UnknownPoi(String),
    #[error("invalid viewport config: {0}")]
    InvalidConfig(String),
}

impl MapError {
    /// Stale loads are expected during fast navigation and never shown to the user.
    pub fn is_stale(&self) -> bool {
        matches!(self, MapError::StaleGeneration { .. })
    }
}
