use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpotlightError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("photo service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("no photos found for \"{query}\"")]
    EmptyResult { query: String },
    #[error("no more pages to load")]
    NoMorePages,
    #[error("no search has been made yet")]
    NoActiveSearch,
    #[error("no photographer selected")]
    NoPhotographerSelected,
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("refusing to send credentials to {url}")]
    ForeignOrigin { url: String },
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("configuration error: {0}")]
    Config(String),
}

impl SpotlightError {
    /// True when the photo service itself could not be reached or answered
    /// with an error, as opposed to a local or state-related failure.
    pub fn is_service_failure(&self) -> bool {
        matches!(self, SpotlightError::Network(_) | SpotlightError::Api { .. })
    }
}
