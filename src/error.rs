#[derive(Debug, thiserror::Error)]
pub enum BoardStateError {
    #[error("Missing URL parameter")]
    MissingParameter,

    #[error("Unsupported site: {0}. Currently supports Moxfield and Archidekt.")]
    UnsupportedProvider(String),

    #[error("Invalid {provider} URL format")]
    InvalidUrlFormat { provider: &'static str },

    #[error("{provider} API error: {status}")]
    Upstream { provider: &'static str, status: u16 },

    #[error("{message}")]
    Endpoint { status: u16, message: String },

    #[error("URL import requires a server: no fetch-deck endpoint is configured")]
    LocalExecutionRestricted,

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, BoardStateError>;
