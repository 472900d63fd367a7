use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: connection refused, DNS, body decode.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine application data directory")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, ClientError>;
