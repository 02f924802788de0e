use thiserror::Error;

// * Unified Error type for the Network Layer.
// * Every variant counts as a transport failure: the page or profile contributes nothing.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0} response")]
    Status(u16),

    #[error("Empty response body")]
    EmptyResponse,

    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),

    #[error("No content available for {0}")]
    Unavailable(String),
}

impl NetworkError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status(code) => Some(*code),
            NetworkError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
