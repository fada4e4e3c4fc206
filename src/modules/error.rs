use std::fmt;

/// Failure of an outbound API call. Callers decide how to surface it.
#[derive(Debug)]
pub enum ClientError {
    /// The request URL could not be built
    InvalidUrl(String),
    /// Transport failure (connect, timeout, TLS)
    Http(reqwest::Error),
    /// The API answered with a non-success status
    Status { status: u16, url: String },
    /// The body was not the expected JSON
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            ClientError::Http(e) => write!(f, "HTTP error: {}", e),
            ClientError::Status { status, url } => {
                write!(f, "Request to {} failed with status {}", url, status)
            }
            ClientError::Decode(msg) => write!(f, "Invalid response body: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Http(e)
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::InvalidUrl(e.to_string())
    }
}
