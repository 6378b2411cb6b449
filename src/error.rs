use reqwest::StatusCode;
use thiserror::Error;

/// Every failure the client can report.
///
/// The status-derived variants carry the raw response body so callers can
/// show Pinboard's own explanation.
#[derive(Debug, Error)]
pub enum Error {
    /// The server rejected the request as malformed (400).
    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// The auth token was missing or rejected (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The account may not access the resource (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The bookmark, note or endpoint does not exist (404).
    #[error("Not Found: {0}")]
    NotFound(String),

    /// The endpoint's rate limit was hit (429).
    #[error("Rate Limit Exceeded: {0}")]
    RateLimitExceeded(String),

    /// Any 5xx response.
    #[error("Server Error ({}): {}", .status.as_u16(), .body)]
    Server {
        /// Status returned by the server.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// A non-success status with no dedicated variant.
    #[error("An unexpected API error occurred ({}): {}", .status.as_u16(), .body)]
    UnexpectedStatus {
        /// Status returned by the server.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response (DNS, refused connection, timeout, TLS).
    #[error("A network error occurred: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response whose body was not a JSON object.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// An argument failed validation. No request was sent.
    #[error("{0}")]
    InvalidArgument(String),

    /// The configured base URL could not be parsed.
    #[error("invalid base url `{0}`")]
    InvalidUrl(String),

    /// A required setting was absent from the environment.
    #[error("missing configuration: {0} is not set")]
    MissingConfig(&'static str),
}

impl Error {
    /// Maps a non-success status and its body onto the matching variant.
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Error::BadRequest(body),
            StatusCode::UNAUTHORIZED => Error::Unauthorized(body),
            StatusCode::FORBIDDEN => Error::Forbidden(body),
            StatusCode::NOT_FOUND => Error::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded(body),
            code if code.is_server_error() => Error::Server { status: code, body },
            code => Error::UnexpectedStatus { status: code, body },
        }
    }

    /// Returns the HTTP status behind this error, if the server sent one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::BadRequest(_) => Some(StatusCode::BAD_REQUEST),
            Error::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Error::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            Error::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Error::RateLimitExceeded(_) => Some(StatusCode::TOO_MANY_REQUESTS),
            Error::Server { status, .. } | Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the server answered with an error status.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Error::BadRequest(_)
                | Error::Unauthorized(_)
                | Error::Forbidden(_)
                | Error::NotFound(_)
                | Error::RateLimitExceeded(_)
                | Error::Server { .. }
                | Error::UnexpectedStatus { .. }
        )
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
