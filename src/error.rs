//! Typed error taxonomy for the request dispatcher.
//!
//! Non-2xx statuses map onto a closed set of variants so callers can tell
//! "your request was bad" (4xx) from "the cluster is unhealthy" (5xx,
//! transport failures) from "a specific resource is missing" (404). Each
//! HTTP variant keeps the originating response for inspection.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Response metadata captured alongside every HTTP-status error: status
/// code, headers as received, and the raw body text.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    /// Numeric status; 0 when no real status was present on the wire.
    pub status: u32,
    /// Response headers in wire order.
    pub headers: Vec<(String, String)>,
    /// Raw (undecoded) response body.
    pub body: String,
}

/// Errors surfaced by the client. The `message` on HTTP variants is taken
/// from the `message` field of the decoded JSON body when present.
#[derive(Debug, Error)]
pub enum Error {
    /// 400: the server rejected the request as malformed.
    #[error("request malformed: {message}")]
    RequestMalformed {
        message: String,
        response: ErrorResponse,
    },

    /// 401: the API key was missing or not authorized.
    #[error("request unauthorized: {message}")]
    RequestUnauthorized {
        message: String,
        response: ErrorResponse,
    },

    /// 404: the addressed object does not exist.
    #[error("object not found: {message}")]
    ObjectNotFound {
        message: String,
        response: ErrorResponse,
    },

    /// 409: the object being created already exists.
    #[error("object already exists: {message}")]
    ObjectAlreadyExists {
        message: String,
        response: ErrorResponse,
    },

    /// 422: the server understood the request but could not process it.
    #[error("object unprocessable: {message}")]
    ObjectUnprocessable {
        message: String,
        response: ErrorResponse,
    },

    /// 5xx: the server failed. Retried against other nodes.
    #[error("server error: {message}")]
    Server {
        message: String,
        response: ErrorResponse,
    },

    /// A response arrived but carried no real status code. Retried.
    #[error("server returned HTTP status 0: {message}")]
    HttpStatus0 {
        message: String,
        response: ErrorResponse,
    },

    /// Any other non-2xx status (3xx included). Not retried.
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        response: ErrorResponse,
    },

    /// The attempt timed out before a response was obtained. Retried.
    #[error("request timed out")]
    Timeout(#[source] curl::Error),

    /// No HTTP response was obtained (DNS, connect, reset, ...). Retried.
    #[error("transport failure")]
    Transport(#[source] curl::Error),

    /// Invalid client setup. Raised before any network activity, never retried.
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),
}

impl Error {
    /// Status code of the originating response, when one was obtained.
    pub fn status(&self) -> Option<u32> {
        self.response().map(|r| r.status)
    }

    /// The captured response, when the error came from an HTTP status.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Error::RequestMalformed { response, .. }
            | Error::RequestUnauthorized { response, .. }
            | Error::ObjectNotFound { response, .. }
            | Error::ObjectAlreadyExists { response, .. }
            | Error::ObjectUnprocessable { response, .. }
            | Error::Server { response, .. }
            | Error::HttpStatus0 { response, .. }
            | Error::Http { response, .. } => Some(response),
            Error::Timeout(_) | Error::Transport(_) | Error::MissingConfiguration(_) => None,
        }
    }
}
