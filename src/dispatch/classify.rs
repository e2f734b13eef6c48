//! Map wire outcomes onto the typed error taxonomy.

use crate::error::Error;
use crate::transport::RawResponse;

/// Turn a non-2xx response into its typed error. First match wins,
/// checked as ranges; unmatched statuses (3xx included) fall through to
/// the generic HTTP error.
pub fn classify_status(response: RawResponse) -> Error {
    let message = response.error_message();
    let response = response.into_error_response();
    match response.status {
        400 => Error::RequestMalformed { message, response },
        401 => Error::RequestUnauthorized { message, response },
        404 => Error::ObjectNotFound { message, response },
        409 => Error::ObjectAlreadyExists { message, response },
        422 => Error::ObjectUnprocessable { message, response },
        500..=599 => Error::Server { message, response },
        0 => Error::HttpStatus0 { message, response },
        _ => Error::Http { message, response },
    }
}

/// Turn a transport-level failure (no HTTP response obtained) into its
/// typed error: timeouts are distinguished from other connectivity
/// failures.
pub fn classify_transport(e: curl::Error) -> Error {
    if e.is_operation_timedout() {
        Error::Timeout(e)
    } else {
        Error::Transport(e)
    }
}

/// Whether the retry budget may be spent on this failure. Only server
/// errors, degenerate zero-status responses, and transport failures are
/// transient; a well-formed 4xx from a reachable node is not.
pub fn is_retryable(error: &Error) -> bool {
    matches!(
        error,
        Error::Server { .. } | Error::HttpStatus0 { .. } | Error::Timeout(_) | Error::Transport(_)
    )
}
