//! Request execution: one physical HTTP attempt per call.
//!
//! Builds the absolute URL, attaches auth and content headers, sends the
//! request over a blocking curl handle, and reports either the raw wire
//! response (any status) or the transport failure that prevented one.

mod execute;
mod request;
mod response;

pub use execute::execute;
pub use request::{build_url, Method, RequestBody, RequestSpec};
pub use response::{DecodedBody, RawResponse};
