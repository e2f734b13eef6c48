//! The request dispatcher: bounded attempts across the node pool.
//!
//! One logical call runs a strictly sequential attempt loop: pick a node,
//! execute one physical request, classify the outcome, then return, retry
//! against the next node, or surface the last failure once the budget is
//! exhausted. Only transport failures, 5xx responses, and zero-status
//! responses consume the retry budget.

mod classify;

pub use classify::{classify_status, classify_transport, is_retryable};

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::pool::NodePool;
use crate::transport::{build_url, execute, DecodedBody, Method, RequestBody, RequestSpec};

/// Issues logical operations against the cluster. Shared (behind `Arc`)
/// by all resource wrappers of one client; concurrent calls interleave
/// freely and share only the node pool's health view.
pub struct ApiCall {
    config: Configuration,
    pool: Arc<NodePool>,
    timeout: Duration,
    retry_interval: Duration,
}

impl ApiCall {
    /// Validates the configuration (fail-closed, before any network
    /// activity) and builds the shared node pool.
    pub fn new(config: Configuration) -> Result<Self> {
        config.validate()?;
        let pool = NodePool::new(
            config.nodes.clone(),
            config.nearest_node.clone(),
            Duration::from_secs(config.healthcheck_interval_seconds),
        );
        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let retry_interval = Duration::from_secs_f64(config.retry_interval_seconds.max(0.0));
        Ok(Self {
            config,
            pool,
            timeout,
            retry_interval,
        })
    }

    pub fn get(&self, path: &str, query: &[(String, Option<String>)]) -> Result<Value> {
        let mut spec = RequestSpec::new(Method::Get, path);
        spec.query = query.to_vec();
        Ok(self.perform(spec)?.into_value())
    }

    /// GET returning the body as opaque text (bulk export).
    pub fn get_raw(&self, path: &str, query: &[(String, Option<String>)]) -> Result<String> {
        let mut spec = RequestSpec::new(Method::Get, path);
        spec.query = query.to_vec();
        Ok(self.perform(spec)?.into_text())
    }

    pub fn post(&self, path: &str, body: Value, query: &[(String, Option<String>)]) -> Result<Value> {
        let mut spec = RequestSpec::new(Method::Post, path);
        spec.query = query.to_vec();
        spec.body = RequestBody::Json(body);
        Ok(self.perform(spec)?.into_value())
    }

    /// POST with a pre-serialized text body, passed through without JSON
    /// encoding (newline-delimited bulk import). Returns the raw response
    /// text.
    pub fn post_raw(
        &self,
        path: &str,
        body: String,
        query: &[(String, Option<String>)],
    ) -> Result<String> {
        let mut spec = RequestSpec::new(Method::Post, path);
        spec.query = query.to_vec();
        spec.body = RequestBody::Raw(body);
        Ok(self.perform(spec)?.into_text())
    }

    pub fn put(&self, path: &str, body: Value, query: &[(String, Option<String>)]) -> Result<Value> {
        let mut spec = RequestSpec::new(Method::Put, path);
        spec.query = query.to_vec();
        spec.body = RequestBody::Json(body);
        Ok(self.perform(spec)?.into_value())
    }

    pub fn patch(&self, path: &str, body: Value, query: &[(String, Option<String>)]) -> Result<Value> {
        let mut spec = RequestSpec::new(Method::Patch, path);
        spec.query = query.to_vec();
        spec.body = RequestBody::Json(body);
        Ok(self.perform(spec)?.into_value())
    }

    pub fn delete(&self, path: &str, query: &[(String, Option<String>)]) -> Result<Value> {
        let mut spec = RequestSpec::new(Method::Delete, path);
        spec.query = query.to_vec();
        Ok(self.perform(spec)?.into_value())
    }

    /// Run the attempt loop for one logical call.
    pub fn perform(&self, spec: RequestSpec) -> Result<DecodedBody> {
        let max_attempts = self.config.num_retries + 1;
        let mut last_error: Option<Error> = None;

        tracing::debug!(method = spec.method.as_str(), path = %spec.path, "performing request");
        for attempt in 1..=max_attempts {
            let node = self.pool.select();
            let url = build_url(&node.config, &spec)?;
            tracing::debug!(%url, node = %node.id, attempt, "attempting request");

            let error = match execute(&url, &spec, &self.config.api_key, self.timeout) {
                Ok(response) => {
                    // Any status up to 499 proves the transport path good,
                    // even when the payload is an application error.
                    if (1..=499).contains(&response.status) {
                        self.pool.mark(node.id, true);
                    }
                    if (200..=299).contains(&response.status) {
                        return Ok(response.decode());
                    }
                    let error = classify_status(response);
                    if !is_retryable(&error) {
                        return Err(error);
                    }
                    error
                }
                Err(e) => classify_transport(e),
            };

            self.pool.mark(node.id, false);
            tracing::warn!(
                %url,
                node = %node.id,
                attempt,
                error = %error,
                "attempt failed, sleeping {:?} before retrying",
                self.retry_interval
            );
            last_error = Some(error);
            std::thread::sleep(self.retry_interval);
        }

        tracing::debug!("no retries left, surfacing last error");
        Err(last_error.unwrap_or_else(|| {
            Error::MissingConfiguration("retry budget allowed no attempts".to_string())
        }))
    }
}
