//! Server-level operations.

use std::sync::Arc;

use serde_json::Value;

use crate::dispatch::ApiCall;
use crate::error::Result;

pub struct Operations {
    api: Arc<ApiCall>,
}

impl Operations {
    pub(crate) fn new(api: Arc<ApiCall>) -> Self {
        Self { api }
    }

    /// `GET /health`.
    pub fn health(&self) -> Result<Value> {
        self.api.get("/health", &[])
    }
}
