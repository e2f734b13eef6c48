//! `/collections` resources.

use std::sync::Arc;

use serde_json::Value;

use crate::dispatch::ApiCall;
use crate::error::Result;
use crate::resources::Documents;

pub(crate) const RESOURCE_PATH: &str = "/collections";

/// The collection set: create and list.
pub struct Collections {
    api: Arc<ApiCall>,
}

impl Collections {
    pub(crate) fn new(api: Arc<ApiCall>) -> Self {
        Self { api }
    }

    /// Create a collection from a schema document.
    pub fn create(&self, schema: Value) -> Result<Value> {
        self.api.post(RESOURCE_PATH, schema, &[])
    }

    /// List all collections.
    pub fn retrieve(&self) -> Result<Value> {
        self.api.get(RESOURCE_PATH, &[])
    }
}

/// One named collection.
pub struct Collection {
    name: String,
    api: Arc<ApiCall>,
}

impl Collection {
    pub(crate) fn new(name: String, api: Arc<ApiCall>) -> Self {
        Self { name, api }
    }

    pub fn retrieve(&self) -> Result<Value> {
        self.api.get(&self.endpoint_path(), &[])
    }

    pub fn delete(&self) -> Result<Value> {
        self.api.delete(&self.endpoint_path(), &[])
    }

    /// The documents of this collection.
    pub fn documents(&self) -> Documents {
        Documents::new(self.name.clone(), Arc::clone(&self.api))
    }

    fn endpoint_path(&self) -> String {
        format!("{}/{}", RESOURCE_PATH, self.name)
    }
}
