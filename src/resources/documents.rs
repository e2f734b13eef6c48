//! `/collections/<name>/documents` resources, including the bulk
//! import/export endpoints that move raw newline-delimited JSON text.

use std::sync::Arc;

use serde_json::Value;

use crate::dispatch::ApiCall;
use crate::error::Result;
use crate::resources::collections;

const RESOURCE_PATH: &str = "/documents";

/// The document set of one collection.
pub struct Documents {
    collection_name: String,
    api: Arc<ApiCall>,
}

impl Documents {
    pub(crate) fn new(collection_name: String, api: Arc<ApiCall>) -> Self {
        Self {
            collection_name,
            api,
        }
    }

    /// Index one document.
    pub fn create(&self, document: Value) -> Result<Value> {
        self.api.post(&self.endpoint_path(None), document, &[])
    }

    /// Index one document, replacing it if the id already exists.
    pub fn upsert(&self, document: Value) -> Result<Value> {
        self.api.post(
            &self.endpoint_path(None),
            document,
            &[("action".to_string(), Some("upsert".to_string()))],
        )
    }

    pub fn search(&self, search_parameters: &[(String, Option<String>)]) -> Result<Value> {
        self.api
            .get(&self.endpoint_path(Some("search")), search_parameters)
    }

    /// Bulk import. `documents_jsonl` is pre-serialized newline-delimited
    /// JSON, passed through as-is; the per-line results come back the same
    /// way and are returned untouched.
    pub fn import(
        &self,
        documents_jsonl: String,
        query: &[(String, Option<String>)],
    ) -> Result<String> {
        self.api
            .post_raw(&self.endpoint_path(Some("import")), documents_jsonl, query)
    }

    /// Bulk export: the raw newline-delimited JSON text of the collection.
    pub fn export(&self) -> Result<String> {
        self.api.get_raw(&self.endpoint_path(Some("export")), &[])
    }

    /// Address one document by id.
    pub fn document(&self, id: impl Into<String>) -> Document {
        Document::new(self.collection_name.clone(), id.into(), Arc::clone(&self.api))
    }

    fn endpoint_path(&self, operation: Option<&str>) -> String {
        let mut path = format!(
            "{}/{}{}",
            collections::RESOURCE_PATH,
            self.collection_name,
            RESOURCE_PATH
        );
        if let Some(operation) = operation {
            path.push('/');
            path.push_str(operation);
        }
        path
    }
}

/// One document addressed by id.
pub struct Document {
    collection_name: String,
    id: String,
    api: Arc<ApiCall>,
}

impl Document {
    pub(crate) fn new(collection_name: String, id: String, api: Arc<ApiCall>) -> Self {
        Self {
            collection_name,
            id,
            api,
        }
    }

    pub fn retrieve(&self) -> Result<Value> {
        self.api.get(&self.endpoint_path(), &[])
    }

    pub fn delete(&self) -> Result<Value> {
        self.api.delete(&self.endpoint_path(), &[])
    }

    fn endpoint_path(&self) -> String {
        format!(
            "{}/{}{}/{}",
            collections::RESOURCE_PATH,
            self.collection_name,
            RESOURCE_PATH,
            self.id
        )
    }
}
