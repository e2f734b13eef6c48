//! Request description and URL building.

use url::Url;

use crate::config::NodeConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Request body modes: JSON-serialized by the dispatcher, or raw
/// pre-serialized text passed through untouched (bulk import payloads).
#[derive(Debug, Clone)]
pub enum RequestBody {
    None,
    Json(serde_json::Value),
    Raw(String),
}

/// One logical call, built fresh per request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    /// Absolute path on the server, e.g. `/collections`.
    pub path: String,
    /// Ordered query parameters; a `None` value emits a key-only parameter.
    pub query: Vec<(String, Option<String>)>,
    pub body: RequestBody,
    /// Extra headers appended after the defaults.
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::None,
            headers: Vec::new(),
        }
    }
}

/// Absolute URL for a request against one node: `scheme://host:port` +
/// path, with query parameters appended.
pub fn build_url(node: &NodeConfig, spec: &RequestSpec) -> Result<Url> {
    let base = format!("{}{}", node.base_url(), spec.path);
    let mut url = Url::parse(&base)
        .map_err(|e| Error::MissingConfiguration(format!("invalid request URL {}: {}", base, e)))?;
    if !spec.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &spec.query {
            match value {
                Some(value) => pairs.append_pair(key, value),
                None => pairs.append_key_only(key),
            };
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeConfig {
        NodeConfig::new("http", "localhost", 8108)
    }

    #[test]
    fn builds_absolute_url_from_node_and_path() {
        let spec = RequestSpec::new(Method::Get, "/collections");
        let url = build_url(&node(), &spec).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8108/collections");
    }

    #[test]
    fn appends_query_parameters_in_order() {
        let mut spec = RequestSpec::new(Method::Get, "/collections/books/documents/search");
        spec.query = vec![
            ("q".to_string(), Some("harry".to_string())),
            ("query_by".to_string(), Some("title".to_string())),
        ];
        let url = build_url(&node(), &spec).unwrap();
        assert_eq!(url.query(), Some("q=harry&query_by=title"));
    }

    #[test]
    fn key_only_parameter_has_no_equals_sign() {
        let mut spec = RequestSpec::new(Method::Get, "/health");
        spec.query = vec![("verbose".to_string(), None)];
        let url = build_url(&node(), &spec).unwrap();
        assert_eq!(url.query(), Some("verbose"));
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let mut spec = RequestSpec::new(Method::Get, "/collections/books/documents/search");
        spec.query = vec![("filter_by".to_string(), Some("year:>2000 && in_print:true".to_string()))];
        let url = build_url(&node(), &spec).unwrap();
        assert!(url.query().unwrap().starts_with("filter_by=year"));
        assert!(!url.query().unwrap().contains(' '));
    }

    #[test]
    fn method_names_match_http_verbs() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Patch.as_str(), "PATCH");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
