//! Client facade: validates configuration once, owns the shared
//! dispatcher, and hands out resource wrappers.

use std::sync::Arc;

use crate::config::Configuration;
use crate::dispatch::ApiCall;
use crate::error::Result;
use crate::resources::{Collection, Collections, Operations};

pub struct Client {
    api: Arc<ApiCall>,
}

impl Client {
    /// Construct a client. Fails closed, before any network activity,
    /// when the node list is empty or a node/credential field is missing.
    pub fn new(config: Configuration) -> Result<Self> {
        Ok(Self {
            api: Arc::new(ApiCall::new(config)?),
        })
    }

    pub fn collections(&self) -> Collections {
        Collections::new(Arc::clone(&self.api))
    }

    pub fn collection(&self, name: impl Into<String>) -> Collection {
        Collection::new(name.into(), Arc::clone(&self.api))
    }

    pub fn operations(&self) -> Operations {
        Operations::new(Arc::clone(&self.api))
    }

    /// Direct access to the dispatcher, for endpoints without a wrapper.
    pub fn api(&self) -> &ApiCall {
        &self.api
    }
}
