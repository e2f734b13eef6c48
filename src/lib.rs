pub mod config;
pub mod logging;

pub mod client;
pub mod dispatch;
pub mod error;
pub mod pool;
pub mod resources;
pub mod transport;

pub use client::Client;
pub use config::{Configuration, NodeConfig};
pub use error::{Error, Result};
