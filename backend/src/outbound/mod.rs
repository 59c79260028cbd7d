//! Outbound adapters for external infrastructure.
//!
//! - **http_client**: reqwest-backed JSON client for downstream HTTP APIs.

pub mod http_client;

pub use http_client::{HttpClientError, JsonClient};
