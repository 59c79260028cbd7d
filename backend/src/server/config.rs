//! Server settings loaded via OrthoConfig.
//!
//! Values layer as defaults, then `MINIMAL_API_*` environment variables, then
//! command-line flags.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings controlling the demo HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MINIMAL_API")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Emit logs as JSON rather than human-readable text.
    pub log_json: Option<bool>,
}

impl ServerSettings {
    /// Interface to bind, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind, falling back to 8080.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether logs are written as JSON; defaults to `true`.
    #[must_use]
    pub fn log_json(&self) -> bool {
        self.log_json.unwrap_or(true)
    }
}
