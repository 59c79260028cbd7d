//! Demo server: loads settings, initialises logging and serves the notes
//! route group through the outcome projector.

mod server;

use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use minimal_api::inbound::http::RouteRegistry;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{NotesRoutes, ServerSettings, create_server};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = result {
        warn!(%error, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|error| eyre!("failed to load server settings: {error}"))?;
    init_tracing(settings.log_json());

    let mut registry = RouteRegistry::new();
    registry.register(NotesRoutes::new(Arc::default())?);

    create_server(&settings, registry)
        .wrap_err("failed to bind server")?
        .await
        .wrap_err("server terminated abnormally")
}
