//! Server construction and middleware wiring.

mod config;
mod notes;

pub use config::ServerSettings;
pub use notes::NotesRoutes;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer};
use tracing::info;

use minimal_api::Trace;
use minimal_api::inbound::http::RouteRegistry;

/// Assemble the application: trace middleware plus every registered route
/// group.
pub fn build_app(
    registry: RouteRegistry,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .configure(move |cfg| registry.configure(cfg))
}

/// Construct an Actix HTTP server bound to the configured address.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(settings: &ServerSettings, registry: RouteRegistry) -> std::io::Result<Server> {
    let host = settings.host();
    let port = settings.port();
    let server = HttpServer::new(move || build_app(registry.clone()))
        .bind((host, port))?
        .run();
    info!(host, port, "server listening");
    Ok(server)
}
