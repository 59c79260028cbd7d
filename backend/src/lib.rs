//! Outcome model and HTTP response projection for Actix minimal APIs.
//!
//! - [`domain`]: [`Outcome`](domain::Outcome), the closed
//!   [`Error`](domain::Error) taxonomy and the empty-content capability.
//! - [`inbound::http`]: the projector mapping outcomes onto status codes and
//!   bodies, request validation and route groups.
//! - [`middleware`]: request-scoped trace identifiers.
//! - [`outbound`]: a JSON client for calling other HTTP APIs.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
