//! Inbound adapters that translate HTTP requests into calls returning
//! [`Outcome`](crate::domain::Outcome) values and project those outcomes back
//! onto responses, keeping framework details at the edge.

pub mod http;
