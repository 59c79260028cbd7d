//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit around handlers, currently
//! trace identifier assignment.

pub mod trace;

pub use trace::{Trace, TraceId};
