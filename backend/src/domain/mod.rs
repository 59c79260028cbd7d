//! Domain primitives.
//!
//! Purpose: describe the outcome of an operation without any transport
//! concerns. Keep types immutable and document invariants and serialisation
//! contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Outcome (alias to `outcome::Outcome`): success, created, no-content or
//!   failed result of an operation.
//! - Error (alias to `error::DomainError`) and ErrorKind: closed failure
//!   taxonomy.
//! - Content (alias to `content::Content`): empty-payload capability.

pub mod content;
pub mod error;
pub mod outcome;

pub use self::content::Content;
pub use self::error::{DomainError as Error, ErrorKind};
pub use self::outcome::{Outcome, OutcomeError};
