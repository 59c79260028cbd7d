//! Domain-level error taxonomy.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorKind`] onto a status code and problem body; the domain only states
//! which category of failure occurred.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of failure categories.
///
/// The enum is deliberately exhaustive: adapters match on every kind, so
/// adding a variant fails to compile until each mapping handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request is malformed or fails validation.
    BadRequest,
    /// A business rule rejected the operation.
    Domain,
    /// The requested resource does not exist.
    NotFound,
    /// The operation conflicts with the current state of a resource.
    Conflict,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
}

impl ErrorKind {
    /// Stable tag name, used as the problem `type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequest",
            Self::Domain => "Domain",
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
        }
    }

    /// Title applied by the convenience constructors.
    ///
    /// `Unauthorized` and `Forbidden` carry no message by default.
    #[must_use]
    pub const fn default_title(self) -> Option<&'static str> {
        match self {
            Self::BadRequest => Some("Bad Request"),
            Self::Domain => Some("Domain Error"),
            Self::NotFound => Some("Not Found"),
            Self::Conflict => Some("Conflict"),
            Self::Unauthorized | Self::Forbidden => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// Immutable once built: the builder methods consume `self`.
///
/// # Examples
/// ```
/// use minimal_api::domain::{Error, ErrorKind};
///
/// let err = Error::not_found("note 7 does not exist");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.title(), Some("Not Found"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct DomainError {
    kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl DomainError {
    /// Create a bare error of the given kind with no title or description.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            title: None,
            description: None,
        }
    }

    fn with_default_title(kind: ErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.default_title().map(str::to_owned),
            description: Some(description.into()),
        }
    }

    /// Convenience constructor for [`ErrorKind::BadRequest`].
    pub fn bad_request(description: impl Into<String>) -> Self {
        Self::with_default_title(ErrorKind::BadRequest, description)
    }

    /// Convenience constructor for [`ErrorKind::Domain`].
    pub fn domain(description: impl Into<String>) -> Self {
        Self::with_default_title(ErrorKind::Domain, description)
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(description: impl Into<String>) -> Self {
        Self::with_default_title(ErrorKind::NotFound, description)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    pub fn conflict(description: impl Into<String>) -> Self {
        Self::with_default_title(ErrorKind::Conflict, description)
    }

    /// Convenience constructor for [`ErrorKind::Unauthorized`].
    #[must_use]
    pub const fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized)
    }

    /// Convenience constructor for [`ErrorKind::Forbidden`].
    #[must_use]
    pub const fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden)
    }

    /// Replace the title.
    ///
    /// # Examples
    /// ```
    /// use minimal_api::domain::Error;
    ///
    /// let err = Error::conflict("slug taken").with_title("Duplicate slug");
    /// assert_eq!(err.title(), Some("Duplicate slug"));
    /// ```
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Short human-readable summary, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Human-readable explanation, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {description}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests;
