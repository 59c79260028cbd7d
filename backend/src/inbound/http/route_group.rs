//! Named groups of endpoints mounted under `/api/{name}`.
//!
//! ```text
//! RouteRegistry
//!   ├── notes  -> /api/notes/...
//!   └── todo   -> /api/todo/...
//! ```
//!
//! Groups are registered explicitly; the registry mounts each one as its own
//! Actix scope.

use std::fmt;
use std::sync::Arc;

use actix_web::web;
use thiserror::Error;
use tracing::{debug, warn};

const ROUTES_SUFFIX: &str = "Routes";

/// Validation errors returned by [`RouteGroupName::new`] and
/// [`RouteGroupName::from_type_name`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteGroupNameError {
    /// The name was empty.
    #[error("route group name must not be empty")]
    Empty,
    /// The name contained a character that cannot appear in a path segment.
    #[error("route group name contains invalid character {character:?}")]
    InvalidCharacter {
        /// First offending character.
        character: char,
    },
    /// A type name did not follow the `...Routes` convention.
    #[error("route group type name must end in `Routes`, got {name:?}")]
    MissingSuffix {
        /// Type name that was rejected.
        name: String,
    },
}

/// Path segment identifying a route group.
///
/// ASCII letters, digits, `-` and `_` only.
///
/// # Examples
/// ```
/// use minimal_api::inbound::http::route_group::RouteGroupName;
///
/// let name = RouteGroupName::from_type_name("TodoRoutes").expect("suffix present");
/// assert_eq!(name.as_ref(), "Todo");
/// assert!(RouteGroupName::new("todo items").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteGroupName(String);

impl RouteGroupName {
    /// Validate and construct a route group name.
    ///
    /// # Errors
    ///
    /// Returns [`RouteGroupNameError::Empty`] for an empty name and
    /// [`RouteGroupNameError::InvalidCharacter`] for anything outside the
    /// allowed set.
    pub fn new(name: impl AsRef<str>) -> Result<Self, RouteGroupNameError> {
        let raw = name.as_ref();
        if raw.is_empty() {
            return Err(RouteGroupNameError::Empty);
        }
        if let Some(character) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
        {
            return Err(RouteGroupNameError::InvalidCharacter { character });
        }
        Ok(Self(raw.to_owned()))
    }

    /// Derive a name from a type name ending in `Routes`.
    ///
    /// `"TodoRoutes"` becomes `"Todo"`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteGroupNameError::MissingSuffix`] when the suffix is
    /// absent or nothing precedes it, otherwise the errors of
    /// [`RouteGroupName::new`].
    pub fn from_type_name(type_name: &str) -> Result<Self, RouteGroupNameError> {
        match type_name.strip_suffix(ROUTES_SUFFIX) {
            Some(stem) if !stem.is_empty() => Self::new(stem),
            _ => Err(RouteGroupNameError::MissingSuffix {
                name: type_name.to_owned(),
            }),
        }
    }

    /// Mount path of the group.
    #[must_use]
    pub fn scope_path(&self) -> String {
        format!("/api/{}", self.0)
    }
}

impl AsRef<str> for RouteGroupName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RouteGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named set of endpoints.
///
/// Paths registered in [`RouteGroup::configure`] are relative to the group's
/// scope.
pub trait RouteGroup: Send + Sync {
    /// Name used for the `/api/{name}` scope.
    fn name(&self) -> &RouteGroupName;

    /// Register the group's endpoints.
    fn configure(&self, cfg: &mut web::ServiceConfig);
}

/// Ordered collection of route groups.
///
/// Cheap to clone so it can be moved into an `HttpServer` app factory.
///
/// # Examples
/// ```
/// use actix_web::{App, HttpResponse, web};
/// use minimal_api::inbound::http::route_group::{RouteGroup, RouteGroupName, RouteRegistry};
///
/// struct PingRoutes(RouteGroupName);
///
/// impl RouteGroup for PingRoutes {
///     fn name(&self) -> &RouteGroupName {
///         &self.0
///     }
///
///     fn configure(&self, cfg: &mut web::ServiceConfig) {
///         cfg.route("", web::get().to(|| async { HttpResponse::Ok().finish() }));
///     }
/// }
///
/// let mut registry = RouteRegistry::new();
/// registry.register(PingRoutes(RouteGroupName::new("ping").expect("valid name")));
/// let _app = App::new().configure(|cfg| registry.configure(cfg));
/// ```
#[derive(Clone, Default)]
pub struct RouteRegistry {
    groups: Vec<Arc<dyn RouteGroup>>,
}

impl RouteRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Add a group.
    ///
    /// A group whose name is already registered is ignored.
    pub fn register<G>(&mut self, group: G) -> &mut Self
    where
        G: RouteGroup + 'static,
    {
        let name = group.name();
        if self.groups.iter().any(|existing| existing.name() == name) {
            warn!(group = %name, "route group already registered; ignoring");
            return self;
        }
        debug!(group = %name, "registered route group");
        self.groups.push(Arc::new(group));
        self
    }

    /// Registered group names in registration order.
    #[must_use]
    pub fn groups(&self) -> Vec<&RouteGroupName> {
        self.groups.iter().map(|group| group.name()).collect()
    }

    /// Mount every group under its `/api/{name}` scope.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        for group in &self.groups {
            cfg.service(
                web::scope(&group.name().scope_path()).configure(|scope| group.configure(scope)),
            );
        }
    }
}

impl fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("groups", &self.groups())
            .finish()
    }
}
