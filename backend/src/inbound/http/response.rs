//! HTTP projection of domain outcomes.
//!
//! Purpose: keep [`Outcome`] transport agnostic while giving Actix handlers a
//! single, deterministic mapping onto status codes and bodies:
//!
//! | Outcome | Status | Body |
//! | --- | --- | --- |
//! | failed, `BadRequest` / `Domain` | 400 | problem |
//! | failed, `NotFound` | 404 | problem |
//! | failed, `Conflict` | 409 | problem |
//! | failed, `Unauthorized` | 401 | empty |
//! | failed, `Forbidden` | 403 | empty |
//! | no content | 204 | empty |
//! | created | 201 | transformed value |
//! | success | 200 | transformed value |
//!
//! Responses built inside a [`TraceId`] scope carry its `trace-id` header.

use actix_web::body::BoxBody;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use tracing::debug;

use super::problem::{PROBLEM_JSON, ProblemDetails};
use crate::domain::{Error, ErrorKind, Outcome};
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Conversion from a domain DTO into its wire representation.
///
/// Implemented once per response type so projections can be requested by
/// type instead of by closure.
///
/// # Examples
/// ```
/// use minimal_api::domain::Outcome;
/// use minimal_api::inbound::http::response::{ProjectedBody, ResponseModel, project_as};
///
/// struct Note {
///     id: u32,
///     text: String,
/// }
///
/// #[derive(serde::Serialize, Debug, PartialEq)]
/// struct NoteResponse {
///     id: u32,
/// }
///
/// impl ResponseModel<Note> for NoteResponse {
///     fn from_dto(dto: Note) -> Self {
///         Self { id: dto.id }
///     }
/// }
///
/// # minimal_api::scalar_content!(Note);
/// let outcome = Outcome::<Note>::success(Note { id: 7, text: "hi".to_owned() });
/// let projection = project_as::<NoteResponse, _>(outcome);
/// assert_eq!(projection.body(), &ProjectedBody::Json(NoteResponse { id: 7 }));
/// ```
pub trait ResponseModel<Dto>: Sized {
    /// Build the response model from the domain value.
    fn from_dto(dto: Dto) -> Self;
}

/// Body half of a [`Projection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectedBody<B> {
    /// No body.
    Empty,
    /// JSON body built from the outcome value.
    Json(B),
    /// Problem body built from the outcome error.
    Problem(ProblemDetails),
}

/// Transport-level response computed from an outcome.
///
/// Pure data: equal inputs always produce equal projections. Convert into an
/// [`HttpResponse`] via [`From`] or return it from a handler as a
/// [`Responder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<B> {
    status: StatusCode,
    body: ProjectedBody<B>,
    location: Option<String>,
}

impl<B> Projection<B> {
    const fn new(status: StatusCode, body: ProjectedBody<B>) -> Self {
        Self {
            status,
            body,
            location: None,
        }
    }

    /// Response status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &ProjectedBody<B> {
        &self.body
    }

    /// `Location` header value, if one was set.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Set the `Location` header.
    ///
    /// Created projections leave it unset; handlers that know the canonical
    /// URI of the new resource attach it here.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl<B: Serialize> From<Projection<B>> for HttpResponse {
    fn from(projection: Projection<B>) -> Self {
        let Projection {
            status,
            body,
            location,
        } = projection;
        let mut builder = Self::build(status);
        if let Some(uri) = location {
            builder.insert_header((header::LOCATION, uri));
        }
        if let Some(trace_id) = TraceId::current() {
            builder.insert_header((TRACE_ID_HEADER, trace_id.to_string()));
        }
        match body {
            ProjectedBody::Empty => builder.finish(),
            ProjectedBody::Json(payload) => builder.json(payload),
            ProjectedBody::Problem(problem) => builder.content_type(PROBLEM_JSON).json(problem),
        }
    }
}

impl<B: Serialize> Responder for Projection<B> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.into()
    }
}

impl<T: Serialize> Responder for Outcome<T> {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        project(self).respond_to(req)
    }
}

pub(crate) const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest | ErrorKind::Domain => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
    }
}

/// Project a failure onto its status code and body.
///
/// `Unauthorized` and `Forbidden` answer with an empty body; every other kind
/// answers with a [`ProblemDetails`].
#[must_use]
pub fn project_error<B>(error: &Error) -> Projection<B> {
    let kind = error.kind();
    let status = status_for(kind);
    debug!(kind = %kind, status = status.as_u16(), "projecting failed outcome");
    let body = match kind {
        ErrorKind::BadRequest | ErrorKind::Domain | ErrorKind::NotFound | ErrorKind::Conflict => {
            ProjectedBody::Problem(ProblemDetails::from_error(error, status))
        }
        ErrorKind::Unauthorized | ErrorKind::Forbidden => ProjectedBody::Empty,
    };
    Projection::new(status, body)
}

/// Project an outcome, transforming its value with `transform`.
///
/// The transform only runs when the projection carries a body. A transform
/// returning `Option<U>` serialises `None` as JSON `null`.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use minimal_api::domain::Outcome;
/// use minimal_api::inbound::http::response::{ProjectedBody, project_with};
///
/// let created = Outcome::<u32>::created(42_u32).expect("value is present");
/// let projection = project_with(created, |id| format!("note-{id}"));
/// assert_eq!(projection.status(), StatusCode::CREATED);
/// assert_eq!(projection.body(), &ProjectedBody::Json("note-42".to_owned()));
/// ```
pub fn project_with<T, U, F>(outcome: Outcome<T>, transform: F) -> Projection<U>
where
    F: FnOnce(T) -> U,
{
    if let Some(error) = outcome.error() {
        return project_error(error);
    }
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    match (outcome.is_no_content(), outcome.into_value()) {
        (false, Some(value)) => Projection::new(status, ProjectedBody::Json(transform(value))),
        _ => Projection::new(StatusCode::NO_CONTENT, ProjectedBody::Empty),
    }
}

/// Project an outcome, serialising its value unchanged.
#[must_use]
pub fn project<T>(outcome: Outcome<T>) -> Projection<T> {
    project_with(outcome, std::convert::identity)
}

/// Project an outcome through the [`ResponseModel`] of `R`.
#[must_use]
pub fn project_as<R, T>(outcome: Outcome<T>) -> Projection<R>
where
    R: ResponseModel<T>,
{
    project_with(outcome, R::from_dto)
}

/// Project a collection outcome element by element, preserving order.
///
/// An absent collection counts as empty and projects to `204 No Content`.
#[must_use]
pub fn project_each<R, T>(outcome: Outcome<Vec<T>>) -> Projection<Vec<R>>
where
    R: ResponseModel<T>,
{
    project_with(outcome, |items| items.into_iter().map(R::from_dto).collect())
}
