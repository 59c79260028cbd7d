//! Request validation helpers for inbound HTTP adapters.
//!
//! A [`Validator`] collects every failure a request body exhibits instead of
//! stopping at the first one, then folds them into a single `BadRequest`
//! [`Error`]. Request types opt in by implementing [`Validate`]; handlers
//! receive them through the [`ValidatedJson`] extractor.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, web};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::response::project_error;
use crate::domain::Error;

const NAIVE_DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    field: Option<String>,
    message: String,
}

impl ValidationFailure {
    /// Lower-cased name of the offending field, if the failure names one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Failure message without the field prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            writeln!(f, "Error while validating property: '{field}'.")?;
        }
        f.write_str(&self.message)
    }
}

/// Failure accumulator for request payloads.
///
/// Every rule records its failure and returns, so one pass reports all
/// problems at once.
///
/// # Examples
/// ```
/// use minimal_api::domain::ErrorKind;
/// use minimal_api::inbound::http::validation::Validator;
///
/// let mut validator = Validator::new();
/// validator
///     .not_null_not_empty("Title", Some(""))
///     .date_time("DueDate", "tomorrow");
/// assert_eq!(validator.failures().len(), 2);
///
/// let error = validator.finish().expect_err("two rules failed");
/// assert_eq!(error.kind(), ErrorKind::BadRequest);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    failures: Vec<ValidationFailure>,
}

impl Validator {
    /// Create an empty validator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Record a failure, optionally attributed to `field`.
    ///
    /// Blank field names are treated as absent.
    pub fn add_failure(&mut self, field: Option<&str>, message: impl Into<String>) -> &mut Self {
        let label = field
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase);
        self.failures.push(ValidationFailure {
            field: label,
            message: message.into(),
        });
        self
    }

    /// Fail when `value` is absent or empty.
    pub fn not_null_not_empty(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if value.is_none_or(str::is_empty) {
            self.add_failure(
                Some(field),
                format!("Property '{field}' can't be null or empty!"),
            );
        }
        self
    }

    /// Fail when `value` is neither a date nor a date-time.
    pub fn date_time(&mut self, field: &str, value: &str) -> &mut Self {
        if parse_date_time(value).is_none() {
            self.add_failure(
                Some(field),
                format!("Property '{field}' must be a valid date time"),
            );
        }
        self
    }

    /// Check a start/end date pair.
    ///
    /// Both sides must be set together, and a parseable start must not be
    /// later than a parseable end. Two empty sides pass.
    pub fn start_and_end_date(&mut self, start: Option<&str>, end: Option<&str>) -> &mut Self {
        match (non_empty(start), non_empty(end)) {
            (None, Some(_)) => {
                self.add_failure(None, "StartDate can't be null or empty when EndDate has value");
            }
            (Some(_), None) => {
                self.add_failure(None, "EndDate can't be null or empty when StartDate has value");
            }
            (Some(start_raw), Some(end_raw)) => {
                let inverted = parse_date_time(start_raw)
                    .zip(parse_date_time(end_raw))
                    .is_some_and(|(start_at, end_at)| start_at > end_at);
                if inverted {
                    self.add_failure(None, "StartDate must be earlier than EndDate");
                }
            }
            (None, None) => {}
        }
        self
    }

    /// Check requested sort keys against the sortable properties of
    /// `type_name`.
    ///
    /// Each entry pairs a property name with its ascending flag. Keys are
    /// matched against `allowed` case-insensitively; duplicate keys are
    /// reported once.
    pub fn sort_by(
        &mut self,
        sorts: &[(String, bool)],
        allowed: &[&str],
        type_name: &str,
    ) -> &mut Self {
        let mut seen = HashSet::with_capacity(sorts.len());
        if !sorts.iter().all(|(key, _)| seen.insert(key.as_str())) {
            self.add_failure(None, "Property 'sortProperty' contains duplicated sorts.");
        }
        for (key, _) in sorts {
            if !allowed.iter().any(|name| name.eq_ignore_ascii_case(key)) {
                self.add_failure(
                    None,
                    format!("Property '{key}' is not a valid property of type {type_name}."),
                );
            }
        }
        self
    }

    /// Recorded failures in the order they were added.
    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Whether no rule has failed so far.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures().is_empty()
    }

    /// Fold the recorded failures into a single `BadRequest` error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::bad_request`] with the failure messages joined by
    /// newlines when at least one rule failed.
    pub fn finish(self) -> Result<(), Error> {
        if self.failures.is_empty() {
            return Ok(());
        }
        let description = self
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Err(Error::bad_request(description))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

/// Whether `email` looks like a deliverable `local@domain` address.
///
/// # Examples
/// ```
/// use minimal_api::inbound::http::validation::is_valid_email;
///
/// assert!(is_valid_email("test@example.com"));
/// assert!(!is_valid_email("invalid-email"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.chars().any(char::is_whitespace)
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.chars().any(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Parse the date and date-time shapes accepted by [`Validator::date_time`].
///
/// RFC 3339 values are normalised to UTC; bare dates resolve to midnight.
#[must_use]
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Validation rules for a request payload.
pub trait Validate {
    /// Record every rule this value breaks on `validator`.
    fn validate(&self, validator: &mut Validator);
}

/// JSON body extractor that runs [`Validate`] before the handler sees it.
///
/// Malformed JSON and failed rules are both rejected with a `400` problem
/// response.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use minimal_api::domain::Outcome;
/// use minimal_api::inbound::http::validation::{Validate, ValidatedJson, Validator};
///
/// #[derive(serde::Deserialize)]
/// struct NewNote {
///     text: String,
/// }
///
/// impl Validate for NewNote {
///     fn validate(&self, validator: &mut Validator) {
///         validator.not_null_not_empty("Text", Some(self.text.as_str()));
///     }
/// }
///
/// async fn create(body: ValidatedJson<NewNote>) -> Outcome<String> {
///     Outcome::success(body.into_inner().text)
/// }
///
/// let _app = App::new().route("/notes", web::post().to(create));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Unwrap the validated payload.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn reject(error: Error) -> actix_web::Error {
    debug!(%error, "rejecting request body");
    let response = HttpResponse::from(project_error::<()>(&error));
    InternalError::from_response(error, response).into()
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = web::Json::<T>::from_request(req, payload);
        Box::pin(async move {
            let body = fut
                .await
                .map_err(|error| reject(Error::bad_request(error.to_string())))?
                .into_inner();
            let mut validator = Validator::new();
            body.validate(&mut validator);
            validator.finish().map_err(reject)?;
            Ok(Self(body))
        })
    }
}
