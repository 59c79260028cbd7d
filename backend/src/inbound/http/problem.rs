//! Problem body returned for failed outcomes.
//!
//! The shape follows RFC 9457 (`application/problem+json`) restricted to the
//! members clients rely on: `title`, `detail`, `status` and `type`, where
//! `type` is the error kind tag.

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Media type used for problem responses.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Structured failure payload.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use minimal_api::domain::Error;
/// use minimal_api::inbound::http::problem::ProblemDetails;
///
/// let problem = ProblemDetails::from_error(&Error::not_found("no note 7"), StatusCode::NOT_FOUND);
/// assert_eq!(problem.title(), "Not Found");
/// assert_eq!(problem.kind(), "NotFound");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemDetails {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    status: u16,
    #[serde(rename = "type")]
    kind: String,
}

impl ProblemDetails {
    /// Build the problem body for `error` answered with `status`.
    ///
    /// When the error has no title, the canonical reason phrase of `status`
    /// is used instead.
    #[must_use]
    pub fn from_error(error: &Error, status: StatusCode) -> Self {
        let title = error.title().map_or_else(
            || status.canonical_reason().unwrap_or_default().to_owned(),
            str::to_owned,
        );
        Self {
            title,
            detail: error.description().map(str::to_owned),
            status: status.as_u16(),
            kind: error.kind().as_str().to_owned(),
        }
    }

    /// Short summary of the failure.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Human-readable explanation, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Numeric HTTP status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Error kind tag, serialised as `type`.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn serialises_the_documented_shape() {
        let problem = ProblemDetails::from_error(
            &Error::bad_request("Invalid input"),
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(
            serde_json::to_value(&problem).expect("problem serialises"),
            json!({
                "title": "Bad Request",
                "detail": "Invalid input",
                "status": 400,
                "type": "BadRequest"
            })
        );
    }

    #[rstest]
    #[case::not_found(ErrorKind::NotFound, StatusCode::NOT_FOUND, "Not Found")]
    #[case::conflict(ErrorKind::Conflict, StatusCode::CONFLICT, "Conflict")]
    #[case::domain(ErrorKind::Domain, StatusCode::BAD_REQUEST, "Bad Request")]
    fn falls_back_to_reason_phrase(
        #[case] kind: ErrorKind,
        #[case] status: StatusCode,
        #[case] expected: &str,
    ) {
        let problem = ProblemDetails::from_error(&Error::new(kind), status);
        assert_eq!(problem.title(), expected);
        assert!(problem.detail().is_none());
    }

    #[rstest]
    fn omits_absent_detail() {
        let problem = ProblemDetails::from_error(
            &Error::new(ErrorKind::Conflict).with_title("Duplicate"),
            StatusCode::CONFLICT,
        );
        let value = serde_json::to_value(&problem).expect("problem serialises");
        assert!(value.get("detail").is_none());
        assert_eq!(value.get("title"), Some(&json!("Duplicate")));
    }
}
