//! Tests for the error taxonomy constructors and serialisation contract.

use super::*;
use crate::domain::Error;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case::bad_request(Error::bad_request("x"), ErrorKind::BadRequest, Some("Bad Request"))]
#[case::domain(Error::domain("x"), ErrorKind::Domain, Some("Domain Error"))]
#[case::not_found(Error::not_found("x"), ErrorKind::NotFound, Some("Not Found"))]
#[case::conflict(Error::conflict("x"), ErrorKind::Conflict, Some("Conflict"))]
#[case::unauthorized(Error::unauthorized(), ErrorKind::Unauthorized, None)]
#[case::forbidden(Error::forbidden(), ErrorKind::Forbidden, None)]
fn constructors_apply_default_titles(
    #[case] error: Error,
    #[case] kind: ErrorKind,
    #[case] title: Option<&str>,
) {
    assert_eq!(error.kind(), kind);
    assert_eq!(error.title(), title);
}

#[rstest]
fn unauthorized_and_forbidden_carry_no_message() {
    for error in [Error::unauthorized(), Error::forbidden()] {
        assert!(error.title().is_none());
        assert!(error.description().is_none());
    }
}

#[rstest]
fn with_title_overrides_default() {
    let error = Error::bad_request("Invalid input").with_title("Validation failed");
    assert_eq!(error.title(), Some("Validation failed"));
    assert_eq!(error.description(), Some("Invalid input"));
}

#[rstest]
fn bare_error_has_no_title() {
    let error = Error::new(ErrorKind::NotFound).with_description("gone");
    assert!(error.title().is_none());
    assert_eq!(error.description(), Some("gone"));
}

#[rstest]
#[case::bad_request(ErrorKind::BadRequest, "BadRequest")]
#[case::domain(ErrorKind::Domain, "Domain")]
#[case::not_found(ErrorKind::NotFound, "NotFound")]
#[case::conflict(ErrorKind::Conflict, "Conflict")]
#[case::unauthorized(ErrorKind::Unauthorized, "Unauthorized")]
#[case::forbidden(ErrorKind::Forbidden, "Forbidden")]
fn tag_names_are_stable(#[case] kind: ErrorKind, #[case] tag: &str) {
    assert_eq!(kind.as_str(), tag);
    assert_eq!(
        serde_json::to_value(kind).expect("kind serialises"),
        json!(tag)
    );
}

#[rstest]
fn display_includes_description_when_present() {
    assert_eq!(Error::not_found("missing").to_string(), "NotFound: missing");
    assert_eq!(Error::forbidden().to_string(), "Forbidden");
}

#[rstest]
fn serialises_without_absent_fields() {
    let value = serde_json::to_value(Error::unauthorized()).expect("error serialises");
    assert_eq!(value, json!({ "kind": "Unauthorized" }));
}

#[rstest]
fn deserialises_known_payloads() {
    let error: Error = serde_json::from_value(json!({
        "kind": "Conflict",
        "title": "Conflict",
        "description": "already exists"
    }))
    .expect("payload deserialises");
    assert_eq!(error, Error::conflict("already exists"));
}

#[rstest]
fn rejects_unknown_kinds() {
    let result = serde_json::from_value::<Error>(json!({ "kind": "Teapot" }));
    assert!(result.is_err());
}
