//! Tests for outcome construction, invariants and the wire contract.

use super::*;
use crate::domain::ErrorKind;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn bad_request() -> Error {
    Error::bad_request("Invalid input")
}

#[rstest]
#[case::scalar(Outcome::<u32>::success(7_u32))]
#[case::explicit_some(Outcome::<u32>::success(Some(0_u32)))]
fn success_with_value_has_content(#[case] outcome: Outcome<u32>) {
    assert!(outcome.succeeded());
    assert!(!outcome.failed());
    assert!(!outcome.is_no_content());
    assert!(!outcome.is_created());
    assert!(outcome.error().is_none());
}

#[rstest]
fn success_without_value_is_no_content() {
    let outcome = Outcome::<String>::success(None);
    assert!(outcome.succeeded());
    assert!(outcome.is_no_content());
    assert!(outcome.value().is_none());
}

#[rstest]
fn success_with_empty_sequence_is_no_content() {
    let outcome = Outcome::<Vec<String>>::success(Vec::new());
    assert!(outcome.is_no_content());
    assert_eq!(outcome.value(), Some(&Vec::new()));
}

#[rstest]
fn empty_string_is_still_content() {
    let outcome = Outcome::<String>::success(String::new());
    assert!(!outcome.is_no_content());
}

#[rstest]
fn no_content_shorthand_matches_absent_success() {
    assert_eq!(Outcome::<u8>::no_content(), Outcome::<u8>::success(None));
}

#[rstest]
fn created_with_value_is_created() {
    let outcome = Outcome::<u32>::created(42_u32).expect("non-empty value is accepted");
    assert!(outcome.succeeded());
    assert!(outcome.is_created());
    assert!(!outcome.is_no_content());
    assert_eq!(outcome.value(), Some(&42));
}

#[rstest]
fn created_without_value_is_invalid_state() {
    assert_eq!(
        Outcome::<u32>::created(None),
        Err(OutcomeError::InvalidState)
    );
}

#[rstest]
fn created_with_empty_sequence_is_invalid_state() {
    assert_eq!(
        Outcome::<Vec<u32>>::created(Vec::new()),
        Err(OutcomeError::InvalidState)
    );
}

#[rstest]
fn failure_carries_the_error(bad_request: Error) {
    let outcome = Outcome::<u32>::failure(bad_request.clone());
    assert!(outcome.failed());
    assert!(!outcome.succeeded());
    assert!(!outcome.is_no_content());
    assert!(!outcome.is_created());
    assert!(outcome.value().is_none());
    assert_eq!(outcome.error(), Some(&bad_request));
    assert_eq!(outcome.into_error(), Some(bad_request));
}

#[rstest]
fn from_result_maps_both_branches(bad_request: Error) {
    let ok: Outcome<u32> = Ok::<u32, Error>(3).into();
    assert_eq!(ok.into_value(), Some(3));

    let err: Outcome<u32> = Err::<u32, Error>(bad_request.clone()).into();
    assert_eq!(err.error(), Some(&bad_request));
}

#[rstest]
fn map_keeps_flags_computed_for_the_original_value() {
    let empty = Outcome::<Vec<u8>>::success(Vec::new()).map(|items| items.len());
    assert!(empty.is_no_content());
    assert_eq!(empty.value(), Some(&0));

    let created = Outcome::<u32>::created(5_u32)
        .expect("non-empty value is accepted")
        .map(|n| n.to_string());
    assert!(created.is_created());
    assert_eq!(created.value().map(String::as_str), Some("5"));
}

#[rstest]
fn map_passes_failures_through(bad_request: Error) {
    let mapped = Outcome::<u32>::failure(bad_request).map(|n| n + 1);
    assert_eq!(mapped.error().map(Error::kind), Some(ErrorKind::BadRequest));
}

#[rstest]
#[case::success_with_error(true, None, Some(Error::forbidden()), false)]
#[case::failure_without_error(false, None, None, false)]
#[case::failure_with_value(false, Some(1_u32), Some(Error::forbidden()), false)]
#[case::failure_marked_created(false, None, Some(Error::forbidden()), true)]
#[case::created_with_error(true, Some(1_u32), Some(Error::forbidden()), true)]
fn try_from_parts_rejects_contradictions(
    #[case] succeeded: bool,
    #[case] value: Option<u32>,
    #[case] error: Option<Error>,
    #[case] created: bool,
) {
    let result = Outcome::try_from_parts(succeeded, value, error, created);
    assert!(matches!(
        result,
        Err(OutcomeError::InvariantViolation { .. })
    ));
}

#[rstest]
fn try_from_parts_rejects_created_without_content() {
    let result = Outcome::<Vec<u32>>::try_from_parts(true, Some(Vec::new()), None, true);
    assert_eq!(result, Err(OutcomeError::InvalidState));
}

#[rstest]
fn try_from_parts_accepts_consistent_parts(bad_request: Error) {
    let success = Outcome::try_from_parts(true, Some(1_u32), None, false)
        .expect("consistent success parts");
    assert_eq!(success, Outcome::success(1_u32));

    let failure = Outcome::<u32>::try_from_parts(false, None, Some(bad_request.clone()), false)
        .expect("consistent failure parts");
    assert_eq!(failure, Outcome::failure(bad_request));
}

#[rstest]
fn serialises_to_the_wire_shape(bad_request: Error) {
    let created = Outcome::<u32>::created(42_u32).expect("non-empty value is accepted");
    assert_eq!(
        serde_json::to_value(&created).expect("outcome serialises"),
        json!({ "succeeded": true, "created": true, "value": 42 })
    );

    let failed = Outcome::<u32>::failure(bad_request);
    assert_eq!(
        serde_json::to_value(&failed).expect("outcome serialises"),
        json!({
            "succeeded": false,
            "created": false,
            "error": {
                "kind": "BadRequest",
                "title": "Bad Request",
                "description": "Invalid input"
            }
        })
    );
}

#[rstest]
fn deserialisation_recomputes_no_content() {
    let outcome: Outcome<Vec<u32>> =
        serde_json::from_value(json!({ "succeeded": true, "value": [] }))
            .expect("payload deserialises");
    assert!(outcome.is_no_content());
}

#[rstest]
fn deserialisation_rejects_invariant_violations() {
    let result = serde_json::from_value::<Outcome<u32>>(json!({
        "succeeded": true,
        "error": { "kind": "Forbidden" }
    }));
    let message = result.expect_err("contradictory payload").to_string();
    assert!(message.contains("invariant violated"), "unexpected: {message}");
}

#[rstest]
fn deserialisation_rejects_created_without_content() {
    let result = serde_json::from_value::<Outcome<Vec<u32>>>(json!({
        "succeeded": true,
        "created": true,
        "value": []
    }));
    assert!(result.is_err());
}

#[rstest]
fn json_null_value_survives_a_round_trip() {
    let outcome = Outcome::success(serde_json::Value::Null);
    assert!(!outcome.is_no_content());

    let wire = serde_json::to_value(&outcome).expect("outcome serialises");
    assert_eq!(
        wire,
        json!({ "succeeded": true, "created": false, "value": null })
    );
    let restored: Outcome<serde_json::Value> =
        serde_json::from_value(wire).expect("payload deserialises");
    assert!(!restored.is_no_content());
    assert_eq!(restored, outcome);
}

#[rstest]
fn missing_value_deserialises_as_no_content() {
    let outcome: Outcome<serde_json::Value> =
        serde_json::from_value(json!({ "succeeded": true })).expect("payload deserialises");
    assert!(outcome.is_no_content());
    assert_eq!(outcome.value(), None);
}
