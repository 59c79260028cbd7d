//! Behavioural tests for projecting outcomes onto HTTP responses.
//!
//! Scenarios cover the status table, empty bodies, and the problem body
//! produced for each failure kind.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use minimal_api::domain::{Error, ErrorKind, Outcome};
use minimal_api::inbound::http::{ProblemDetails, ProjectedBody, Projection, project};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};

/// Scenario state: the outcome under test and its projection.
#[derive(Default, ScenarioState)]
struct World {
    outcome: Slot<Outcome<Value>>,
    projection: Slot<Projection<Value>>,
}

impl World {
    fn projection(&self) -> Projection<Value> {
        self.projection.get().expect("outcome should be projected")
    }

    fn problem(&self) -> ProblemDetails {
        match self.projection().body() {
            ProjectedBody::Problem(problem) => problem.clone(),
            other => panic!("expected a problem body, got {other:?}"),
        }
    }
}

fn parse_json(raw: &str) -> Value {
    serde_json::from_str(raw).expect("step value should be JSON")
}

fn unquote(raw: &str) -> &str {
    raw.trim_matches('"')
}

fn kind_from(raw: &str) -> ErrorKind {
    serde_json::from_value(json!(unquote(raw))).expect("known error kind")
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a successful outcome carrying {value}")]
fn a_successful_outcome_carrying(world: &World, value: String) {
    world.outcome.set(Outcome::success(parse_json(&value)));
}

#[given("a successful outcome without a value")]
fn a_successful_outcome_without_a_value(world: &World) {
    world.outcome.set(Outcome::no_content());
}

#[given("a created outcome carrying {value}")]
fn a_created_outcome_carrying(world: &World, value: String) {
    let outcome = Outcome::created(parse_json(&value)).expect("created value has content");
    world.outcome.set(outcome);
}

#[given("a failed outcome of kind {kind} with description {description}")]
fn a_failed_outcome_with_description(world: &World, kind: String, description: String) {
    let error = Error::new(kind_from(&kind)).with_description(unquote(&description));
    world.outcome.set(Outcome::failure(error));
}

#[given("a failed outcome of kind {kind} without description")]
fn a_failed_outcome_without_description(world: &World, kind: String) {
    world.outcome.set(Outcome::failure(Error::new(kind_from(&kind))));
}

// ============================================================================
// When steps
// ============================================================================

#[when("the outcome is projected")]
fn the_outcome_is_projected(world: &World) {
    let outcome = world.outcome.get().expect("outcome should be set");
    world.projection.set(project(outcome));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the status code is {status:u16}")]
fn the_status_code_is(world: &World, status: u16) {
    assert_eq!(world.projection().status().as_u16(), status);
}

#[then("the body is empty")]
fn the_body_is_empty(world: &World) {
    assert_eq!(world.projection().body(), &ProjectedBody::Empty);
}

#[then("the body is the JSON {value}")]
fn the_body_is_the_json(world: &World, value: String) {
    assert_eq!(
        world.projection().body(),
        &ProjectedBody::Json(parse_json(&value))
    );
}

#[then("the problem title is {title}")]
fn the_problem_title_is(world: &World, title: String) {
    assert_eq!(world.problem().title(), unquote(&title));
}

#[then("the problem detail is {detail}")]
fn the_problem_detail_is(world: &World, detail: String) {
    assert_eq!(world.problem().detail(), Some(unquote(&detail)));
}

#[then("the problem type is {kind}")]
fn the_problem_type_is(world: &World, kind: String) {
    let problem = world.problem();
    assert_eq!(problem.kind(), unquote(&kind));
    assert_eq!(problem.status(), world.projection().status().as_u16());
}

// ============================================================================
// Scenarios
// ============================================================================

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "A successful value is returned with 200"
)]
fn successful_value(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "A created value is returned with 201"
)]
fn created_value(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "An empty string still counts as content"
)]
fn empty_string(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "An absent value yields no content"
)]
fn absent_value(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "An empty collection yields no content"
)]
fn empty_collection(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "A bad request carries a problem body"
)]
fn bad_request(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "A domain failure is reported as a bad request"
)]
fn domain_failure(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "A missing resource is reported as not found"
)]
fn not_found(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "A conflict is reported with 409"
)]
fn conflict(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "Unauthenticated callers get an empty 401"
)]
fn unauthorized(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/response_projection.feature",
    name = "Forbidden callers get an empty 403"
)]
fn forbidden(world: World) {
    let _ = world;
}
