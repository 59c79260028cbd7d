//! HTTP inbound adapter: outcome projection, request validation and route
//! groups.

pub mod problem;
pub mod response;
pub mod route_group;
pub mod validation;

pub use problem::{PROBLEM_JSON, ProblemDetails};
pub use response::{
    ProjectedBody, Projection, ResponseModel, project, project_as, project_each, project_error,
    project_with,
};
pub use route_group::{RouteGroup, RouteGroupName, RouteGroupNameError, RouteRegistry};
pub use validation::{Validate, ValidatedJson, ValidationFailure, Validator, is_valid_email};
