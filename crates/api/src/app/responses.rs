//! Outcome-to-HTTP mapping for handler results.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use prodgate_core::Outcome;

use crate::app::errors;

/// 200 with the full envelope on success, problem payload otherwise.
pub fn outcome_response<V: Serialize>(outcome: Outcome<V>) -> Response {
    if outcome.is_success() {
        (StatusCode::OK, Json(outcome)).into_response()
    } else {
        errors::problem_response(&outcome)
    }
}

/// 201 with a `Location` header on success, problem payload otherwise.
pub fn created_response<V, F>(outcome: Outcome<V>, location: F) -> Response
where
    V: Serialize,
    F: FnOnce(&V) -> String,
{
    let location = outcome.value().map(location);
    match location {
        Some(location) => (
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(outcome),
        )
            .into_response(),
        None => errors::problem_response(&outcome),
    }
}
