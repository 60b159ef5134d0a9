//! Failure responses: problem payloads and the last-resort safety net.

use std::any::Any;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use prodgate_core::{DomainError, FieldErrors, Outcome};

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Detail used for request validation failures.
pub const VALIDATION_MESSAGE: &str = "One or more validation errors occurred.";

/// Problem payload for a failed outcome.
///
/// Carries the standard `type`/`title`/`status`/`detail` members and mirrors
/// the outcome envelope (`isSuccess`, `error`, `statusCode`) so clients can read
/// either shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProblemDetails<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'static str,
    status: u16,
    detail: &'a str,
    is_success: bool,
    error: &'a str,
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a FieldErrors>,
}

fn status_of<V>(outcome: &Outcome<V>) -> StatusCode {
    StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn problem(status: StatusCode, message: &str, errors: Option<&FieldErrors>) -> Response {
    let body = ProblemDetails {
        kind: "about:blank",
        title: status.canonical_reason().unwrap_or("Error"),
        status: status.as_u16(),
        detail: message,
        is_success: false,
        error: message,
        status_code: status.as_u16(),
        errors,
    };

    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_CONTENT_TYPE));
    response
}

/// Problem response for a failed outcome; transport status = `statusCode`.
///
/// A 204 failure (empty downstream body) keeps its status, so the server sends
/// it without a body.
pub fn problem_response<V>(outcome: &Outcome<V>) -> Response {
    problem(status_of(outcome), outcome.error_message(), None)
}

/// 400 problem response listing field errors.
pub fn validation_problem(errors: &FieldErrors) -> Response {
    problem(StatusCode::BAD_REQUEST, VALIDATION_MESSAGE, Some(errors))
}

/// Map input errors detected before a backend call.
pub fn domain_error_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(errors) => validation_problem(&errors),
        DomainError::InvalidId(msg) => {
            let mut errors = FieldErrors::default();
            errors.add("id", msg);
            validation_problem(&errors)
        }
    }
}

/// The fixed 500 envelope. Built from constants only, so it cannot fail.
pub fn unexpected_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Outcome::<()>::unexpected()),
    )
        .into_response()
}

/// Error returned by handlers for failures nobody classified into an outcome.
///
/// Converting it into a response logs the full error chain once and hands the
/// caller only the fixed 500 envelope.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "unhandled error while processing request");
        unexpected_response()
    }
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = detail, "handler panicked while processing request");
    unexpected_response()
}
