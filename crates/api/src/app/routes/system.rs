use axum::{extract::Extension, response::Response};
use serde::Serialize;

use prodgate_core::Outcome;

use crate::app::responses;
use crate::context::PrincipalContext;

pub async fn health() -> Response {
    responses::outcome_response(Outcome::completed())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmI {
    pub principal_id: Option<String>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> Response {
    responses::outcome_response(Outcome::success(WhoAmI {
        principal_id: principal.principal_id().map(|id| id.to_string()),
        roles: principal.roles().iter().map(|r| r.to_string()).collect(),
        permissions: principal.permissions().iter().map(|p| p.to_string()).collect(),
    }))
}
