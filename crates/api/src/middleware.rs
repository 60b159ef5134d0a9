use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use prodgate_auth::JwtValidator;
use prodgate_core::Outcome;

use crate::app::errors;
use crate::context::PrincipalContext;

/// How the middleware establishes who is calling.
#[derive(Clone)]
pub enum AuthState {
    /// Authentication switched off; every request runs unrestricted.
    Disabled,
    /// A valid bearer token is required.
    Enforced { jwt: Arc<dyn JwtValidator> },
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let principal = match &state {
        AuthState::Disabled => PrincipalContext::unrestricted(),
        AuthState::Enforced { jwt } => match authenticate(jwt.as_ref(), req.headers()) {
            Ok(principal) => principal,
            Err(reason) => {
                tracing::warn!(reason, path = %req.uri().path(), "rejected unauthenticated request");
                return errors::problem_response(&Outcome::<()>::unauthorized());
            }
        },
    };

    req.extensions_mut().insert(principal);
    next.run(req).await
}

fn authenticate(jwt: &dyn JwtValidator, headers: &HeaderMap) -> Result<PrincipalContext, &'static str> {
    let token = extract_bearer(headers)?;
    let claims = jwt
        .validate(token, Utc::now())
        .map_err(|_| "invalid bearer token")?;

    Ok(PrincipalContext::new(claims.sub, claims.roles))
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, &'static str> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("missing authorization header")?;

    let header = header.to_str().map_err(|_| "non-ascii authorization header")?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or("authorization header is not a bearer token")?
        .trim();

    if token.is_empty() {
        return Err("empty bearer token");
    }

    Ok(token)
}
