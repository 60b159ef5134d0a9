//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: product backend selection (downstream API or in-memory)
//! - `routes/`: HTTP routes + handlers
//! - `responses.rs`: Outcome → HTTP response mapping
//! - `errors.rs`: problem payloads and the last-resort error handling

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use prodgate_auth::Hs256JwtValidator;
use prodgate_infra::BackendError;

use crate::config::{AuthConfig, GatewayConfig};
use crate::middleware::{self, AuthState};

pub mod errors;
pub mod responses;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &GatewayConfig) -> Result<Router, BackendError> {
    let services = AppServices::from_config(&config.backend)?;
    Ok(build_app_with(services, &config.auth))
}

/// Build the router around an already constructed backend.
pub fn build_app_with(services: AppServices, auth: &AuthConfig) -> Router {
    let auth_state = match auth {
        AuthConfig::Disabled => AuthState::Disabled,
        AuthConfig::Enforced { jwt_secret } => AuthState::Enforced {
            jwt: Arc::new(Hs256JwtValidator::new(jwt_secret.as_bytes())),
        },
    };

    // Protected routes: auth middleware resolves the principal first.
    let protected = routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    with_safety_net(
        Router::new()
            .route("/health", get(routes::system::health))
            .merge(protected),
    )
}

/// Outermost layer: a panic anywhere below becomes the fixed 500 envelope.
pub fn with_safety_net(router: Router) -> Router {
    router.layer(ServiceBuilder::new().layer(CatchPanicLayer::custom(errors::handle_panic)))
}
