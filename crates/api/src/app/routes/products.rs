use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    response::Response,
    routing::get,
};

use prodgate_auth::Permission;
use prodgate_core::{DomainError, Outcome, ProductId};
use prodgate_products::NewProduct;

use crate::app::errors::{self, ApiError};
use crate::app::responses;
use crate::app::services::AppServices;
use crate::authz::authorize_request;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product))
}

/// `Err` carries the ready 403 response.
fn require(principal: &PrincipalContext, permission: &Permission) -> Result<(), Response> {
    authorize_request(principal, permission).map_err(|e| {
        tracing::warn!(permission = %permission, "request denied");
        errors::problem_response(&Outcome::<()>::forbidden_with(e.to_string()))
    })
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<Response, ApiError> {
    if let Err(denied) = require(&principal, &Permission::PRODUCTS_READ) {
        return Ok(denied);
    }

    let outcome = services.list_products().await?;
    Ok(responses::outcome_response(outcome))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    if let Err(denied) = require(&principal, &Permission::PRODUCTS_READ) {
        return Ok(denied);
    }

    let id: ProductId = match id.parse() {
        Ok(id) => id,
        Err(e) => return Ok(errors::domain_error_response(e)),
    };

    let outcome = services.get_product(&id).await?;
    Ok(responses::outcome_response(outcome))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Result<Response, ApiError> {
    if let Err(denied) = require(&principal, &Permission::PRODUCTS_CREATE) {
        return Ok(denied);
    }

    let new = match body {
        Ok(Json(new)) => new,
        Err(rejection) => {
            let err = DomainError::validation("body", rejection.body_text());
            return Ok(errors::domain_error_response(err));
        }
    };
    if let Err(e) = new.validate() {
        return Ok(errors::domain_error_response(e));
    }

    let outcome = services.create_product(new).await?;
    if let Some(product) = outcome.value() {
        tracing::info!(product_id = %product.id, "product created");
    }
    Ok(responses::created_response(outcome, |p| {
        format!("/api/products/{}", p.id)
    }))
}
