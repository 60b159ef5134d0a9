//! API-side authorization guard.
//!
//! Handlers call [`authorize_request`] before touching a backend; the auth
//! crate stays HTTP-agnostic.

use prodgate_auth::{AuthzError, Permission, Principal, Role, authorize};

use crate::context::PrincipalContext;

/// Check one permission for the principal of the current request.
pub fn authorize_request(
    principal: &PrincipalContext,
    required: &Permission,
) -> Result<(), AuthzError> {
    let principal = Principal {
        principal_id: principal.principal_id().unwrap_or_default(),
        roles: principal.roles().to_vec(),
        permissions: principal.permissions().to_vec(),
    };

    authorize(&principal, required)
}

/// Role→permission policy.
///
/// `admin` grants everything; any other authenticated principal may read.
pub fn permissions_from_roles(roles: &[Role]) -> Vec<Permission> {
    if roles.contains(&Role::ADMIN) {
        return vec![Permission::WILDCARD];
    }

    vec![Permission::PRODUCTS_READ]
}
