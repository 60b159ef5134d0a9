use prodgate_auth::{Permission, PrincipalId, Role};

/// Principal context for a request (authenticated identity, roles, and the
/// permissions those roles grant).
///
/// Inserted by the auth middleware for every request that reaches a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: Option<PrincipalId>,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
}

impl PrincipalContext {
    /// An authenticated principal; permissions follow from its roles.
    pub fn new(principal_id: PrincipalId, roles: Vec<Role>) -> Self {
        let permissions = crate::authz::permissions_from_roles(&roles);
        Self {
            principal_id: Some(principal_id),
            roles,
            permissions,
        }
    }

    /// Used when authentication is switched off: no identity, every permission.
    pub fn unrestricted() -> Self {
        Self {
            principal_id: None,
            roles: Vec::new(),
            permissions: vec![Permission::WILDCARD],
        }
    }

    pub fn principal_id(&self) -> Option<PrincipalId> {
        self.principal_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }
}
