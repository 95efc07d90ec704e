use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::Role;
use crate::error::ApiError;

use super::auth::Identity;

/// Immutable set of roles permitted past a guarded route. Declared once at
/// route-declaration time and shared read-only by every request task.
#[derive(Debug, Clone, Copy)]
pub struct RoleSet {
    allowed: &'static [Role],
}

impl RoleSet {
    pub const fn of(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

/// Role authorizer: checks the [`Identity`] attached by the auth guard
/// against the route's permitted set.
///
/// Must run after [`authenticate`]; a missing identity means the guard chain
/// is wired wrong and is reported as a server error rather than a client
/// one. A role outside the set gets 403, distinct from the 401 the auth
/// guard produces.
///
/// [`authenticate`]: super::auth::authenticate
pub async fn require_role(
    State(allowed): State<RoleSet>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request.extensions().get::<Identity>().ok_or_else(|| {
        tracing::error!("role check reached without an authenticated identity");
        ApiError::internal_server_error("authorization requires an authenticated request")
    })?;

    if !allowed.permits(identity.role) {
        tracing::warn!(
            subject = %identity.subject,
            role = %identity.role,
            "role not permitted for this route"
        );
        return Err(ApiError::forbidden(format!(
            "role {} is not permitted for this operation",
            identity.role
        )));
    }

    Ok(next.run(request).await)
}
