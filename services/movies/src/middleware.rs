//! Authentication middleware for JWT token validation and role gating

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{error::ApiError, jwt::Claims, models::Role, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Roles allowed through `require_role`
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    allowed: &'static [Role],
}

impl RoleGate {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn admits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

/// Authentication middleware
///
/// Rejects the request with 401 unless it carries `Authorization: Bearer
/// <token>` with a valid token, then stores an `AuthUser` in the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("authorization header is required"))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid authorization header format"))?;

    let token = match auth_header.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => token,
        _ => return Err(ApiError::Unauthorized("invalid authorization header format")),
    };

    let claims = state.jwt_service.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::Unauthorized("invalid or expired token")
    })?;

    req.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(req).await)
}

/// Role gate, layered inside `auth_middleware`
///
/// Answers 401 when no authenticated user is attached and 403 when the
/// user's role is not admitted by the gate.
pub async fn require_role(
    State(gate): State<RoleGate>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or(ApiError::Unauthorized("unauthorized"))?;

    if !gate.admits(user.role) {
        warn!(
            "User {} with role {} denied {} {}",
            user.username,
            user.role,
            req.method(),
            req.uri().path()
        );
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_gate_admits_listed_roles_only() {
        let admin_only = RoleGate::new(&[Role::Admin]);
        assert!(admin_only.admits(Role::Admin));
        assert!(!admin_only.admits(Role::User));

        let anyone = RoleGate::new(&[Role::User, Role::Admin]);
        assert!(anyone.admits(Role::User));
    }

    #[test]
    fn test_auth_user_from_claims() {
        let user = AuthUser::from(Claims {
            sub: 3,
            username: "dora".to_string(),
            role: Role::Admin,
            iat: 0,
            exp: 1,
        });
        assert_eq!(
            user,
            AuthUser {
                id: 3,
                username: "dora".to_string(),
                role: Role::Admin,
            }
        );
    }
}
