//! Login and administrator bootstrap

use std::sync::Arc;
use tracing::{info, warn};

use super::{ServiceError, ServiceResult};
use crate::{
    jwt::JwtService,
    models::{NewUser, Role},
    password::{UNUSABLE_PASSWORD_HASH, hash_password, verify_password},
    repositories::UserRepository,
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    /// Check credentials and issue a token
    ///
    /// Whether the username is unknown or the password is wrong, the caller
    /// sees the same `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<String> {
        let Some(user) = self.users.find_by_username(username).await? else {
            let _ = verify_password(password, UNUSABLE_PASSWORD_HASH);
            warn!("Login failed for unknown user: {}", username);
            return Err(ServiceError::InvalidCredentials);
        };

        let verified = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
            warn!("Stored password hash for {} is unusable: {}", username, e);
            false
        });
        if !verified {
            warn!("Login failed for user: {}", username);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.jwt.issue(&user)?;
        info!("User logged in: {} ({})", user.username, user.role);
        Ok(token)
    }

    /// Create an administrator account unless one already exists
    ///
    /// Returns true when an account was created.
    pub async fn ensure_admin_exists(&self, username: &str, password: &str) -> ServiceResult<bool> {
        if self.users.count_by_role(Role::Admin).await? > 0 {
            info!("Administrator account already present");
            return Ok(false);
        }

        // A non-admin or soft-deleted row would trip the unique username constraint
        if self.users.username_exists(username).await? {
            return Err(ServiceError::UsernameTaken(username.to_string()));
        }

        let admin = NewUser {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            role: Role::Admin,
        };
        self.users.create(&admin).await?;

        info!("Created administrator account: {}", username);
        Ok(true)
    }
}
