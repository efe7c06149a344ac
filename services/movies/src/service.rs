//! Business flows over the repositories
//!
//! Flows return typed failures; mapping them onto HTTP statuses is the
//! transport's job (see `crate::error`).

use common::error::DatabaseError;
use thiserror::Error;

use crate::{jwt::TokenError, password::PasswordError, validation::FieldError};

pub mod auth;
pub mod movie;

pub use auth::AuthService;
pub use movie::MovieService;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Unknown username and wrong password both end up here
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// The configured administrator name belongs to an account that is not a live admin
    #[error("username {0} is held by a non-admin or deleted account; choose another ADMIN_USERNAME")]
    UsernameTaken(String),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
