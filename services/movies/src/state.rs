//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    jwt::JwtService,
    repositories::{MovieRepository, UserRepository},
    service::{AuthService, MovieService},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub auth_service: AuthService,
    pub movie_service: MovieService,
}

impl AppState {
    /// Wire the flows over the given repositories
    pub fn new(
        users: Arc<dyn UserRepository>,
        movies: Arc<dyn MovieRepository>,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            auth_service: AuthService::new(users, jwt_service.clone()),
            movie_service: MovieService::new(movies),
            jwt_service,
        }
    }
}
