//! Repositories for database operations
//!
//! Flows talk to storage only through these traits. The PostgreSQL
//! implementations live in the submodules; every read filters out
//! soft-deleted rows.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{Movie, NewMovie, NewUser, Role, User};

pub mod movie;
pub mod user;

#[cfg(test)]
pub mod memory;

pub use movie::PgMovieRepository;
pub use user::PgUserRepository;

/// Storage operations over movie records
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// All movies that are not soft-deleted, in store order
    async fn find_all(&self) -> DatabaseResult<Vec<Movie>>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Movie>>;

    /// Movies whose title, director or plot contains `query`
    async fn search(&self, query: &str) -> DatabaseResult<Vec<Movie>>;

    async fn create(&self, movie: &NewMovie) -> DatabaseResult<Movie>;

    /// Persist every mutable field of `movie` and refresh `updated_at`
    async fn update(&self, movie: &Movie) -> DatabaseResult<Option<Movie>>;

    /// Mark a movie deleted; returns false when no live movie has that id
    async fn soft_delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Storage operations over user records
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    async fn create(&self, user: &NewUser) -> DatabaseResult<User>;

    /// Whether any row, soft-deleted or not, holds `username`
    async fn username_exists(&self, username: &str) -> DatabaseResult<bool>;

    async fn count_by_role(&self, role: Role) -> DatabaseResult<i64>;
}
