//! Persisted records and the request/response payloads built from them

pub mod movie;
pub mod user;

pub use movie::{CreateMovieRequest, Movie, MovieResponse, NewMovie, UpdateMovieRequest};
pub use user::{LoginRequest, NewUser, Role, TokenResponse, UnknownRole, User};
