//! Movies API service
//!
//! A CRUD service over movie records behind role-gated JWT authentication.
//! The binary in `main.rs` wires these modules to PostgreSQL and serves
//! the router from [`routes::create_router`].

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod state;
pub mod validation;

/// Migrations for the `movies` and `users` tables
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
