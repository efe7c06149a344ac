//! Database module for handling PostgreSQL connections and operations
//!
//! This module provides connection pooling, configuration, migrations and
//! health checks for the PostgreSQL database.

use crate::{
    env::{parse_var_or, var_or},
    error::{DatabaseError, DatabaseResult},
};
use sqlx::{
    PgPool,
    migrate::Migrator,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use std::time::Duration;
use tracing::{error, info};

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// libpq-style SSL mode (`disable`, `prefer`, `require`, ...)
    pub ssl_mode: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections in the pool
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DB_HOST` (default: "localhost")
    /// - `DB_PORT` (default: 5432)
    /// - `DB_NAME` (default: "movies_db")
    /// - `DB_USER` (default: "postgres")
    /// - `DB_PASSWORD` (default: "postgres")
    /// - `DB_SSL_MODE` (default: "disable")
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 10)
    /// - `DATABASE_MIN_CONNECTIONS`: Minimum number of connections (default: 1)
    /// - `DATABASE_CONNECTION_TIMEOUT`: Acquire timeout in seconds (default: 30)
    pub fn from_env() -> DatabaseResult<Self> {
        let invalid = |e: crate::error::EnvVarError| DatabaseError::Configuration(e.to_string());

        Ok(Self {
            host: var_or("DB_HOST", "localhost"),
            port: parse_var_or("DB_PORT", 5432).map_err(invalid)?,
            name: var_or("DB_NAME", "movies_db"),
            user: var_or("DB_USER", "postgres"),
            password: var_or("DB_PASSWORD", "postgres"),
            ssl_mode: var_or("DB_SSL_MODE", "disable"),
            max_connections: parse_var_or("DATABASE_MAX_CONNECTIONS", 10).map_err(invalid)?,
            min_connections: parse_var_or("DATABASE_MIN_CONNECTIONS", 1).map_err(invalid)?,
            connection_timeout: parse_var_or("DATABASE_CONNECTION_TIMEOUT", 30)
                .map_err(invalid)?,
        })
    }

    /// Build sqlx connect options from the discrete connection parameters
    pub fn connect_options(&self) -> DatabaseResult<PgConnectOptions> {
        let ssl_mode: PgSslMode = self.ssl_mode.parse().map_err(|_| {
            DatabaseError::Configuration(format!("Invalid SSL mode: {}", self.ssl_mode))
        })?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }
}

/// Initialize a PostgreSQL connection pool
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<PgPool>` - PostgreSQL connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    info!(
        host = %config.host,
        port = config.port,
        database = %config.name,
        "Initializing database connection pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect_with(config.connect_options()?)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Apply pending migrations from an embedded migrator
pub async fn run_migrations(pool: &PgPool, migrator: &Migrator) -> DatabaseResult<()> {
    migrator
        .run(pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    info!("Database migrations applied");
    Ok(())
}

/// Check database connectivity
///
/// # Arguments
///
/// * `pool` - PostgreSQL connection pool
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if connection is successful, false otherwise
pub async fn health_check(pool: &PgPool) -> DatabaseResult<bool> {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => Ok(true),
        Err(e) => {
            error!("Database health check failed: {}", e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "DB_HOST",
        "DB_PORT",
        "DB_NAME",
        "DB_USER",
        "DB_PASSWORD",
        "DB_SSL_MODE",
        "DATABASE_MAX_CONNECTIONS",
        "DATABASE_MIN_CONNECTIONS",
        "DATABASE_CONNECTION_TIMEOUT",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_database_config_from_env() {
        clear_env();

        let config = DatabaseConfig::from_env().expect("Failed to create database config");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.name, "movies_db");
        assert_eq!(config.user, "postgres");
        assert_eq!(config.ssl_mode, "disable");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connection_timeout, 30);
    }

    #[test]
    #[serial]
    fn test_database_config_from_env_with_custom_values() {
        clear_env();
        unsafe {
            std::env::set_var("DB_HOST", "db.internal");
            std::env::set_var("DB_PORT", "6432");
            std::env::set_var("DATABASE_MAX_CONNECTIONS", "20");
            std::env::set_var("DATABASE_CONNECTION_TIMEOUT", "60");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6432);
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.connection_timeout, 60);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_database_config_rejects_bad_port() {
        clear_env();
        unsafe {
            std::env::set_var("DB_PORT", "not-a-port");
        }

        let err = DatabaseConfig::from_env().unwrap_err();
        assert!(matches!(err, DatabaseError::Configuration(_)));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_connect_options_rejects_unknown_ssl_mode() {
        clear_env();
        let mut config = DatabaseConfig::from_env().unwrap();
        assert!(config.connect_options().is_ok());

        config.ssl_mode = "sometimes".to_string();
        assert!(matches!(
            config.connect_options(),
            Err(DatabaseError::Configuration(_))
        ));
    }
}
