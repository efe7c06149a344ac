//! Service configuration loaded from the environment

use anyhow::{Context, Result};
use common::{
    database::DatabaseConfig,
    env::{parse_var_or, var_or},
};
use std::net::{Ipv4Addr, SocketAddr};
use tracing::warn;

use crate::jwt::JwtConfig;

const DEFAULT_JWT_SECRET: &str = "default_secret_key";

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `development`, `production`, ...
    pub app_env: String,
    pub app_port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Credentials of the administrator created on first start
    pub admin_username: String,
    pub admin_password: String,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `APP_ENV` (default: "development")
    /// - `APP_PORT` (default: 8080)
    /// - `JWT_SECRET` (default: "default_secret_key")
    /// - `JWT_EXPIRATION`: token lifetime in seconds (default: 86400)
    /// - `ADMIN_USERNAME` (default: "admin")
    /// - `ADMIN_PASSWORD` (default: "adminpassword")
    /// - database variables, see [`DatabaseConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        let config = Self {
            app_env: var_or("APP_ENV", "development"),
            app_port: parse_var_or("APP_PORT", 8080)?,
            database: DatabaseConfig::from_env().context("Invalid database configuration")?,
            jwt: JwtConfig {
                secret: var_or("JWT_SECRET", DEFAULT_JWT_SECRET),
                expiry: parse_var_or("JWT_EXPIRATION", 86_400)?,
            },
            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "adminpassword"),
        };

        if config.jwt.expiry == 0 {
            anyhow::bail!("JWT_EXPIRATION must be greater than zero");
        }

        if config.is_production() && config.jwt.secret == DEFAULT_JWT_SECRET {
            warn!("JWT_SECRET is not set; production is running with the default secret");
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// Address the HTTP listener binds to
    pub fn app_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.app_port))
    }
}
