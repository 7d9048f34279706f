//! Database connection configuration.
//!
//! The ingester opens a fresh MySQL connection for every batch write rather
//! than keeping a pool alive across the idle gap between cycles. This module
//! turns the four `DB_*` settings into connect options and opens that
//! connection.

pub mod prices;

use anyhow::{anyhow, Context, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::ConnectOptions;
use std::env;
use std::fmt;

const DEFAULT_MYSQL_PORT: u16 = 3306;

/// MySQL connection descriptor
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_MYSQL_PORT,
            user: String::new(),
            password: String::new(),
            database: String::new(),
        }
    }
}

impl DbConfig {
    /// Load from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS` and `DB`.
    ///
    /// Only a `DB_PORT` that is not a valid port number is rejected. Other
    /// bad values show up as a connection error when the first batch is
    /// written.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let port = match var("DB_PORT") {
            Some(val) => val
                .parse()
                .map_err(|_| anyhow!("DB_PORT must be a valid u16, got '{}'", val))?,
            None => defaults.port,
        };

        Ok(Self {
            host: var("DB_HOST").unwrap_or(defaults.host),
            port,
            user: var("DB_USER").unwrap_or_default(),
            password: var("DB_PASS").unwrap_or_default(),
            database: var("DB").unwrap_or_default(),
        })
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.database.is_empty() {
            options = options.database(&self.database);
        }
        options
    }
}

/// Open a single MySQL connection. The caller owns it and must close it.
pub async fn connect(config: &DbConfig) -> Result<MySqlConnection> {
    let conn = config
        .connect_options()
        .connect()
        .await
        .with_context(|| {
            format!(
                "Failed to connect to MySQL at {}:{}",
                config.host, config.port
            )
        })?;

    tracing::debug!(
        "Opened MySQL connection to {}:{}/{}",
        config.host,
        config.port,
        config.database
    );

    Ok(conn)
}
