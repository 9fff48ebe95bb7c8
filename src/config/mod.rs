//! Server configuration from environment variables (a `.env` file is honoured by the binary).

use crate::error::ConfigError;
use regex::Regex;
use std::time::Duration;

/// Runtime configuration. Only `DATABASE_URL` is required.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// PostgreSQL schema holding the entity tables. From `GYM_SCHEMA`, default `public`.
    pub schema: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Request body limit in bytes.
    pub max_body_bytes: usize,
    /// Apply table DDL at startup.
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let schema = get("GYM_SCHEMA").unwrap_or_else(|| "public".into());
        let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$")
            .map_err(|_| ConfigError::InvalidSchema(schema.clone()))?;
        if !ident.is_match(&schema) {
            return Err(ConfigError::InvalidSchema(schema));
        }

        Ok(Config {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "PORT", 3000)?,
            database_url,
            schema,
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parse_or(&get, "DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            max_body_bytes: parse_or(&get, "MAX_BODY_BYTES", 1024 * 1024)?,
            run_migrations: parse_bool_or(&get, "RUN_MIGRATIONS", true)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(get: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}

fn parse_bool_or<F>(get: &F, var: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { var, value: raw }),
        },
    }
}
