use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::service::attendance::PunchInMode;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    /// Atomic conditional punch-in instead of check-then-insert.
    pub strict_punch_in: bool,

    // Rate limiting
    pub rate_punch_per_min: u32,
    pub rate_admin_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3208".to_string()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,

            strict_punch_in: parse_or("STRICT_PUNCH_IN", false)?,

            rate_punch_per_min: parse_or("RATE_PUNCH_PER_MIN", 120)?,
            rate_admin_per_min: parse_or("RATE_ADMIN_PER_MIN", 300)?,

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: parse_or("LOG_LEVEL", tracing::Level::INFO)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        })
    }

    pub fn punch_in_mode(&self) -> PunchInMode {
        if self.strict_punch_in {
            PunchInMode::Atomic
        } else {
            PunchInMode::CheckThenInsert
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            server_addr: "127.0.0.1:3208".to_string(),
            db_max_connections: 1,
            strict_punch_in: false,
            rate_punch_per_min: 1000,
            rate_admin_per_min: 1000,
            log_dir: "logs".to_string(),
            log_level: tracing::Level::DEBUG,
            api_prefix: "/api".to_string(),
        }
    }
}
