use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://museboard.db";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let database_url = or_default("DATABASE_URL", DEFAULT_DATABASE_URL);
    if database_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "DATABASE_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let env = parse_environment(&or_default("MUSEBOARD_ENV", "development"))?;
    let bind_addr: SocketAddr = parse_as(
        "MUSEBOARD_BIND_ADDR",
        &or_default("MUSEBOARD_BIND_ADDR", "0.0.0.0:8000"),
    )?;
    let log_level = or_default("MUSEBOARD_LOG_LEVEL", "info");

    let db_max_connections: u32 = parse_as(
        "MUSEBOARD_DB_MAX_CONNECTIONS",
        &or_default("MUSEBOARD_DB_MAX_CONNECTIONS", "5"),
    )?;
    let db_min_connections: u32 = parse_as(
        "MUSEBOARD_DB_MIN_CONNECTIONS",
        &or_default("MUSEBOARD_DB_MIN_CONNECTIONS", "0"),
    )?;
    let db_acquire_timeout_secs: u64 = parse_as(
        "MUSEBOARD_DB_ACQUIRE_TIMEOUT_SECS",
        &or_default("MUSEBOARD_DB_ACQUIRE_TIMEOUT_SECS", "10"),
    )?;

    if db_max_connections == 0 || db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "MUSEBOARD_DB_MAX_CONNECTIONS".to_string(),
            reason: format!(
                "must be at least 1 and >= MUSEBOARD_DB_MIN_CONNECTIONS ({db_min_connections})"
            ),
        });
    }

    let max_list_limit: i64 = parse_as(
        "MUSEBOARD_MAX_LIST_LIMIT",
        &or_default("MUSEBOARD_MAX_LIST_LIMIT", "200"),
    )?;
    if max_list_limit < 1 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MUSEBOARD_MAX_LIST_LIMIT".to_string(),
            reason: "must be a positive integer".to_string(),
        });
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        max_list_limit,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MUSEBOARD_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
