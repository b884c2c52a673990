use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
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
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values count as unset so `.env` placeholders like `KEY=` behave.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;

    let bind_addr = or_default("STOREFRONT_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("STOREFRONT_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");

    let printful_api_key = optional("PRINTFUL_API_KEY");
    let printful_base_url = or_default("PRINTFUL_API_BASE_URL", "https://api.printful.com");
    let printful_request_timeout_secs = optional("PRINTFUL_REQUEST_TIMEOUT_SECS")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("PRINTFUL_REQUEST_TIMEOUT_SECS", e.to_string()))
        })
        .transpose()?;
    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1 (catalog-normalizer)");
    let storefront_endpoint = or_default("STOREFRONT_ENDPOINT", "http://127.0.0.1:3000/");

    let database_url = optional("DATABASE_URL");
    let db_max_connections = parse_u32("STOREFRONT_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("STOREFRONT_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("STOREFRONT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    if db_min_connections > db_max_connections {
        return Err(invalid(
            "STOREFRONT_DB_MIN_CONNECTIONS",
            format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        printful_api_key,
        printful_base_url,
        printful_request_timeout_secs,
        user_agent,
        storefront_endpoint,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
