use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment, ProviderKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("DINESCOUT_ENV", "development"))?;
    let log_level = or_default("DINESCOUT_LOG_LEVEL", "info");
    let provider = parse_provider(&or_default("DINESCOUT_PROVIDER", "overpass"))?;

    let geoapify_api_key = lookup("GEOAPIFY_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());

    let overpass_url = or_default(
        "DINESCOUT_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let geoapify_url = or_default("DINESCOUT_GEOAPIFY_URL", "https://api.geoapify.com");
    let geoapify_limit = parse_u32("DINESCOUT_GEOAPIFY_LIMIT", "100")?;
    let geocoder_url = or_default(
        "DINESCOUT_GEOCODER_URL",
        "https://nominatim.openstreetmap.org",
    );

    let cache_dir = PathBuf::from(or_default("DINESCOUT_CACHE_DIR", "./.dinescout-cache"));
    let cache_ttl_secs = parse_u64("DINESCOUT_CACHE_TTL_SECS", "86400")?;
    let request_timeout_secs = parse_u64("DINESCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "DINESCOUT_USER_AGENT",
        "dinescout/0.1 (restaurant-discovery)",
    );
    let regions_path = lookup("DINESCOUT_REGIONS_PATH").ok().map(PathBuf::from);
    let default_region = or_default("DINESCOUT_DEFAULT_REGION", crate::DEFAULT_PRESET);

    Ok(AppConfig {
        env,
        log_level,
        provider,
        geoapify_api_key,
        overpass_url,
        geoapify_url,
        geoapify_limit,
        geocoder_url,
        cache_dir,
        cache_ttl_secs,
        request_timeout_secs,
        user_agent,
        regions_path,
        default_region,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DINESCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_provider(s: &str) -> Result<ProviderKind, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "overpass" => Ok(ProviderKind::Overpass),
        "geoapify" => Ok(ProviderKind::Geoapify),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DINESCOUT_PROVIDER".to_string(),
            reason: format!("unknown provider '{other}' (expected overpass or geoapify)"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
