use crate::app_config::{AppConfig, Environment, OutputMode};
use crate::coordinate::Coordinate;
use crate::ConfigError;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_FALLBACK_LOCATION: &str = "40.7128,-74.0060";

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
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_coordinate = |var: &str, raw: &str| -> Result<Coordinate, ConfigError> {
        raw.parse::<Coordinate>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("WAYFIND_ENV", "development"))?;
    let log_level = or_default("WAYFIND_LOG_LEVEL", "info");
    let overpass_url = or_default("WAYFIND_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    let request_timeout_secs = parse_u64("WAYFIND_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("WAYFIND_USER_AGENT", "wayfind/0.1 (travel-companion)");

    let search_radius_m = parse_u32("WAYFIND_SEARCH_RADIUS_M", "5000")?;
    if search_radius_m == 0 {
        let reason = "must be greater than zero".to_string();
        return Err(invalid("WAYFIND_SEARCH_RADIUS_M", reason));
    }
    let query_timeout_secs = parse_u32("WAYFIND_QUERY_TIMEOUT_SECS", "25")?;
    let result_limit = parse_usize("WAYFIND_RESULT_LIMIT", "50")?;
    let debounce_ms = parse_u64("WAYFIND_DEBOUNCE_MS", "500")?;
    let output_mode = parse_output_mode(&or_default("WAYFIND_OVERPASS_OUTPUT", "center"))?;

    let geolocation_url = lookup("WAYFIND_GEOLOCATION_URL")
        .ok()
        .filter(|s| !s.trim().is_empty());
    let location = lookup("WAYFIND_LOCATION")
        .ok()
        .map(|raw| parse_coordinate("WAYFIND_LOCATION", &raw))
        .transpose()?;
    let fallback_location = parse_coordinate(
        "WAYFIND_FALLBACK_LOCATION",
        &or_default("WAYFIND_FALLBACK_LOCATION", DEFAULT_FALLBACK_LOCATION),
    )?;

    Ok(AppConfig {
        env,
        log_level,
        overpass_url,
        request_timeout_secs,
        user_agent,
        search_radius_m,
        query_timeout_secs,
        result_limit,
        debounce_ms,
        output_mode,
        geolocation_url,
        location,
        fallback_location,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WAYFIND_ENV".to_string(),
            reason: format!("expected development, test or production; got \"{other}\""),
        }),
    }
}

fn parse_output_mode(s: &str) -> Result<OutputMode, ConfigError> {
    match s {
        "center" => Ok(OutputMode::Center),
        "geom" => Ok(OutputMode::Geom),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WAYFIND_OVERPASS_OUTPUT".to_string(),
            reason: format!("expected center or geom; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
