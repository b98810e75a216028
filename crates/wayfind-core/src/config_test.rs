use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn config_with(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    build_app_config(lookup_from_map(&map))
}

fn assert_invalid(result: &Result<AppConfig, ConfigError>, expected_var: &str) {
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let ConfigError::InvalidEnvVar { var, .. } = parse_environment("staging").unwrap_err();
    assert_eq!(var, "WAYFIND_ENV");
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let cfg = config_with(&[]).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.overpass_url, "https://overpass-api.de/api/interpreter");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "wayfind/0.1 (travel-companion)");
    assert_eq!(cfg.search_radius_m, 5000);
    assert_eq!(cfg.query_timeout_secs, 25);
    assert_eq!(cfg.result_limit, 50);
    assert_eq!(cfg.debounce_ms, 500);
    assert_eq!(cfg.output_mode, OutputMode::Center);
    assert!(cfg.geolocation_url.is_none());
    assert!(cfg.location.is_none());
    assert!((cfg.fallback_location.latitude() - 40.7128).abs() < 1e-9);
    assert!((cfg.fallback_location.longitude() + 74.006).abs() < 1e-9);
}

#[test]
fn search_radius_override() {
    let cfg = config_with(&[("WAYFIND_SEARCH_RADIUS_M", "1200")]).unwrap();
    assert_eq!(cfg.search_radius_m, 1200);
}

#[test]
fn search_radius_zero_is_rejected() {
    assert_invalid(
        &config_with(&[("WAYFIND_SEARCH_RADIUS_M", "0")]),
        "WAYFIND_SEARCH_RADIUS_M",
    );
}

#[test]
fn search_radius_invalid() {
    assert_invalid(
        &config_with(&[("WAYFIND_SEARCH_RADIUS_M", "five km")]),
        "WAYFIND_SEARCH_RADIUS_M",
    );
}

#[test]
fn request_timeout_invalid() {
    assert_invalid(
        &config_with(&[("WAYFIND_REQUEST_TIMEOUT_SECS", "-1")]),
        "WAYFIND_REQUEST_TIMEOUT_SECS",
    );
}

#[test]
fn result_limit_and_debounce_override() {
    let cfg = config_with(&[
        ("WAYFIND_RESULT_LIMIT", "10"),
        ("WAYFIND_DEBOUNCE_MS", "250"),
    ])
    .unwrap();
    assert_eq!(cfg.result_limit, 10);
    assert_eq!(cfg.debounce_ms, 250);
}

#[test]
fn output_mode_geom() {
    let cfg = config_with(&[("WAYFIND_OVERPASS_OUTPUT", "geom")]).unwrap();
    assert_eq!(cfg.output_mode, OutputMode::Geom);
}

#[test]
fn output_mode_invalid() {
    assert_invalid(
        &config_with(&[("WAYFIND_OVERPASS_OUTPUT", "body")]),
        "WAYFIND_OVERPASS_OUTPUT",
    );
}

#[test]
fn fixed_location_parses() {
    let cfg = config_with(&[("WAYFIND_LOCATION", "48.8566,2.3522")]).unwrap();
    let loc = cfg.location.expect("location should be set");
    assert!((loc.latitude() - 48.8566).abs() < 1e-9);
}

#[test]
fn fixed_location_out_of_range_is_rejected() {
    assert_invalid(
        &config_with(&[("WAYFIND_LOCATION", "123.0,2.0")]),
        "WAYFIND_LOCATION",
    );
}

#[test]
fn fallback_location_invalid() {
    assert_invalid(
        &config_with(&[("WAYFIND_FALLBACK_LOCATION", "nowhere")]),
        "WAYFIND_FALLBACK_LOCATION",
    );
}

#[test]
fn blank_geolocation_url_is_treated_as_unset() {
    let cfg = config_with(&[("WAYFIND_GEOLOCATION_URL", "  ")]).unwrap();
    assert!(cfg.geolocation_url.is_none());

    let cfg = config_with(&[("WAYFIND_GEOLOCATION_URL", "http://ip-api.com/json")]).unwrap();
    assert_eq!(
        cfg.geolocation_url.as_deref(),
        Some("http://ip-api.com/json")
    );
}
