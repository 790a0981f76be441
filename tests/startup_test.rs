//! Configuration read from the process environment.
//!
//! These tests mutate `GASTROLOG_*` variables, so they run serially.

use std::time::Duration;

use serial_test::serial;

use gastrolog::startup::config::{ENV_API_URL, ENV_DEBOUNCE_MS, ENV_TOKEN_PATH};
use gastrolog::startup::{build_gateway, AppConfig};

fn clear_env() {
    for key in [ENV_API_URL, ENV_TOKEN_PATH, ENV_DEBOUNCE_MS] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_environment_overrides_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("session.json");
    std::env::set_var(ENV_API_URL, " http://10.0.0.5:8080/api ");
    std::env::set_var(ENV_TOKEN_PATH, &token_path);
    std::env::set_var(ENV_DEBOUNCE_MS, "120");

    let config = AppConfig::from_env();
    clear_env();

    assert_eq!(config.api_base_url, "http://10.0.0.5:8080/api");
    assert_eq!(config.token_path.as_deref(), Some(token_path.as_path()));
    assert_eq!(config.search_debounce, Duration::from_millis(120));

    let gateway = build_gateway(&config).unwrap();
    assert_eq!(gateway.base_url(), "http://10.0.0.5:8080/api");
}

#[test]
#[serial]
fn test_bad_values_fall_back_to_defaults() {
    clear_env();
    std::env::set_var(ENV_API_URL, "   ");
    std::env::set_var(ENV_DEBOUNCE_MS, "soon");

    let config = AppConfig::from_env();
    clear_env();

    let defaults = AppConfig::default();
    assert_eq!(config.api_base_url, defaults.api_base_url);
    assert_eq!(config.search_debounce, defaults.search_debounce);
    assert!(config.token_path.is_none());
}

#[test]
#[serial]
fn test_unset_environment_is_the_default_config() {
    clear_env();
    assert_eq!(AppConfig::from_env(), AppConfig::default());
}
