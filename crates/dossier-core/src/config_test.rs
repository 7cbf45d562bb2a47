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

fn with_keys<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("VALYU_API_KEY", "search-key");
    m.insert("LOVABLE_API_KEY", "completion-key");
    m
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
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "DOSSIER_ENV"));
}

#[test]
fn build_app_config_defaults_without_any_vars() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should load");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.search_api_key.is_none());
    assert!(cfg.completion_api_key.is_none());
    assert_eq!(cfg.search_base_url, "https://api.valyu.ai");
    assert_eq!(cfg.completion_base_url, "https://ai.gateway.lovable.dev/v1");
    assert_eq!(cfg.completion_model, "google/gemini-2.5-flash");
    assert_eq!(cfg.geocode_base_url, "https://nominatim.openstreetmap.org");
    assert_eq!(cfg.geocode_country, "gb");
    assert_eq!(cfg.user_agent, "dossier/0.1 (property-intelligence)");
    assert!(!cfg.strict_schema);
}

#[test]
fn build_app_config_reads_api_keys() {
    let map = with_keys();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.search_api_key.as_deref(), Some("search-key"));
    assert_eq!(cfg.completion_api_key.as_deref(), Some("completion-key"));
}

#[test]
fn build_app_config_treats_blank_key_as_missing() {
    let mut map = with_keys();
    map.insert("VALYU_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.search_api_key.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = with_keys();
    map.insert("DOSSIER_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DOSSIER_BIND_ADDR"),
        "expected InvalidEnvVar(DOSSIER_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_strict_schema_override() {
    let mut map = with_keys();
    map.insert("DOSSIER_STRICT_SCHEMA", "TRUE");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.strict_schema);
}

#[test]
fn build_app_config_strict_schema_invalid() {
    let mut map = with_keys();
    map.insert("DOSSIER_STRICT_SCHEMA", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DOSSIER_STRICT_SCHEMA"),
        "expected InvalidEnvVar(DOSSIER_STRICT_SCHEMA), got: {result:?}"
    );
}

#[test]
fn build_app_config_model_override() {
    let mut map = with_keys();
    map.insert("DOSSIER_COMPLETION_MODEL", "openai/gpt-5-mini");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.completion_model, "openai/gpt-5-mini");
}

#[test]
fn production_hides_error_details() {
    let mut map = with_keys();
    map.insert("DOSSIER_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.expose_error_details());

    let dev = build_app_config(lookup_from_map(&with_keys())).unwrap();
    assert!(dev.expose_error_details());
}

#[test]
fn debug_output_redacts_api_keys() {
    let map = with_keys();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("search-key"));
    assert!(!rendered.contains("completion-key"));
    assert!(rendered.contains("[redacted]"));
}
