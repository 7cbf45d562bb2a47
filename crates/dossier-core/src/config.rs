use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// API credentials are optional here: a missing key is reported by the
/// aggregator when a request needs it, so the server can still boot and
/// answer health checks and geocode lookups.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let env = parse_environment(&or_default("DOSSIER_ENV", "development"))?;
    let bind_addr = parse_addr("DOSSIER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("DOSSIER_LOG_LEVEL", "info");

    let search_api_key = optional("VALYU_API_KEY");
    let search_base_url = or_default("DOSSIER_SEARCH_BASE_URL", "https://api.valyu.ai");

    let completion_api_key = optional("LOVABLE_API_KEY");
    let completion_base_url = or_default(
        "DOSSIER_COMPLETION_BASE_URL",
        "https://ai.gateway.lovable.dev/v1",
    );
    let completion_model = or_default("DOSSIER_COMPLETION_MODEL", "google/gemini-2.5-flash");

    let geocode_base_url = or_default(
        "DOSSIER_GEOCODE_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let geocode_country = or_default("DOSSIER_GEOCODE_COUNTRY", "gb");
    let user_agent = or_default("DOSSIER_USER_AGENT", "dossier/0.1 (property-intelligence)");
    let strict_schema = parse_bool("DOSSIER_STRICT_SCHEMA", "false")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        search_api_key,
        search_base_url,
        completion_api_key,
        completion_base_url,
        completion_model,
        geocode_base_url,
        geocode_country,
        user_agent,
        strict_schema,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DOSSIER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
