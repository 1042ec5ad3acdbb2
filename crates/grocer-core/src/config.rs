use crate::app_config::{AppConfig, MatcherKind};
use crate::ConfigError;

const DEFAULT_BACKEND_URL: &str = "https://backflipp.wishabi.com/flipp/items/search";

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

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

    let openai_api_key = optional("OPENAI_API_KEY");
    let openai_model = or_default("GROCER_OPENAI_MODEL", "gpt-4o-mini");
    let openai_base_url = or_default("GROCER_OPENAI_BASE_URL", "https://api.openai.com/v1");

    // An explicitly blank endpoint is a configuration error, not a fallback.
    let backend_url = match lookup("GROCER_BACKEND_URL") {
        Ok(raw) if raw.trim().is_empty() => {
            return Err(ConfigError::MissingEnvVar("GROCER_BACKEND_URL".to_string()));
        }
        Ok(raw) => raw.trim().to_string(),
        Err(_) => DEFAULT_BACKEND_URL.to_string(),
    };
    if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
        return Err(invalid(
            "GROCER_BACKEND_URL",
            format!("expected an http(s) URL, got \"{backend_url}\""),
        ));
    }

    let postal_code = optional("GROCER_POSTAL_CODE");
    let database_path = PathBuf::from(or_default(
        "GROCER_DATABASE_PATH",
        "./database/food_data.db",
    ));
    let log_level = or_default("GROCER_LOG_LEVEL", "info");
    let debug = parse_bool(&or_default("GROCER_DEBUG", "false"));
    let responses_dir = PathBuf::from(or_default("GROCER_RESPONSES_DIR", "responses"));

    let request_timeout_secs = parse_u64("GROCER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GROCER_USER_AGENT", "grocer/0.1 (price-finder)");
    let max_retries = parse_u32("GROCER_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("GROCER_RETRY_BACKOFF_BASE_MS", "500")?;

    let max_concurrent_items = parse_usize("GROCER_MAX_CONCURRENT_ITEMS", "1")?;
    if max_concurrent_items == 0 {
        return Err(invalid(
            "GROCER_MAX_CONCURRENT_ITEMS",
            "must be at least 1".to_string(),
        ));
    }

    let match_threshold = or_default("GROCER_MATCH_THRESHOLD", "70")
        .parse::<u8>()
        .map_err(|e| invalid("GROCER_MATCH_THRESHOLD", e.to_string()))?;
    if match_threshold > 100 {
        return Err(invalid(
            "GROCER_MATCH_THRESHOLD",
            format!("must be between 0 and 100, got {match_threshold}"),
        ));
    }

    let matcher = parse_matcher(&or_default("GROCER_MATCHER", "partial_ratio"))?;
    let units_path = optional("GROCER_UNITS_PATH").map(PathBuf::from);

    Ok(AppConfig {
        openai_api_key,
        openai_model,
        openai_base_url,
        backend_url,
        postal_code,
        database_path,
        log_level,
        debug,
        responses_dir,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        max_concurrent_items,
        match_threshold,
        matcher,
        units_path,
    })
}

/// Parse a string into a `MatcherKind` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_matcher(s: &str) -> Result<MatcherKind, ConfigError> {
    match s.to_lowercase().as_str() {
        "partial_ratio" => Ok(MatcherKind::PartialRatio),
        "jaro_winkler" => Ok(MatcherKind::JaroWinkler),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GROCER_MATCHER".to_string(),
            reason: format!("expected partial_ratio or jaro_winkler, got \"{other}\""),
        }),
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
