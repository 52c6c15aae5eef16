use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables take the [`AppConfig::default`]
/// value. Tests drive this with a `HashMap` lookup instead of mutating the
/// process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let api_base_url = non_empty("DINING_API_BASE_URL", &defaults.api_base_url)?;
    let site_id = non_empty("DINING_SITE_ID", &defaults.site_id)?;
    let tenant = non_empty("DINING_TENANT", &defaults.tenant)?;

    let poll_interval_ms = parse_u64("DINING_POLL_INTERVAL_MS", defaults.poll_interval_ms)?;
    if poll_interval_ms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DINING_POLL_INTERVAL_MS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let request_timeout_secs =
        parse_u64("DINING_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let user_agent = or_default("DINING_USER_AGENT", &defaults.user_agent);
    let log_level = or_default("DINING_LOG_LEVEL", &defaults.log_level);

    Ok(AppConfig {
        api_base_url,
        site_id,
        tenant,
        poll_interval_ms,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}
