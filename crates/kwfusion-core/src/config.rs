use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let bind_addr = parse_addr("KWFUSION_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("KWFUSION_LOG_LEVEL", "info");
    let labs_base_url = or_default("KWFUSION_LABS_BASE_URL", "https://api.dataforseo.com");
    let request_timeout_secs = parse_u64("KWFUSION_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        labs_base_url,
        request_timeout_secs,
    })
}

#[cfg(test)]
mod tests {
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

    #[test]
    fn build_app_config_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should parse");
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.labs_base_url, "https://api.dataforseo.com");
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn build_app_config_overrides() {
        let mut map = HashMap::new();
        map.insert("KWFUSION_BIND_ADDR", "127.0.0.1:8080");
        map.insert("KWFUSION_LOG_LEVEL", "debug");
        map.insert("KWFUSION_LABS_BASE_URL", "http://localhost:9999");
        map.insert("KWFUSION_REQUEST_TIMEOUT_SECS", "5");
        let cfg = build_app_config(lookup_from_map(&map)).expect("overrides should parse");
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.labs_base_url, "http://localhost:9999");
        assert_eq!(cfg.request_timeout_secs, 5);
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("KWFUSION_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KWFUSION_BIND_ADDR"),
            "expected InvalidEnvVar(KWFUSION_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("KWFUSION_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KWFUSION_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(KWFUSION_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
