use std::path::PathBuf;

use crate::app_config::{AppConfig, AssetRootsConfig, DeploymentLayout, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), &DeploymentLayout::current())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment and process layout so it can be tested
/// with a plain `HashMap` lookup and a fixed [`DeploymentLayout`].
fn build_app_config<F>(lookup: F, layout: &DeploymentLayout) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let optional_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(|raw| layout.absolutize(PathBuf::from(raw)))
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("ADCAT_ENV", "development"))?;

    let bind_addr = parse("ADCAT_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("ADCAT_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("ADCAT_DB_MAX_CONNECTIONS", "20")?;
    let db_min_connections = parse_u32("ADCAT_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("ADCAT_DB_ACQUIRE_TIMEOUT_SECS", "2")?;
    let db_idle_timeout_secs = parse_u64("ADCAT_DB_IDLE_TIMEOUT_SECS", "30")?;

    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADCAT_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }

    let candidates = match lookup("ADCAT_ASSET_ROOTS") {
        Ok(raw) => parse_asset_roots(&raw, layout)?,
        Err(_) => layout.default_asset_candidates(),
    };
    let fallback =
        optional_path("ADCAT_ASSET_FALLBACK").unwrap_or_else(|| layout.default_asset_fallback());

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        db_idle_timeout_secs,
        asset_roots: AssetRootsConfig {
            candidates,
            fallback,
        },
        version_file: optional_path("ADCAT_VERSION_FILE"),
        client_build_dir: optional_path("ADCAT_CLIENT_BUILD_DIR"),
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADCAT_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

/// Split `ADCAT_ASSET_ROOTS` using the platform path-list separator.
fn parse_asset_roots(raw: &str, layout: &DeploymentLayout) -> Result<Vec<PathBuf>, ConfigError> {
    let roots: Vec<PathBuf> = std::env::split_paths(raw)
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| layout.absolutize(p))
        .collect();

    if roots.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADCAT_ASSET_ROOTS".to_string(),
            reason: "at least one candidate directory is required".to_string(),
        });
    }

    Ok(roots)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
