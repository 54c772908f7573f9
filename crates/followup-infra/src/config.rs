//! Configuration loader for Followup.
//!
//! Reads `config.toml` from the data directory (`~/.followup/` by default)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use followup_types::config::AppConfig;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "FOLLOWUP_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. Explicit override (CLI flag)
/// 2. `FOLLOWUP_DATA_DIR` environment variable
/// 3. `~/.followup`
pub fn resolve_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".followup");
    }

    PathBuf::from(".followup")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Database URL: the configured one, or `sessions.db` inside the data directory.
pub fn database_url(config: &AppConfig, data_dir: &Path) -> String {
    match config.database.url {
        Some(ref url) => url.clone(),
        None => format!("sqlite://{}?mode=rwc", data_dir.join("sessions.db").display()),
    }
}
