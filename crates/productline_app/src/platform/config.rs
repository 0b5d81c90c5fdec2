use std::fs;
use std::path::Path;
use std::time::Duration;

use log::LevelFilter;
use productline_engine::ClientSettings;
use productline_logging::{sync_info, sync_warn};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub(crate) const CONFIG_FILENAME: &str = "productline.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub verbose: bool,
    /// Poll and render interval of the console loop.
    pub render_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            log_destination: LogDestination::default(),
            verbose: false,
            render_interval_ms: 75,
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms.max(1))
    }
}

/// Reads the configuration file, falling back to defaults when it is missing
/// or unreadable. Problems are returned as warnings because logging is not
/// initialized until the configuration is known.
pub(crate) fn load_config(path: &Path) -> (AppConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(err) => {
            return (
                AppConfig::default(),
                Some(format!("Failed to read config from {:?}: {}", path, err)),
            );
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, None),
        Err(err) => (
            AppConfig::default(),
            Some(format!("Failed to parse config from {:?}: {}", path, err)),
        ),
    }
}

/// Logs the outcome of [`load_config`] once logging is up.
pub(crate) fn report(path: &Path, warning: Option<&str>) {
    match warning {
        Some(warning) => sync_warn!("{}; using defaults", warning),
        None => sync_info!("Configuration loaded from {:?}", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults_without_warning() {
        let temp = TempDir::new().unwrap();
        let (config, warning) = load_config(&temp.path().join(CONFIG_FILENAME));

        assert_eq!(config, AppConfig::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(base_url: "https://jobs.example.com/api", request_timeout_secs: 5, log_destination: Both)"#,
        )
        .unwrap();

        let (config, warning) = load_config(&path);
        assert!(warning.is_none());
        assert_eq!(config.base_url, "https://jobs.example.com/api");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.connect_timeout_secs, 10);

        let settings = config.client_settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_file_warns_and_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(base_url: ").unwrap();

        let (config, warning) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert!(warning.unwrap().starts_with("Failed to parse config"));
    }
}
