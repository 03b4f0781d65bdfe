//! Driver configuration, loaded from `docintake.ron` in the working
//! directory. A missing file falls back to defaults; an unreadable or
//! unparseable file is logged and also falls back to defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use intake_client::ServiceSettings;
use intake_logging::{intake_info, intake_warn};
use serde::Deserialize;
use url::Url;

pub const CONFIG_FILENAME: &str = "docintake.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub accepted_extensions: Vec<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Destination for the developer log, relative to the working directory.
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            accepted_extensions: [".pdf", ".doc", ".docx", ".png", ".csv"]
                .map(str::to_string)
                .to_vec(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            log_file: "intake.log".to_string(),
        }
    }
}

impl AppConfig {
    /// Settings for the HTTP client; an invalid base URL is logged and
    /// replaced by the default endpoint.
    pub fn service_settings(&self) -> ServiceSettings {
        let mut settings = ServiceSettings::default();
        match Url::parse(&self.base_url) {
            Ok(base_url) => settings.base_url = base_url,
            Err(err) => {
                intake_warn!(
                    "Invalid base_url {:?} in config: {}; using {}",
                    self.base_url,
                    err,
                    settings.base_url
                );
            }
        }
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = Duration::from_secs(self.request_timeout_secs);
        settings
    }

    /// Extension filter for the `open` command; `extension` has no dot.
    pub fn accepts(&self, extension: &str) -> bool {
        let dotted = format!(".{extension}");
        self.accepted_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&dotted))
    }
}

pub fn load(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            intake_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            intake_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            intake_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
