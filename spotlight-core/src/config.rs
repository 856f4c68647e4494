use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SpotlightError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.unsplash.com";
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    pub access_key: String,
    pub api_base_url: String,
    pub per_page: u32,
    pub random_count: u32,
    pub request_timeout_seconds: u64,
    pub download_dir: Option<PathBuf>,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            per_page: 30,
            random_count: 30,
            request_timeout_seconds: 10,
            download_dir: None,
        }
    }
}

impl SpotlightConfig {
    /// Directory holding `config.json` and the bookmark file.
    pub fn config_dir() -> PathBuf {
        let mut dir = dirs::config_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        dir.push("spotlight");
        dir
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file is missing or invalid. The access key can always be overridden
    /// through `UNSPLASH_ACCESS_KEY`.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut config = match std::fs::read(path) {
            Ok(bytes) => match serde_json::from_slice::<SpotlightConfig>(&bytes) {
                Ok(config) => config,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        config.apply_env();
        config
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SpotlightError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(ACCESS_KEY_ENV) {
            if !key.trim().is_empty() {
                self.access_key = key.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), SpotlightError> {
        if self.access_key.trim().is_empty() {
            return Err(SpotlightError::Config(format!(
                "no access key configured; set {ACCESS_KEY_ENV} or add \"access_key\" to config.json"
            )));
        }
        if self.per_page == 0 {
            return Err(SpotlightError::Config("per_page must be at least 1".into()));
        }
        url::Url::parse(&self.api_base_url)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
