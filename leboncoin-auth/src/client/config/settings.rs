use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Base URL of the backend API; auth endpoints live under `{api_url}/auth`
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Overrides the token store location (defaults to the user cache dir)
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_path: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("LEBONCOIN_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("LEBONCOIN").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("api_url is required".to_string());
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err("api_url must be a valid HTTP(S) URL".to_string());
        }
        Ok(())
    }
}
