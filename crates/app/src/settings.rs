//! Application settings, read from `settings.toml`.
use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// Path of the JSON expense document. Defaults next to the binary.
    pub store: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Advisor {
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct FeatureRequest {
    pub forward_url: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub advisor: Option<Advisor>,
    pub feature_request: Option<FeatureRequest>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .build()?;

        settings.try_deserialize()
    }
}
