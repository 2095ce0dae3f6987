use crate::models::MatchingWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    /// Days without activity before an active match expires (default 30)
    pub inactive_threshold_days: Option<i64>,
    /// Seconds between background cleanup sweeps (default 3600, 0 disables)
    pub cleanup_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_topic_weight")]
    pub topic_overlap: f64,
    #[serde(default = "default_college_weight")]
    pub college_similarity: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_reputation_weight")]
    pub reputation: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            topic_overlap: default_topic_weight(),
            college_similarity: default_college_weight(),
            availability: default_availability_weight(),
            reputation: default_reputation_weight(),
        }
    }
}

impl From<&WeightsConfig> for MatchingWeights {
    fn from(config: &WeightsConfig) -> Self {
        MatchingWeights {
            topic_overlap: config.topic_overlap,
            college_similarity: config.college_similarity,
            availability: config.availability,
            reputation: config.reputation,
        }
    }
}

impl WeightsConfig {
    /// Every weight must be a finite, non-negative number
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("topic_overlap", self.topic_overlap),
            ("college_similarity", self.college_similarity),
            ("availability", self.availability),
            ("reputation", self.reputation),
        ];
        match named.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            Some((name, w)) => Err(ConfigError::Message(format!(
                "matching.weights.{} must be a non-negative number, got {}",
                name, w
            ))),
            None => Ok(()),
        }
    }
}

fn default_topic_weight() -> f64 { 0.4 }
fn default_college_weight() -> f64 { 0.2 }
fn default_availability_weight() -> f64 { 0.2 }
fn default_reputation_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl MatchingSettings {
    pub fn inactive_threshold(&self) -> chrono::Duration {
        chrono::Duration::days(self.inactive_threshold_days.unwrap_or(30))
    }

    pub fn cleanup_interval_secs(&self) -> u64 {
        self.cleanup_interval_secs.unwrap_or(3600)
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        settings.matching.weights.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        settings.matching.weights.validate()?;
        Ok(settings)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MENTOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
