use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub cache: CacheSettings,
    pub matching: MatchingSettings,
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

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_riders_file")]
    pub riders_file: String,
    #[serde(default = "default_passengers_file")]
    pub passengers_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            riders_file: default_riders_file(),
            passengers_file: default_passengers_file(),
        }
    }
}

fn default_data_dir() -> String { "data".to_string() }
fn default_riders_file() -> String { "riders.json".to_string() }
fn default_passengers_file() -> String { "passengers.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 { 60 }
fn default_cache_capacity() -> u64 { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Scores at or below this value count as a match, between 1 and 4
    #[serde(default = "default_max_score")]
    pub max_score: u8,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_score: default_max_score(),
        }
    }
}

fn default_max_score() -> u8 { crate::core::DEFAULT_MAX_SCORE }

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

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with RIDEMATCH_)
    /// 4. Plain PORT and DATA_DIR variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., RIDEMATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize::<Self>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    /// Reject values that would change which trips count as a match
    ///
    /// Perfect (0) and partial (1) matches must pass, no overlap (5) must fail.
    fn validated(self) -> Result<Self, ConfigError> {
        let max_score = self.matching.max_score;
        if !(MIN_MATCH_THRESHOLD..=MAX_MATCH_THRESHOLD).contains(&max_score) {
            return Err(ConfigError::Message(format!(
                "matching.max_score must be between {} and {}, got {}",
                MIN_MATCH_THRESHOLD, MAX_MATCH_THRESHOLD, max_score
            )));
        }
        Ok(self)
    }
}

const MIN_MATCH_THRESHOLD: u8 = 1;
const MAX_MATCH_THRESHOLD: u8 = 4;

fn env_source() -> Environment {
    Environment::with_prefix("RIDEMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the conventional PORT and DATA_DIR variables used by hosting platforms
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(port) = env::var("PORT") {
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::Message(format!("PORT is not a valid port: {}", port)))?;
        builder = builder.set_override("server.port", i64::from(port))?;
    }
    if let Ok(data_dir) = env::var("DATA_DIR") {
        builder = builder.set_override("storage.data_dir", data_dir)?;
    }

    builder.build()
}
