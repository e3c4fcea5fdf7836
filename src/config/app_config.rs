use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::CorruptionPolicy;
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::storage::{FileStoreConfig, StorageConfig, DEFAULT_NAMESPACE};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built front-end bundle to serve next to the API
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding one JSON file per entity (file backend)
    pub data_dir: PathBuf,
    /// Key prefix (memory backend)
    pub namespace: String,
    /// Fail reads of malformed collections instead of treating them as empty
    pub strict: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            static_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: PathBuf::from("data"),
            namespace: DEFAULT_NAMESPACE.to_string(),
            strict: false,
        }
    }
}

impl StorageSettings {
    pub fn to_storage_config(&self) -> StorageConfig {
        let config = match self.backend {
            StorageBackend::File => StorageConfig::File(FileStoreConfig::new(&self.data_dir)),
            StorageBackend::Memory => StorageConfig::InMemory {
                namespace: self.namespace.clone(),
                corruption: CorruptionPolicy::default(),
            },
        };

        config.with_corruption_policy(CorruptionPolicy::from_strict(self.strict))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
