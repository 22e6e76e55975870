use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Port the server listens on
    pub port: ConfigValue<u16>,
    /// Address the server binds to
    pub bind_address: ConfigValue<String>,
    /// Path to the JSON document
    pub document_path: ConfigValue<PathBuf>,
    /// Directory for backups taken before full-document saves
    pub backup_dir: ConfigValue<Option<PathBuf>>,
    /// Directory holding index.html, admin.html and other site files
    pub static_dir: ConfigValue<PathBuf>,
    /// Shared admin password; logins always fail when unset
    #[serde(serialize_with = "mask_password")]
    pub admin_password: ConfigValue<Option<String>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    port: Option<u16>,
    bind_address: Option<String>,
    document_path: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    admin_password: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], reading environment variables through `env`.
    pub fn load_with_env(
        config_path: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = Self::default_data_dir();

        // Start with defaults
        let mut port = ConfigValue::new(3001, ConfigSource::Default);
        let mut bind_address = ConfigValue::new("0.0.0.0".to_string(), ConfigSource::Default);
        let mut document_path =
            ConfigValue::new(data_dir.join("config.json"), ConfigSource::Default);
        let mut backup_dir = ConfigValue::new(None, ConfigSource::Default);
        let mut static_dir = ConfigValue::new(data_dir.join("public"), ConfigSource::Default);
        let mut admin_password = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path
            .or_else(|| env("HOMEPAGE_CONFIG").map(PathBuf::from))
            .unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(p) = file_config.port {
                port = ConfigValue::new(p, ConfigSource::File);
            }
            if let Some(addr) = file_config.bind_address {
                bind_address = ConfigValue::new(addr, ConfigSource::File);
            }
            if let Some(doc) = file_config.document_path {
                document_path = ConfigValue::new(resolve(&path, doc), ConfigSource::File);
            }
            if let Some(dir) = file_config.backup_dir {
                backup_dir = ConfigValue::new(Some(resolve(&path, dir)), ConfigSource::File);
            }
            if let Some(dir) = file_config.static_dir {
                static_dir = ConfigValue::new(resolve(&path, dir), ConfigSource::File);
            }
            if let Some(password) = file_config.admin_password {
                admin_password = ConfigValue::new(Some(password), ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Some(value) = env("HOMEPAGE_PORT") {
            let p = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HOMEPAGE_PORT", value.clone()))?;
            port = ConfigValue::new(p, ConfigSource::Environment);
        }
        if let Some(addr) = env("HOMEPAGE_BIND_ADDRESS") {
            bind_address = ConfigValue::new(addr, ConfigSource::Environment);
        }
        if let Some(doc) = env("HOMEPAGE_DOCUMENT") {
            document_path = ConfigValue::new(PathBuf::from(doc), ConfigSource::Environment);
        }
        if let Some(dir) = env("HOMEPAGE_BACKUP_DIR") {
            backup_dir = ConfigValue::new(Some(PathBuf::from(dir)), ConfigSource::Environment);
        }
        if let Some(dir) = env("HOMEPAGE_STATIC_DIR") {
            static_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(password) = env("HOMEPAGE_ADMIN_PASSWORD") {
            admin_password = ConfigValue::new(Some(password), ConfigSource::Environment);
        }

        Ok(Self {
            port,
            bind_address,
            document_path,
            backup_dir,
            static_dir,
            admin_password,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/homepage/
    /// - macOS: ~/Library/Application Support/homepage/
    /// - Windows: %APPDATA%/homepage/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("homepage")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/homepage/
    /// - macOS: ~/Library/Application Support/homepage/
    /// - Windows: %APPDATA%/homepage/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("homepage")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Resolve relative paths against the config file's directory
fn resolve(config_path: &Path, value: PathBuf) -> PathBuf {
    if value.is_relative() {
        config_path
            .parent()
            .map(|p| p.join(&value))
            .unwrap_or(value)
    } else {
        value
    }
}

fn mask_password<S: Serializer>(
    password: &ConfigValue<Option<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let masked = ConfigValue::new(
        password.value.as_ref().map(|_| "********"),
        password.source.clone(),
    );
    masked.serialize(serializer)
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
