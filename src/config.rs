//! Application configuration module / 应用配置模块
//!
//! Server and provider settings live in config.json (created with defaults on
//! first run). Credentials come only from the environment and are validated
//! before anything else is built.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const ENV_ACCESS_KEY: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_REGION: &str = "AWS_DEFAULT_REGION";
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage provider configuration / 存储服务配置
    #[serde(default)]
    pub storage: StorageConfig,
    /// Console presentation settings / 控制台设置
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Storage provider configuration / 存储服务配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// S3端点地址, empty means AWS: https://s3.{region}.amazonaws.com
    /// MinIO: http://localhost:9000
    #[serde(default)]
    pub endpoint: String,
    /// 强制使用路径风格 (MinIO等需要设置为true)
    #[serde(default)]
    pub force_path_style: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Name of the one-shot status message cookie
    pub flash_cookie: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5002,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            flash_cookie: "bucket_console_flash".to_string(),
        }
    }
}

impl AppConfig {
    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Provider credentials, immutable for the process lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub session_token: Option<String>,
}

// Keep secrets out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("region", &self.region)
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from any key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError::MissingCredential(key)),
            }
        };

        let access_key = required(ENV_ACCESS_KEY)?;
        let secret_key = required(ENV_SECRET_KEY)?;
        let region = required(ENV_REGION)?;
        let session_token = lookup(ENV_SESSION_TOKEN).filter(|t| !t.is_empty());

        Ok(Self {
            access_key,
            secret_key,
            region,
            session_token,
        })
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load `.env` from the working directory into the process environment.
/// Variables that are already set are left alone; a missing file is fine.
pub fn load_env_file() -> Option<PathBuf> {
    let path = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".env");
    load_env_file_from(&path).then_some(path)
}

pub fn load_env_file_from(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => true,
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!("Ignoring unreadable env file {:?}: {}", path, e);
            false
        }
    }
}

/// Load configuration from ./config.json, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> Result<AppConfig, ConfigError> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config(config_path, &config)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config(config_path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(config_path, content)?;
    Ok(())
}
