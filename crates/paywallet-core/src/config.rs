//! Application configuration management.
//!
//! Configuration is resolved in layers: built-in defaults, then the optional
//! JSON file at `~/.config/paywallet/config.json`, then `PAYWALLET_*`
//! environment variables. The signing secret is only ever read from the
//! environment.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application name used for config directory paths
const APP_NAME: &str = "paywallet";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEVELOPMENT_API_URL: &str = "http://localhost:3000";
pub const PRODUCTION_API_URL: &str = "https://vljen465ka.execute-api.ap-south-1.amazonaws.com";

/// Signing secret accepted in development when none is configured.
const DEVELOPMENT_SECRET: &str = "secret";

const DEFAULT_BIND: &str = "127.0.0.1:8080";

pub const ENV_ENVIRONMENT: &str = "PAYWALLET_ENV";
pub const ENV_API_URL: &str = "PAYWALLET_API_URL";
pub const ENV_JWT_SECRET: &str = "PAYWALLET_JWT_SECRET";
pub const ENV_BIND: &str = "PAYWALLET_BIND";
pub const ENV_SECURE_COOKIES: &str = "PAYWALLET_SECURE_COOKIES";
pub const ENV_LOG_DIR: &str = "PAYWALLET_LOG_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("PAYWALLET_JWT_SECRET must be set outside development")]
    MissingSecret,

    #[error("Invalid listen address `{0}`")]
    InvalidBind(String),

    #[error("Invalid value `{value}` for {key}: expected true or false")]
    InvalidFlag { key: &'static str, value: String },

    #[error("Unknown environment `{0}`: expected development or production")]
    UnknownEnvironment(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    fn default_api_url(self) -> &'static str {
        match self {
            Environment::Development => DEVELOPMENT_API_URL,
            Environment::Production => PRODUCTION_API_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Optional settings from the JSON config file. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub environment: Option<Environment>,
    pub api_url: Option<String>,
    pub bind: Option<String>,
    pub secure_cookies: Option<bool>,
    pub log_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Read the config file if it exists. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(file))
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub api_base_url: String,
    pub jwt_secret: SecretString,
    pub bind_addr: SocketAddr,
    pub secure_cookies: bool,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Resolve from the default config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match Self::config_path() {
            Some(path) => FileConfig::load(&path)?,
            None => None,
        };
        Self::resolve(file.unwrap_or_default(), |key| std::env::var(key).ok())
    }

    /// Layer environment lookups over file settings.
    pub fn resolve<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let environment = match lookup(ENV_ENVIRONMENT) {
            Some(value) => Environment::parse(&value)?,
            None => file.environment.unwrap_or_default(),
        };

        let api_base_url = lookup(ENV_API_URL)
            .or(file.api_url)
            .unwrap_or_else(|| environment.default_api_url().to_string());

        let jwt_secret = match lookup(ENV_JWT_SECRET) {
            Some(secret) => SecretString::from(secret),
            None if environment.is_development() => {
                SecretString::from(DEVELOPMENT_SECRET.to_string())
            }
            None => return Err(ConfigError::MissingSecret),
        };

        let bind = lookup(ENV_BIND)
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        let secure_cookies = match lookup(ENV_SECURE_COOKIES) {
            Some(value) => parse_flag(ENV_SECURE_COOKIES, &value)?,
            None => file
                .secure_cookies
                .unwrap_or(!environment.is_development()),
        };

        let log_dir = lookup(ENV_LOG_DIR).map(PathBuf::from).or(file.log_dir);

        Ok(Self {
            environment,
            api_base_url,
            jwt_secret,
            bind_addr,
            secure_cookies,
            log_dir,
        })
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Whether the signing secret is the built-in development value
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret.expose_secret() == DEVELOPMENT_SECRET
    }
}

/// Redacted summary, safe to print.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "environment:    {}", self.environment)?;
        writeln!(f, "api_base_url:   {}", self.api_base_url)?;
        writeln!(f, "jwt_secret:     [redacted]")?;
        writeln!(f, "bind_addr:      {}", self.bind_addr)?;
        writeln!(f, "secure_cookies: {}", self.secure_cookies)?;
        match &self.log_dir {
            Some(dir) => write!(f, "log_dir:        {}", dir.display()),
            None => write!(f, "log_dir:        (stderr only)"),
        }
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}
