use crate::domain::entities::RealmDefinition;
use crate::domain::errors::{ConfigError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_KEYCLOAK_URL: &str = "http://keycloak:9001/auth";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "welcome";
pub const DEFAULT_ADMIN_REALM: &str = "master";
pub const DEFAULT_ADMIN_CLIENT_ID: &str = "admin-cli";

/// Configuration port for accessing application configuration
pub trait ConfigurationPort: Send + Sync {
    /// Get Keycloak server configuration
    fn get_keycloak_config(&self) -> &KeycloakConfig;

    /// Get HTTP client configuration
    fn get_http_config(&self) -> &HttpConfig;

    /// Get logging configuration
    fn get_logging_config(&self) -> &LoggingConfig;

    /// Realms to provision, in order
    fn get_realm_definitions(&self) -> &[RealmDefinition];

    /// Validate all configuration
    fn validate(&self) -> DomainResult<()>;
}

/// Keycloak server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    pub url: String,
    pub admin_realm: String,
    pub admin_client_id: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for KeycloakConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_KEYCLOAK_URL.to_string(),
            admin_realm: DEFAULT_ADMIN_REALM.to_string(),
            admin_client_id: DEFAULT_ADMIN_CLIENT_ID.to_string(),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

// Keeps the admin password out of logs.
impl std::fmt::Debug for KeycloakConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakConfig")
            .field("url", &self.url)
            .field("admin_realm", &self.admin_realm)
            .field("admin_client_id", &self.admin_client_id)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"***")
            .finish()
    }
}

impl KeycloakConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_SERVER".to_string(),
            }
            .into());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "KEYCLOAK_SERVER".to_string(),
                message: "Must start with http:// or https://".to_string(),
            }
            .into());
        }

        if self.admin_username.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_USER".to_string(),
            }
            .into());
        }

        if self.admin_password.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_PASSWORD".to_string(),
            }
            .into());
        }

        if self.admin_realm.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_ADMIN_REALM".to_string(),
            }
            .into());
        }

        if self.admin_client_id.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_ADMIN_CLIENT_ID".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Base URL without a trailing slash, as the admin client expects it
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn get_auth_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.base_url(),
            self.admin_realm
        )
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub max_idle_connections: usize,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            max_idle_connections: 10,
            user_agent: concat!("keycloak-setup/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_CONNECT_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
    Full,
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub keycloak: KeycloakConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub realms: Vec<RealmDefinition>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keycloak: KeycloakConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
            realms: RealmDefinition::defaults(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> DomainResult<()> {
        self.keycloak.validate()?;
        self.http.validate()?;
        RealmDefinition::validate_all(&self.realms)?;
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which resolves a variable name to
    /// its value. Unset variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let keycloak = KeycloakConfig {
            url: string("KEYCLOAK_SERVER", &defaults.keycloak.url),
            admin_realm: string("KEYCLOAK_ADMIN_REALM", &defaults.keycloak.admin_realm),
            admin_client_id: string("KEYCLOAK_ADMIN_CLIENT_ID", &defaults.keycloak.admin_client_id),
            admin_username: string("KEYCLOAK_USER", &defaults.keycloak.admin_username),
            admin_password: string("KEYCLOAK_PASSWORD", &defaults.keycloak.admin_password),
        };

        let http = HttpConfig {
            timeout_seconds: parse_or(&lookup, "HTTP_TIMEOUT_SECONDS", defaults.http.timeout_seconds)?,
            connect_timeout_seconds: parse_or(
                &lookup,
                "HTTP_CONNECT_TIMEOUT_SECONDS",
                defaults.http.connect_timeout_seconds,
            )?,
            max_idle_connections: parse_or(
                &lookup,
                "HTTP_MAX_IDLE_CONNECTIONS",
                defaults.http.max_idle_connections,
            )?,
            user_agent: string("HTTP_USER_AGENT", &defaults.http.user_agent),
        };

        let logging = LoggingConfig {
            level: parse_or(&lookup, "LOG_LEVEL", defaults.logging.level)?,
            format: parse_or(&lookup, "LOG_FORMAT", defaults.logging.format)?,
        };

        let realms = match lookup("KEYCLOAK_SETUP_REALMS_FILE") {
            Some(path) if !path.trim().is_empty() => load_realm_definitions(Path::new(path.trim()))?,
            _ => defaults.realms,
        };

        let config = AppConfig {
            keycloak,
            http,
            logging,
            realms,
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> DomainResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
            .into()
        }),
        None => Ok(default),
    }
}

/// Read a JSON array of realm definitions from `path`
pub fn load_realm_definitions(path: &Path) -> DomainResult<Vec<RealmDefinition>> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileError {
        message: format!("Failed to read realm definitions from {}: {e}", path.display()),
    })?;

    let definitions: Vec<RealmDefinition> =
        serde_json::from_str(&contents).map_err(|e| ConfigError::FileError {
            message: format!("Failed to parse realm definitions in {}: {e}", path.display()),
        })?;

    Ok(definitions)
}

/// String parsing implementations
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "full" => Ok(LogFormat::Full),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}
