//! Configuration management for the MCP server.
//!
//! Configuration is assembled from defaults and `MCP_`-prefixed environment
//! variables (a `.env` file is honored when present).

use super::transport::TransportConfig;
use crate::domains::terraform::endpoints::DEFAULT_REGISTRY_URL;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default registry request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Terraform registry access.
    pub registry: RegistryConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS`.
    ///
    /// Needs nothing else from the environment, so the subscriber can be
    /// installed before the rest of the configuration is read and its
    /// warnings are not lost.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps =
                !matches!(timestamps.to_lowercase().as_str(), "false" | "0");
        }
        logging
    }
}

/// Terraform registry access configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry root, without trailing slash.
    pub base_url: String,

    /// Provider namespace assumed when a tool call names none.
    pub default_namespace: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent with every registry request.
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            default_namespace: "hashicorp".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RegistryConfig {
    /// Apply `MCP_REGISTRY_*` overrides to the defaults.
    pub fn from_env() -> Self {
        let mut registry = Self::default();

        if let Ok(url) = std::env::var("MCP_REGISTRY_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                warn!("MCP_REGISTRY_URL is empty, using {}", registry.base_url);
            } else {
                registry.base_url = url.to_string();
                info!("Using Terraform registry at {}", registry.base_url);
            }
        }

        if let Ok(namespace) = std::env::var("MCP_DEFAULT_NAMESPACE") {
            if !namespace.trim().is_empty() {
                registry.default_namespace = namespace.trim().to_string();
            }
        }

        if let Ok(timeout) = std::env::var("MCP_REGISTRY_TIMEOUT_SECS") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => registry.timeout_secs = secs,
                _ => warn!(
                    "Invalid MCP_REGISTRY_TIMEOUT_SECS {:?}, using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        registry
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "terraform-registry-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_REGISTRY_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();
        config.transport = TransportConfig::from_env();
        config.registry = RegistryConfig::from_env();

        config
    }
}

// Mutex to ensure env var tests run serially
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY_VARS: [&str; 3] = [
        "MCP_REGISTRY_URL",
        "MCP_DEFAULT_NAMESPACE",
        "MCP_REGISTRY_TIMEOUT_SECS",
    ];

    fn clear_registry_env() {
        for var in REGISTRY_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_registry_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_registry_env();
        let registry = RegistryConfig::from_env();
        assert_eq!(registry.base_url, "https://registry.terraform.io");
        assert_eq!(registry.default_namespace, "hashicorp");
        assert_eq!(registry.timeout_secs, 30);
        assert!(registry.user_agent.starts_with("terraform_registry_mcp/"));
    }

    #[test]
    fn test_registry_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_REGISTRY_URL", "https://mirror.example/ ");
            std::env::set_var("MCP_DEFAULT_NAMESPACE", "myorg");
            std::env::set_var("MCP_REGISTRY_TIMEOUT_SECS", "5");
        }
        let registry = RegistryConfig::from_env();
        clear_registry_env();

        assert_eq!(registry.base_url, "https://mirror.example");
        assert_eq!(registry.default_namespace, "myorg");
        assert_eq!(registry.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_registry_env();
        for bad in ["soon", "0", "-3"] {
            unsafe {
                std::env::set_var("MCP_REGISTRY_TIMEOUT_SECS", bad);
            }
            assert_eq!(RegistryConfig::from_env().timeout_secs, DEFAULT_TIMEOUT_SECS);
        }
        clear_registry_env();
    }

    #[test]
    fn test_logging_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "0");
        }
        let logging = LoggingConfig::from_env();
        let config = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }

        assert_eq!(logging.level, "debug");
        assert!(!logging.with_timestamps);
        assert_eq!(config.logging.level, logging.level);
        assert_eq!(config.logging.with_timestamps, logging.with_timestamps);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.name, "terraform-registry-mcp");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.registry, RegistryConfig::default());
    }
}
