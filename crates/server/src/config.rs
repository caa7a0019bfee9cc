use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Secret used when none is configured. Tokens signed with it are only fit
/// for local development.
pub const DEV_JWT_SECRET: &str = "storefront-dev-secret";

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Install the Prometheus recorder behind `/metrics`
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// HS256 signing secret for access tokens
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Access token lifetime in seconds
    #[serde(default = "default_jwt_ttl_secs")]
    pub jwt_ttl_secs: u64,

    /// Directory uploaded files are written to and served from
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// redb database file; the store stays in memory when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// bcrypt work factor for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            jwt_secret: None,
            jwt_ttl_secs: default_jwt_ttl_secs(),
            upload_dir: default_upload_dir(),
            store_path: None,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `STOREFRONT__*` environment variables, in increasing priority.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env file is the normal case outside development.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("STOREFRONT").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    pub fn jwt_secret(&self) -> &str {
        self.jwt_secret.as_deref().unwrap_or(DEV_JWT_SECRET)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_jwt_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_bcrypt_cost() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size(), 10 * 1024 * 1024);
        assert_eq!(cfg.jwt_ttl_secs, 86_400);
        assert!(cfg.store_path.is_none());
        assert!(cfg.enable_cors);
        assert!(cfg.metrics_enabled);
    }

    #[test]
    fn test_jwt_secret_fallback() {
        let mut cfg = ServerConfig::default();
        assert_eq!(cfg.jwt_secret(), DEV_JWT_SECRET);
        cfg.jwt_secret = Some("prod".into());
        assert_eq!(cfg.jwt_secret(), "prod");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: ServerConfig = serde_json::from_value(serde_json::json!({
            "port": 8081,
            "store_path": "/tmp/storefront.redb",
        }))
        .unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.store_path, Some(PathBuf::from("/tmp/storefront.redb")));
        assert_eq!(cfg.bcrypt_cost, 10);
    }
}
