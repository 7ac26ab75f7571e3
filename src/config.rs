use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://openapi.naver.com/v1/search/book.json";
pub const CLIENT_ID_VAR: &str = "NAVER_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "NAVER_CLIENT_SECRET";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub naver: NaverConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_json_payload_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaverConfig {
    pub search_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                workers: num_cpus::get(),
                max_json_payload_size: 2_000_000, // 2MB
            },
            naver: NaverConfig {
                search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup so the
    /// parsing rules can be exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Server configuration
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = port.parse()?;
        }
        if let Some(workers) = lookup("WORKERS") {
            config.server.workers = workers.parse()?;
        }
        if let Some(max_json_payload_size) = lookup("MAX_JSON_PAYLOAD_SIZE") {
            config.server.max_json_payload_size = max_json_payload_size.parse()?;
        }

        // Provider configuration
        if let Some(endpoint) = lookup("NAVER_SEARCH_ENDPOINT") {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                config.naver.search_endpoint = endpoint.to_string();
            }
        }

        // Security configuration
        if let Some(allowed_origins) = lookup("ALLOWED_ORIGINS") {
            config.security.allowed_origins = allowed_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }
}

/// Client credentials attached to every outbound provider call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Source of provider credentials, consulted once per invocation.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Credentials;
}

/// Reads credentials from the process environment at call time.
/// Unset variables become empty strings.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    client_id_var: String,
    client_secret_var: String,
}

impl EnvCredentials {
    pub fn new(client_id_var: impl Into<String>, client_secret_var: impl Into<String>) -> Self {
        Self {
            client_id_var: client_id_var.into(),
            client_secret_var: client_secret_var.into(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(CLIENT_ID_VAR, CLIENT_SECRET_VAR)
    }
}

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Credentials {
        Credentials {
            client_id: env::var(&self.client_id_var).unwrap_or_default(),
            client_secret: env::var(&self.client_secret_var).unwrap_or_default(),
        }
    }
}

/// Fixed credentials, mostly useful for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Credentials);

impl CredentialSource for StaticCredentials {
    fn credentials(&self) -> Credentials {
        self.0.clone()
    }
}
