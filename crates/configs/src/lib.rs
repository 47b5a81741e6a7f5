use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Which binary is loading the configuration; decides the default file and
/// which sections must be valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    DataService,
    BusinessService,
}

impl Role {
    pub fn default_path(self) -> &'static str {
        match self {
            Role::DataService => "config/data-service.toml",
            Role::BusinessService => "config/business-service.toml",
        }
    }

    fn default_port(self) -> u16 {
        match self {
            Role::DataService => 8081,
            Role::BusinessService => 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub data_service: DataServiceConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 0, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Where the business service finds the data service.
#[derive(Debug, Clone, Deserialize)]
pub struct DataServiceConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_client_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_client_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            connect_timeout_secs: default_client_connect_timeout(),
            request_timeout_secs: default_client_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { low_stock_threshold: default_low_stock_threshold() }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_client_connect_timeout() -> u64 { 5 }
fn default_client_request_timeout() -> u64 { 30 }
fn default_low_stock_threshold() -> i64 { 10 }

const DEFAULT_DATA_SERVICE_URL: &str = "http://127.0.0.1:8081";

/// Reads `CONFIG_PATH`, or the role's default file. A missing default file is not an
/// error: the service then runs on defaults plus environment variables.
pub fn load_default(role: Role) -> Result<AppConfig> {
    match std::env::var("CONFIG_PATH") {
        Ok(path) => load_from_file(&path),
        Err(_) if Path::new(role.default_path()).exists() => load_from_file(role.default_path()),
        Err(_) => Ok(AppConfig::default()),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {path}"))?;
    parse(&content).with_context(|| format!("parsing config file {path}"))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate(role: Role) -> Result<Self> {
        let mut cfg = load_default(role)?;
        cfg.normalize_and_validate(role)?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self, role: Role) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize(role)?;
        match role {
            Role::DataService => {
                self.database.normalize_from_env();
                self.database.validate()?;
            }
            Role::BusinessService => {
                self.data_service.normalize_from_env();
                self.data_service.validate()?;
                self.inventory.validate()?;
            }
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if self.port == 0 {
            if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
                self.port = port;
            }
        }
    }

    fn normalize(&mut self, role: Role) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            self.port = role.default_port();
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in the config file or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://")
            || lower.starts_with("postgres://")
            || lower.starts_with("sqlite:"))
        {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive"));
        }
        Ok(())
    }
}

impl DataServiceConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(url) = std::env::var("DATA_SERVICE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if self.base_url.trim().is_empty() {
            self.base_url = DEFAULT_DATA_SERVICE_URL.to_string();
        }
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("data_service.base_url must be an http(s) URL"));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(anyhow!("data_service timeouts must be positive"));
        }
        Ok(())
    }
}

impl InventoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.low_stock_threshold < 0 {
            return Err(anyhow!("inventory.low_stock_threshold must be >= 0"));
        }
        Ok(())
    }
}
