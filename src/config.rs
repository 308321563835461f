use serde::Deserialize;

/// URL that selects the process-local key store instead of Postgres.
pub const MEMORY_DB_URL: &str = "memory://";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: Server,
    pub db: Db,
    pub sessions: Sessions,
    pub log: Log,
    pub metrics: Metrics,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Db {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Db {
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_DB_URL
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Sessions {
    /// Idle time after which a session, and any plaintext it still holds, is dropped.
    pub idle_ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Metrics {
    pub enabled: bool,
}

fn default_max_connections() -> u32 {
    5
}

/// Load settings from `config/default.toml`, `config/<env>.toml`, and env overrides.
pub fn load() -> Result<Settings, config::ConfigError> {
    let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    config::Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{env_name}")).required(false))
        .add_source(config::Environment::with_prefix("KEYWARD").separator("__"))
        .build()?
        .try_deserialize()
}
