use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Bearer credential for the Printful API. Absence is not a startup
    /// failure; every catalog request reports it as a configuration error.
    pub printful_api_key: Option<String>,
    pub printful_base_url: String,
    /// `None` leaves the transport default in place.
    pub printful_request_timeout_secs: Option<u64>,
    pub user_agent: String,
    /// Normalizer endpoint the CLI `browse` command reads from.
    pub storefront_endpoint: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "printful_api_key",
                &self.printful_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("printful_base_url", &self.printful_base_url)
            .field(
                "printful_request_timeout_secs",
                &self.printful_request_timeout_secs,
            )
            .field("user_agent", &self.user_agent)
            .field("storefront_endpoint", &self.storefront_endpoint)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
