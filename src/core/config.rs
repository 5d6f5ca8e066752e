use dotenv::dotenv;
use std::env;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub session_cleanup_interval_secs: u64,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Costruisce la configurazione da una funzione di lookup (usata anche nei test)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            warn!("DATABASE_URL not set, using sqlite://chat.db");
            "sqlite://chat.db".to_string()
        });

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = lookup("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let connection_lifetime_secs = lookup("DB_CONNECTION_LIFETIME_SECS")
            .unwrap_or_else(|| "1800".to_string())
            .parse::<u64>()
            .map_err(|_| {
                "Invalid DB_CONNECTION_LIFETIME_SECS: must be a positive number".to_string()
            })?;

        let session_cleanup_interval_secs = lookup("SESSION_CLEANUP_INTERVAL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse::<u64>()
            .map_err(|_| {
                "Invalid SESSION_CLEANUP_INTERVAL_SECS: must be a non-negative number".to_string()
            })?;

        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        Ok(Config {
            database_url,
            server_host,
            server_port,
            max_connections,
            connection_lifetime_secs,
            session_cleanup_interval_secs,
            app_env,
        })
    }

    /// In produzione il cookie di sessione viene marcato `Secure`
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn log_info(&self) {
        info!(
            environment = %self.app_env,
            address = %format!("{}:{}", self.server_host, self.server_port),
            database = %Self::mask_url(&self.database_url),
            max_connections = self.max_connections,
            connection_lifetime_secs = self.connection_lifetime_secs,
            session_cleanup_interval_secs = self.session_cleanup_interval_secs,
            "Server configuration"
        );
    }

    /// Maschera le credenziali dell'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
            return "***".to_string();
        }
        url.to_string()
    }
}
