use std::env;

/// Process configuration, read once at startup from the environment
/// (`.env` is loaded by main before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Public URL embedded in ticket links and scannable artifacts.
    pub base_url: String,
    pub ticket_prefix: String,
}

impl Config {
    pub fn from_env() -> Config {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:eventdesk.db?mode=rwc".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));
        let ticket_prefix = env::var("TICKET_PREFIX").unwrap_or_else(|_| "RWT".to_string());

        Config {
            host,
            port,
            database_url,
            base_url,
            ticket_prefix,
        }
    }
}
