//! Environment configuration. `.env` is honored when the caller runs
//! `dotenvy::dotenv()` first.

use crate::error::AppError;
use std::net::SocketAddr;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/registrar".into());
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".into())
            .parse()
            .map_err(|e| AppError::Config(format!("invalid BIND_ADDR: {}", e)))?;
        let max_connections = match std::env::var("MAX_CONNECTIONS") {
            Ok(v) => v
                .parse()
                .map_err(|e| AppError::Config(format!("invalid MAX_CONNECTIONS: {}", e)))?,
            Err(_) => 5,
        };
        Ok(Config {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}
