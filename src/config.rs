//! Environment-derived runtime configuration, resolved once at startup.
//! Missing required values fail fast with a message naming the variable;
//! everything else falls back to a sensible deployment default.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Frontend origins allowed to send credentialed requests.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,https://ocean-side-hotel.web.app,https://ocean-side-hotel.firebaseapp.com";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_OP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: String,
    pub access_token_secret: String,
    pub allowed_origins: Vec<String>,
    pub db_op_deadline: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = parse_port_env("PORT", DEFAULT_PORT)?;
        let mongodb_uri = env::var("MONGODB_URI").context("MONGODB_URI must be set")?;
        let access_token_secret = env::var("ACCESS_TOKEN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .context("ACCESS_TOKEN_SECRET must be set and non-empty")?;
        let origins = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        let allowed_origins: Vec<String> = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let db_op_deadline =
            Duration::from_secs(parse_secs_env("DB_OP_TIMEOUT_SECS", DEFAULT_DB_OP_TIMEOUT_SECS)?);
        Ok(Self { port, mongodb_uri, access_token_secret, allowed_origins, db_op_deadline })
    }
}

fn parse_port_env(name: &str, default: u16) -> Result<u16> {
    match env::var(name) {
        Ok(v) => v.parse::<u16>().with_context(|| format!("invalid {name}: '{v}'")),
        Err(_) => Ok(default),
    }
}

fn parse_secs_env(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(v) => v.parse::<u64>().with_context(|| format!("invalid {name}: '{v}'")),
        Err(_) => Ok(default),
    }
}
