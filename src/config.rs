//! Runtime configuration
//!
//! Values come from environment variables; command-line flags override them.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

use crate::db::Database;

// Environment variable names
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND: &str = "HEYO_BIND";
pub const ENV_API_URL: &str = "HEYO_API_URL";

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Where the server keeps its notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl DatabaseLocation {
    /// Accepts a plain path, a `sqlite://` URL, or `:memory:`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let path = s.strip_prefix("sqlite://").unwrap_or(s);
        if path.is_empty() {
            return Err(anyhow!("{} is empty", ENV_DATABASE_URL));
        }
        if path == ":memory:" {
            return Ok(Self::Memory);
        }
        Ok(Self::File(PathBuf::from(path)))
    }

    pub fn open(&self) -> Result<Database> {
        match self {
            Self::File(path) => Database::open_at(path)
                .with_context(|| format!("Failed to open database at {}", path.display())),
            Self::Memory => Database::open_memory(),
        }
    }
}

impl std::fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => f.write_str(":memory:"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub database: DatabaseLocation,
}

impl ServerConfig {
    /// Resolve from flags first, then environment, then defaults.
    pub fn load(bind: Option<String>, database: Option<String>) -> Result<Self> {
        let bind = bind
            .or_else(|| env_var(ENV_BIND))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;

        let database = match database.or_else(|| env_var(ENV_DATABASE_URL)) {
            Some(s) => DatabaseLocation::parse(&s)?,
            None => DatabaseLocation::File(Database::default_path()?),
        };

        Ok(Self { bind, database })
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
}

impl ClientConfig {
    pub fn load(api_url: Option<String>) -> Result<Self> {
        let raw = api_url
            .or_else(|| env_var(ENV_API_URL))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Ok(Self {
            api_url: parse_api_url(&raw)?,
        })
    }
}

pub fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid API URL: {}", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("Unsupported API URL scheme: {}", other)),
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_location_forms() {
        assert_eq!(
            DatabaseLocation::parse("sqlite:///tmp/notes.db").unwrap(),
            DatabaseLocation::File(PathBuf::from("/tmp/notes.db"))
        );
        assert_eq!(
            DatabaseLocation::parse("notes.db").unwrap(),
            DatabaseLocation::File(PathBuf::from("notes.db"))
        );
        assert_eq!(
            DatabaseLocation::parse(":memory:").unwrap(),
            DatabaseLocation::Memory
        );
        assert!(DatabaseLocation::parse("sqlite://").is_err());
    }

    #[test]
    fn test_server_config_flags() {
        let config =
            ServerConfig::load(Some("0.0.0.0:8080".into()), Some(":memory:".into())).unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.database, DatabaseLocation::Memory);
    }

    #[test]
    fn test_server_config_rejects_bad_bind() {
        assert!(ServerConfig::load(Some("nope".into()), Some(":memory:".into())).is_err());
    }

    #[test]
    fn test_api_url() {
        let config = ClientConfig::load(Some("http://localhost:9000".into())).unwrap();
        assert_eq!(config.api_url.port(), Some(9000));
        assert!(parse_api_url("ftp://localhost").is_err());
        assert!(parse_api_url("not a url").is_err());
    }
}
