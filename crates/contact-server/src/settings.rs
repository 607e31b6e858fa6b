//! Server configuration
//!
//! Defaults overlaid by `CONTACT_*` environment variables. A bare `PORT`
//! is honoured as well for hosting platforms that only set that.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;

/// Which `SubmissionStore` backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub database_path: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_sources(
            config::Environment::with_prefix("CONTACT"),
            std::env::var("PORT").ok(),
        )
    }

    fn from_sources(env: config::Environment, port_override: Option<String>) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3010)?
            .set_default("store", "memory")?
            .set_default("database_path", "data/contacts.db")?
            .add_source(env.try_parsing(true))
            .set_override_option("port", port_override)?
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}
