//! Configuration du backend
//!
//! Sources, par ordre de priorité:
//! - variables d'environnement préfixées `APP__` (ex: `APP__DATABASE__URL`)
//! - `DATABASE_URL` (compatibilité avec le `.env` historique)
//! - valeurs par défaut

use config::{Config, ConfigBuilder, Environment, builder::DefaultState};
use serde::Deserialize;

use crate::errors::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// URL du store (postgres://... ou sqlite://...)
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Trace chaque requête SQL via tracing
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

impl AppConfig {
    /// Charge la configuration depuis l'environnement (après `dotenv`).
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database.url", url)?;
        }
        Self::from_builder(builder.add_source(Environment::with_prefix("APP").separator("__")))
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}
