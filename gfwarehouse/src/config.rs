//! Application configuration management.
//!
//! Configuration is merged from defaults, an optional file, and the
//! environment, with later sources taking precedence.

use crate::Cli;
use anyhow::Context as _;
use gf_axum::config::AxumConfig;
use gf_memory::MemoryConfig;
use gf_mongodb::config::MongoConfig;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration
    #[serde(default)]
    pub server: AxumConfig,

    /// Document store configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Which document store to serve from, and how to reach it.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    /// The store to use
    #[serde(default)]
    pub backend: Backend,

    /// Settings for [`Backend::Mongodb`]
    #[serde(default)]
    pub mongodb: MongoConfig,

    /// Settings for [`Backend::Memory`]
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// The available document stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A MongoDB deployment
    #[default]
    Mongodb,
    /// A process-local store that is lost on exit
    Memory,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. `PORT`, `DB_USER` and `DB_PASS` (highest priority)
    /// 2. `APP_`-prefixed environment variables
    /// 3. Config file given by the CLI
    /// 4. Default values (lowest priority)
    ///
    /// Prefixed variables are mapped using the pattern
    /// `APP_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// # Serve from memory instead of MongoDB
    /// export APP_DATABASE__BACKEND=memory
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="127.0.0.1:3000"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        Self::load_from(cli, None)
    }

    /// As [`Self::load`], reading variables from `env` instead of the process
    /// environment when it is given.
    fn load_from(cli: &Cli, env: Option<config::Map<String, String>>) -> anyhow::Result<Self> {
        let var = |key: &str| match &env {
            Some(env) => env.get(key).cloned(),
            None => std::env::var(key).ok(),
        };

        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps APP_SERVER__BIND_ADDRESS to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env.clone()),
        );

        config = config
            .set_override_option("database.mongodb.username", var("DB_USER"))?
            .set_override_option("database.mongodb.password", var("DB_PASS"))?;

        let mut app_config: Self = config.build()?.try_deserialize()?;

        if let Some(port) = var("PORT") {
            let port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?;
            app_config.server.bind_address.set_port(port);
        }

        Ok(app_config)
    }
}
