//! Configuration for the repotagger server.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags (`--port`, `--db-path`)
//! 2. Environment variables prefixed with `REPOTAGGER_` (a `.env` file is
//!    loaded first), e.g. `REPOTAGGER_DBPATH`, `REPOTAGGER_PORT`
//! 3. Config file `./repotagger.toml`
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! dbpath = "repoTagger.db"
//! port = 8080
//! api_url = "https://api.github.com"
//! page_concurrency = 100
//! request_timeout_secs = 30
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use config::builder::DefaultState;
use config::{Config as Settings, ConfigBuilder, Environment, File, FileFormat};
use repotagger::github::{DEFAULT_API_URL, DEFAULT_PAGE_FETCH_CONCURRENCY};
use repotagger::http::DEFAULT_REQUEST_TIMEOUT;
use serde::Deserialize;

const LOCAL_CONFIG_FILE: &str = "repotagger.toml";
const ENV_PREFIX: &str = "REPOTAGGER";

/// Command-line arguments. Anything given here wins over every other source.
#[derive(Debug, Default, Parser)]
#[command(name = "repotagger", version, about = "Tag and search your GitHub stars")]
pub struct Args {
    /// Port to listen on.
    #[arg(long)]
    pub port: Option<u16>,

    /// SQLite database file (or a full database URL).
    #[arg(long)]
    pub db_path: Option<String>,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file, or a full `sqlite:` URL.
    pub dbpath: String,
    pub port: u16,
    /// Root of the GitHub-compatible REST API.
    pub api_url: String,
    /// Maximum page fetches in flight for one collection.
    pub page_concurrency: usize,
    /// Per-request timeout for outbound API calls.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dbpath: "repoTagger.db".to_string(),
            port: 8080,
            api_url: DEFAULT_API_URL.to_string(),
            page_concurrency: DEFAULT_PAGE_FETCH_CONCURRENCY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the config file and the environment.
    ///
    /// Unreadable sources are logged and the defaults are used instead.
    pub fn load() -> Self {
        let mut builder = Settings::builder();

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            tracing::debug!("Loading config from ./{}", LOCAL_CONFIG_FILE);
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        Self::from_builder(builder.add_source(env_source()))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Self {
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Apply CLI overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(db_path) = &args.db_path {
            self.dbpath = db_path.clone();
        }
    }

    /// Database connection URL for the configured path.
    pub fn database_url(&self) -> String {
        repotagger::database_url(&self.dbpath)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `REPOTAGGER_*` variables with flat keys, e.g. `REPOTAGGER_API_URL` -> `api_url`.
fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .try_parsing(true)
}
