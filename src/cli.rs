use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Classify text sentiment and browse past classifications.
#[derive(Debug, Parser)]
#[command(name = "sentiview", version, about)]
pub struct Cli {
    /// Base URL of the sentiment service
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs here instead of the cache directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> Config {
        let mut config = Config::load(self.config.as_deref());
        if let Some(url) = &self.api_url {
            config.server.base_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.server.request_timeout_secs = secs;
        }
        config
    }
}
