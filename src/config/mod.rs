pub mod site;

pub use site::{GeneratorConfig, MailConfig, ServerConfig, SiteConfig};

use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "studio-api")]
#[command(about = "Backend API for the studio marketing site")]
pub struct ServerArgs {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the configured listen port")]
    pub port: Option<u16>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerArgs {
    /// Config file when given, environment otherwise. CLI flags win over both.
    pub fn load_config(&self) -> Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::from_env(),
        };

        if let Some(port) = self.port {
            config.server.port = port;
        }

        Ok(config)
    }
}
