pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_bind_address, validate_non_empty_string, validate_one_of, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FORMAT: &str = "compact";
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "shipment-ledger")]
#[command(about = "In-memory shipment and organization records with weight totals")]
pub struct ServerConfig {
    #[arg(long, help = "Socket address to listen on [default: 0.0.0.0:3000]")]
    pub bind: Option<String>,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Log output format: compact or json")]
    pub log_format: Option<String>,

    #[arg(long, help = "Log level for this service (overrides --verbose)")]
    pub log_level: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings after merging the config file under the CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub bind: String,
    pub log_level: Option<String>,
    pub log_format: String,
    pub verbose: bool,
}

impl ServerConfig {
    pub fn resolve(&self) -> Result<ServiceSettings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(self.merge(&file))
    }

    pub fn merge(&self, file: &TomlConfig) -> ServiceSettings {
        ServiceSettings {
            bind: self
                .bind
                .clone()
                .or_else(|| file.bind().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            log_level: self
                .log_level
                .clone()
                .or_else(|| file.log_level().map(str::to_string)),
            log_format: self
                .log_format
                .clone()
                .or_else(|| file.log_format().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string()),
            verbose: self.verbose,
        }
    }
}

impl ServiceSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        validate_bind_address("server.bind", &self.bind)
    }

    pub fn format(&self) -> LogFormat {
        LogFormat::parse(&self.log_format).unwrap_or(LogFormat::Compact)
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        validate_bind_address("server.bind", &self.bind)?;
        validate_one_of("logging.format", &self.log_format, &LOG_FORMATS)?;
        if let Some(level) = &self.log_level {
            validate_non_empty_string("logging.level", level)?;
        }
        Ok(())
    }
}
