//! Runtime configuration for the key generator.

use std::fmt;

use clap::Parser;

use crate::output::OutputFormat;

/// Upper bound on wallets per run.
pub const MAX_COUNT: usize = 100_000;

/// Ethereum Account Key Generator
#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of wallets to generate
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Existing private key (64 hex characters) to derive the address of,
    /// instead of generating a new one
    #[arg(short = 'k', long, env = "ETH_KEYGEN_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Output format: text or json
    #[arg(short = 'f', long, default_value = "text")]
    pub format: OutputFormat,

    /// Show addresses with EIP-55 checksum casing in text output
    #[arg(short = 'c', long, default_value = "false")]
    pub checksum: bool,

    /// Also print the uncompressed public key
    #[arg(long = "public-key", default_value = "false")]
    pub show_public_key: bool,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count and never
    /// exceeding the number of wallets requested
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(num_cpus::get)
            .min(self.count)
            .max(1)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidCount(
                "Count must be at least 1".into(),
            ));
        }

        if self.count > MAX_COUNT {
            return Err(ConfigError::InvalidCount(format!(
                "Count cannot be larger than {}",
                MAX_COUNT
            )));
        }

        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkers);
        }

        if self.private_key.is_some() && self.count != 1 {
            return Err(ConfigError::ImportWithCount);
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("count", &self.count)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("workers", &self.workers)
            .field("format", &self.format)
            .field("checksum", &self.checksum)
            .field("show_public_key", &self.show_public_key)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid count: {0}")]
    InvalidCount(String),

    #[error("Worker count must be at least 1")]
    InvalidWorkers,

    #[error("--private-key derives a single wallet and cannot be combined with --count")]
    ImportWithCount,
}
