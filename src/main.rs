//! Ethereum Account Key Generator CLI
//!
//! Usage:
//!   eth_keygen                    # Generate one wallet
//!   eth_keygen -n 10 -f json      # Generate 10 wallets as JSON
//!   eth_keygen -k <HEX> -c        # Show the checksummed address of a key

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use eth_keygen::{output, Config, Error, KeyPairGenerator, PrivateKey, RenderOptions, WorkerPool};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(rendered) => {
            print!("{}", rendered.as_str());
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Builds and renders the wallets. The wallets are dropped, and their keys
/// wiped, before this returns on every path.
fn run(config: &Config) -> Result<Zeroizing<String>, String> {
    let wallets = build_wallets(config)
        .map_err(|e| format!("error[{}]: {}\nNo wallet was created.", e.kind(), e))?;

    let options = RenderOptions {
        format: config.format,
        checksum: config.checksum,
        show_public_key: config.show_public_key,
    };

    output::render(&wallets, options).map_err(|e| format!("Output error: {}", e))
}

fn build_wallets(config: &Config) -> Result<Vec<eth_keygen::Wallet>, Error> {
    if let Some(hex) = &config.private_key {
        tracing::debug!("deriving wallet from supplied private key");
        let private_key = PrivateKey::from_hex(hex)?;
        return Ok(vec![KeyPairGenerator::new().import_wallet(private_key)?]);
    }

    if config.count == 1 {
        return Ok(vec![KeyPairGenerator::new().generate_wallet()?]);
    }

    let pool = WorkerPool::new(config.worker_count());
    let wallets = pool.generate(config.count)?;
    tracing::info!(
        generated = pool.total_keys(),
        workers = pool.num_workers(),
        "batch complete"
    );
    Ok(wallets)
}
