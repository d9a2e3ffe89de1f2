//! # eth_keygen
//!
//! Ethereum account key and address generator.
//!
//! ## Architecture
//!
//! - `crypto`: Private key generation, public key and address derivation
//! - `worker`: Parallel batch generation
//! - `output`: Text and JSON rendering
//! - `config`: Runtime configuration
//!
//! ```no_run
//! use eth_keygen::KeyPairGenerator;
//!
//! let wallet = KeyPairGenerator::new().generate_wallet()?;
//! println!("{}", wallet.address());
//! # Ok::<(), eth_keygen::Error>(())
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod output;
pub mod worker;

pub use config::Config;
pub use crypto::{Address, KeyPairGenerator, PrivateKey, PublicKey, Wallet};
pub use error::{Error, Result};
pub use output::{OutputFormat, RenderOptions};
pub use worker::WorkerPool;
