//! Error types for key generation and address derivation.

use thiserror::Error;

/// Errors returned by the key generation pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The secure random source could not supply bytes.
    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(#[source] rand::Error),

    /// The private key scalar is zero or not below the curve order.
    #[error("private key scalar is zero or not below the secp256k1 curve order")]
    InvalidScalar,

    /// The bytes do not encode a point on secp256k1.
    #[error("public key bytes are not a valid secp256k1 point encoding")]
    InvalidPublicKeyEncoding,

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A mixed-case address whose casing does not match its EIP-55 checksum.
    #[error("address checksum mismatch")]
    InvalidChecksum,

    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

impl Error {
    /// Returns the stable name of the error kind, as shown by the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::EntropyUnavailable(_) => "EntropyUnavailable",
            Error::InvalidScalar => "InvalidScalar",
            Error::InvalidPublicKeyEncoding => "InvalidPublicKeyEncoding",
            Error::InvalidHex(_) => "InvalidHex",
            Error::InvalidLength { .. } => "InvalidLength",
            Error::InvalidChecksum => "InvalidChecksum",
            Error::WorkerSpawn(_) => "WorkerSpawn",
        }
    }
}

/// Result type for key generation operations.
pub type Result<T> = std::result::Result<T, Error>;
