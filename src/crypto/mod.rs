//! Cryptographic operations for Ethereum key and address generation.
//!
//! This module provides:
//! - Secure random private key generation over secp256k1
//! - Public key derivation by scalar multiplication
//! - Ethereum address derivation using Keccak-256

mod address;
mod generator;
mod private_key;
mod public_key;

pub use address::Address;
pub use generator::{KeyPairGenerator, Wallet};
pub use private_key::PrivateKey;
pub use public_key::{PublicKey, RAW_PUBLIC_KEY_SIZE};

use tiny_keccak::{Hasher, Keccak};

/// Keccak-256 of arbitrary bytes (output 32 bytes).
///
/// This is the original Keccak padding used by Ethereum, not SHA3-256.
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(input);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        // Differs from SHA3-256("") = a7ffc6f8...
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}
