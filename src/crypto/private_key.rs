//! secp256k1 private key storage.

use std::fmt;

use secp256k1::constants::SECRET_KEY_SIZE;
use secp256k1::SecretKey;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// A 32-byte secp256k1 private scalar (big-endian).
///
/// The bytes are wiped when the key is dropped. A `PrivateKey` built from
/// external input is not range checked until it is used for derivation, so
/// that out-of-range scalars surface as [`Error::InvalidScalar`] there.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; SECRET_KEY_SIZE]);

impl PrivateKey {
    /// Wraps raw scalar bytes.
    pub fn from_bytes(bytes: [u8; SECRET_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses a 64-character hex string.
    ///
    /// Case-insensitive. Surrounding whitespace and a `0x` prefix are
    /// accepted; anything else of the wrong length is rejected rather than
    /// padded or truncated.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if let Some((index, c)) = digits.char_indices().find(|(_, c)| !c.is_ascii()) {
            return Err(Error::InvalidHex(hex::FromHexError::InvalidHexCharacter {
                c,
                index,
            }));
        }

        if digits.len() != SECRET_KEY_SIZE * 2 {
            return Err(Error::InvalidLength {
                expected: SECRET_KEY_SIZE * 2,
                actual: digits.len(),
            });
        }

        let mut bytes = Zeroizing::new([0u8; SECRET_KEY_SIZE]);
        hex::decode_to_slice(digits, &mut *bytes)?;
        Ok(Self(*bytes))
    }

    /// Returns the scalar bytes.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.0
    }

    /// Returns the key as 64 lowercase hex characters (no 0x prefix).
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }

    /// Returns true if the scalar lies in `[1, n - 1]`.
    pub fn is_valid(&self) -> bool {
        match to_secret_key(&self.0) {
            Some(mut secret_key) => {
                secret_key.non_secure_erase();
                true
            }
            None => false,
        }
    }
}

/// Range checks a big-endian scalar in constant time (libsecp256k1
/// `ec_seckey_verify`). The caller must erase the returned key.
pub(crate) fn to_secret_key(bytes: &[u8; SECRET_KEY_SIZE]) -> Option<SecretKey> {
    SecretKey::from_slice(bytes).ok()
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}
