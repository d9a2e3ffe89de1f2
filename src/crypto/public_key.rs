//! secp256k1 public key encodings.

use std::fmt;

use secp256k1::constants::{PUBLIC_KEY_SIZE, UNCOMPRESSED_PUBLIC_KEY_SIZE};

use crate::error::{Error, Result};

/// Length of the raw `x || y` encoding (uncompressed, without the 0x04 tag).
pub const RAW_PUBLIC_KEY_SIZE: usize = UNCOMPRESSED_PUBLIC_KEY_SIZE - 1;

/// A point on secp256k1.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    /// Parses an encoded public key.
    ///
    /// Accepted encodings:
    /// - 64 bytes: raw `x || y`
    /// - 65 bytes: `0x04 || x || y`
    /// - 33 bytes: compressed, `0x02`/`0x03 || x`
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let parsed = match bytes.len() {
            RAW_PUBLIC_KEY_SIZE => {
                let mut tagged = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
                tagged[0] = 0x04;
                tagged[1..].copy_from_slice(bytes);
                secp256k1::PublicKey::from_slice(&tagged)
            }
            UNCOMPRESSED_PUBLIC_KEY_SIZE | PUBLIC_KEY_SIZE => {
                secp256k1::PublicKey::from_slice(bytes)
            }
            _ => return Err(Error::InvalidPublicKeyEncoding),
        };

        parsed
            .map(Self)
            .map_err(|_| Error::InvalidPublicKeyEncoding)
    }

    /// Returns the raw 64-byte `x || y` encoding used for address hashing.
    pub fn to_raw(&self) -> [u8; RAW_PUBLIC_KEY_SIZE] {
        let tagged = self.0.serialize_uncompressed();
        let mut raw = [0u8; RAW_PUBLIC_KEY_SIZE];
        raw.copy_from_slice(&tagged[1..]);
        raw
    }

    /// Returns the 33-byte compressed encoding.
    pub fn to_compressed(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0.serialize()
    }

    /// Returns the raw encoding as lowercase hex (no 0x prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_raw())
    }
}

impl From<secp256k1::PublicKey> for PublicKey {
    fn from(inner: secp256k1::PublicKey) -> Self {
        Self(inner)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}
