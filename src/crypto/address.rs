//! Ethereum address representation and utilities.

use std::fmt;
use std::str::FromStr;

use super::{keccak256, PublicKey};
use crate::error::Error;

/// An Ethereum address (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Creates an address from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derives the address of a public key.
    ///
    /// Process:
    /// 1. Serialize the public key as raw `x || y` (64 bytes, no 0x04 tag)
    /// 2. Hash the 64 bytes with Keccak-256
    /// 3. Take the last 20 bytes of the hash
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = keccak256(&public_key.to_raw());

        let mut address_bytes = [0u8; 20];
        address_bytes.copy_from_slice(&hash[12..]);

        Self(address_bytes)
    }

    /// Returns the address as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns the address as a lowercase hex string (without 0x prefix).
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the address with 0x prefix.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Returns the address with checksum encoding (EIP-55).
    pub fn to_checksum(&self) -> String {
        let hex_addr = self.to_hex();
        let hash = keccak256(hex_addr.as_bytes());

        let mut checksum = String::with_capacity(42);
        checksum.push_str("0x");

        for (i, c) in hex_addr.chars().enumerate() {
            let hash_byte = hash[i / 2];
            let hash_nibble = if i % 2 == 0 {
                hash_byte >> 4
            } else {
                hash_byte & 0x0f
            };

            if c.is_ascii_digit() {
                checksum.push(c);
            } else if hash_nibble >= 8 {
                checksum.push(c.to_ascii_uppercase());
            } else {
                checksum.push(c);
            }
        }

        checksum
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses 40 hex characters with an optional 0x prefix.
    ///
    /// All-lowercase and all-uppercase input is accepted as is. Mixed case
    /// is treated as EIP-55 and must match the checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if let Some((index, c)) = digits.char_indices().find(|(_, c)| !c.is_ascii()) {
            return Err(Error::InvalidHex(hex::FromHexError::InvalidHexCharacter {
                c,
                index,
            }));
        }

        if digits.len() != 40 {
            return Err(Error::InvalidLength {
                expected: 40,
                actual: digits.len(),
            });
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)?;
        let address = Self(bytes);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *digits {
            return Err(Error::InvalidChecksum);
        }

        Ok(address)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex_prefixed())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_address() {
        // Test vector from EIP-55
        let bytes = hex::decode("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
            .unwrap()
            .try_into()
            .unwrap();
        let addr = Address::from_bytes(bytes);
        assert_eq!(addr.to_checksum(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn test_hex_output() {
        let bytes = [0u8; 20];
        let addr = Address::from_bytes(bytes);
        assert_eq!(addr.to_hex(), "0000000000000000000000000000000000000000");
        assert_eq!(
            addr.to_hex_prefixed(),
            "0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_display_is_lowercase() {
        let addr: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        let shown = addr.to_string();
        assert_eq!(shown, "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
        assert_eq!(shown.len(), 42);
    }

    #[test]
    fn test_parse_single_case() {
        let lower: Address = "fb6916095ca1df60bb79ce92ce3ea74c37c5d359".parse().unwrap();
        let upper: Address = "0xFB6916095CA1DF60BB79CE92CE3EA74C37C5D359".parse().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        // Last letter's case flipped from the EIP-55 vector
        let err = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"
            .parse::<Address>()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum));
    }

    #[test]
    fn test_parse_rejects_non_ascii() {
        let input = format!("0x{}\u{e9}", "a".repeat(39));
        let err = input.parse::<Address>().unwrap_err();
        assert_eq!(err.kind(), "InvalidHex");
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        let err = "0x1234".parse::<Address>().unwrap_err();
        assert_eq!(err.kind(), "InvalidLength");
    }
}
