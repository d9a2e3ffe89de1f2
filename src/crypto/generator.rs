//! Ethereum key pair generation.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secp256k1::constants::SECRET_KEY_SIZE;
use secp256k1::{All, Secp256k1};
use zeroize::Zeroizing;

use super::private_key::to_secret_key;
use super::{Address, PrivateKey, PublicKey};
use crate::error::{Error, Result};

/// Consecutive out-of-range draws after which the random source is
/// considered broken. A healthy source lands out of range with
/// probability below 2^-127 per draw.
const MAX_DRAWS: usize = 16;

/// A generated or imported account: private key plus derived values.
#[derive(Debug)]
pub struct Wallet {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: Address,
}

impl Wallet {
    /// Returns the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Returns the private key as 64 lowercase hex characters (no 0x prefix).
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        self.private_key.to_hex()
    }

    /// Returns the derived public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

/// Generates private keys and derives public keys and addresses.
///
/// Holds a secp256k1 context and a secure random source. Generators share
/// no state, so each thread can own one.
pub struct KeyPairGenerator<R = OsRng> {
    secp: Secp256k1<All>,
    rng: R,
}

impl KeyPairGenerator<OsRng> {
    /// Creates a generator backed by the operating system's random source.
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for KeyPairGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> KeyPairGenerator<R> {
    /// Creates a generator drawing from the given random source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            secp: Secp256k1::new(),
            rng,
        }
    }

    /// Draws a uniformly random private key in `[1, n - 1]`.
    ///
    /// Out-of-range draws are discarded and redrawn. Failures of the random
    /// source are returned as [`Error::EntropyUnavailable`] and never
    /// retried.
    pub fn generate_private_key(&mut self) -> Result<PrivateKey> {
        let mut candidate = Zeroizing::new([0u8; SECRET_KEY_SIZE]);

        for draw in 1..=MAX_DRAWS {
            if let Err(e) = self.rng.try_fill_bytes(&mut *candidate) {
                tracing::warn!(error = %e, "secure random source failed");
                return Err(Error::EntropyUnavailable(e));
            }

            if let Some(mut secret_key) = to_secret_key(&candidate) {
                secret_key.non_secure_erase();
                return Ok(PrivateKey::from_bytes(*candidate));
            }

            tracing::debug!(draw, "discarding out-of-range scalar");
        }

        tracing::warn!(
            draws = MAX_DRAWS,
            "random source produced only out-of-range scalars"
        );
        Err(Error::EntropyUnavailable(rand::Error::new(
            "random source produced only out-of-range scalars",
        )))
    }

    /// Derives the public key by multiplying the generator point by the
    /// private scalar.
    ///
    /// Fails with [`Error::InvalidScalar`] if the scalar is zero or not
    /// below the curve order.
    pub fn derive_public_key(&self, private_key: &PrivateKey) -> Result<PublicKey> {
        let mut secret_key = to_secret_key(private_key.as_bytes()).ok_or(Error::InvalidScalar)?;
        let public_key = secp256k1::PublicKey::from_secret_key(&self.secp, &secret_key);
        secret_key.non_secure_erase();

        Ok(PublicKey::from(public_key))
    }

    /// Derives the address of a public key.
    #[inline]
    pub fn derive_address(&self, public_key: &PublicKey) -> Address {
        Address::from_public_key(public_key)
    }

    /// Derives the address of an externally supplied public key encoding.
    ///
    /// See [`PublicKey::from_slice`] for the accepted encodings.
    pub fn derive_address_from_bytes(&self, public_key: &[u8]) -> Result<Address> {
        let public_key = PublicKey::from_slice(public_key)?;
        Ok(self.derive_address(&public_key))
    }

    /// Generates a fresh wallet.
    pub fn generate_wallet(&mut self) -> Result<Wallet> {
        let private_key = self.generate_private_key()?;
        self.import_wallet(private_key)
    }

    /// Builds a wallet around an existing private key.
    pub fn import_wallet(&self, private_key: PrivateKey) -> Result<Wallet> {
        let public_key = self.derive_public_key(&private_key)?;
        let address = self.derive_address(&public_key);

        Ok(Wallet {
            private_key,
            public_key,
            address,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use secp256k1::constants::CURVE_ORDER;

    use super::*;

    /// Yields pre-scripted 32-byte blocks, one per fill.
    struct ScriptedRng {
        blocks: VecDeque<[u8; 32]>,
    }

    impl ScriptedRng {
        fn new(blocks: Vec<[u8; 32]>) -> Self {
            Self {
                blocks: blocks.into(),
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.try_fill_bytes(dest).unwrap()
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            let block = self
                .blocks
                .pop_front()
                .ok_or_else(|| rand::Error::new("script exhausted"))?;
            dest.copy_from_slice(&block);
            Ok(())
        }
    }

    impl CryptoRng for ScriptedRng {}

    fn scalar(last: u8) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        bytes
    }

    #[test]
    fn test_generate_wallet() {
        let mut generator = KeyPairGenerator::new();
        let wallet = generator.generate_wallet().unwrap();

        assert!(wallet.private_key().is_valid());
        assert_eq!(wallet.private_key_hex().len(), 64);
        assert_eq!(wallet.address().to_string().len(), 42);
        assert_eq!(
            generator.derive_public_key(wallet.private_key()).unwrap(),
            *wallet.public_key()
        );
    }

    #[test]
    fn test_deterministic_address() {
        let generator = KeyPairGenerator::new();
        let wallet = generator
            .import_wallet(PrivateKey::from_bytes(scalar(1)))
            .unwrap();

        // Address for private key = 1 is well-known
        assert_eq!(
            wallet.address().to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert_eq!(
            wallet.address().to_checksum(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
        assert_eq!(
            wallet.public_key().to_hex(),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = KeyPairGenerator::with_rng(StdRng::seed_from_u64(7));
        let mut b = KeyPairGenerator::with_rng(StdRng::seed_from_u64(7));

        let wa = a.generate_wallet().unwrap();
        let wb = b.generate_wallet().unwrap();
        assert_eq!(wa.private_key().as_bytes(), wb.private_key().as_bytes());
        assert_eq!(wa.address(), wb.address());
    }

    #[test]
    fn test_rejects_out_of_range_draws() {
        let mut generator = KeyPairGenerator::with_rng(ScriptedRng::new(vec![
            [0u8; 32],
            CURVE_ORDER,
            [0xff; 32],
            scalar(1),
        ]));

        let key = generator.generate_private_key().unwrap();
        assert_eq!(key.as_bytes(), &scalar(1));
    }

    #[test]
    fn test_degenerate_source_fails() {
        let mut generator =
            KeyPairGenerator::with_rng(ScriptedRng::new(vec![[0u8; 32]; MAX_DRAWS]));
        let err = generator.generate_private_key().unwrap_err();
        assert_eq!(err.kind(), "EntropyUnavailable");
    }

    #[test]
    fn test_entropy_failure_is_surfaced() {
        let mut generator = KeyPairGenerator::with_rng(ScriptedRng::new(Vec::new()));
        let err = generator.generate_wallet().unwrap_err();
        assert!(matches!(err, Error::EntropyUnavailable(_)));
    }

    #[test]
    fn test_invalid_scalar_rejected() {
        let generator = KeyPairGenerator::new();

        let zero = PrivateKey::from_bytes([0u8; 32]);
        assert!(matches!(
            generator.derive_public_key(&zero),
            Err(Error::InvalidScalar)
        ));

        let order = PrivateKey::from_bytes(CURVE_ORDER);
        assert!(matches!(
            generator.derive_public_key(&order),
            Err(Error::InvalidScalar)
        ));

        assert!(matches!(
            generator.import_wallet(PrivateKey::from_bytes([0xff; 32])),
            Err(Error::InvalidScalar)
        ));
    }

    #[test]
    fn test_derive_address_from_bytes() {
        let generator = KeyPairGenerator::new();
        let wallet = generator
            .import_wallet(PrivateKey::from_bytes(scalar(2)))
            .unwrap();

        let raw = wallet.public_key().to_raw();
        let compressed = wallet.public_key().to_compressed();
        assert_eq!(
            generator.derive_address_from_bytes(&raw).unwrap(),
            *wallet.address()
        );
        assert_eq!(
            generator.derive_address_from_bytes(&compressed).unwrap(),
            *wallet.address()
        );

        let err = generator.derive_address_from_bytes(&[0u8; 64]).unwrap_err();
        assert_eq!(err.kind(), "InvalidPublicKeyEncoding");
    }

    #[test]
    fn test_mixed_case_import_yields_lowercase_address() {
        let generator = KeyPairGenerator::new();
        let hex = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

        let lower = generator
            .import_wallet(PrivateKey::from_hex(hex).unwrap())
            .unwrap();
        let upper = generator
            .import_wallet(PrivateKey::from_hex(&hex.to_uppercase()).unwrap())
            .unwrap();

        assert_eq!(lower.address(), upper.address());
        let shown = upper.address().to_string();
        assert_eq!(shown, shown.to_lowercase());
        assert_eq!(upper.private_key_hex().as_str(), hex);
    }
}
