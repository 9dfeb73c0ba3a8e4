//! Ed25519 key pairs used as fee payer, token owner and mint identities.
//!
//! Imported secrets use Solana's 64-byte keypair layout: the 32-byte seed
//! followed by the 32-byte public key. The public half is checked against
//! the one derived from the seed so a corrupted export is rejected instead
//! of silently signing for a different account.

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::address::{encode_address, Pubkey};
use crate::error::SolError;

/// An Ed25519 signing identity. The secret is zeroed when dropped.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh random key pair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build a key pair from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Import a 64-byte keypair (seed || public key).
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, SolError> {
        if bytes.len() != 64 {
            return Err(SolError::InvalidPrivateKey(format!(
                "expected 64 bytes, got {}",
                bytes.len()
            )));
        }

        let mut seed = Zeroizing::new([0u8; 32]);
        seed.copy_from_slice(&bytes[..32]);
        let keypair = Self::from_seed(&seed);

        if keypair.pubkey()[..] != bytes[32..] {
            return Err(SolError::InvalidPrivateKey(
                "public key does not match secret seed".into(),
            ));
        }

        Ok(keypair)
    }

    /// Import a hex-encoded 64-byte keypair.
    pub fn from_hex(secret_hex: &str) -> Result<Self, SolError> {
        let bytes = Zeroizing::new(
            hex::decode(secret_hex.trim().trim_start_matches("0x"))
                .map_err(|e| SolError::InvalidPrivateKey(format!("hex decode failed: {e}")))?,
        );
        Self::from_keypair_bytes(&bytes)
    }

    /// Import a Base58-encoded 64-byte keypair (the format wallets export).
    pub fn from_base58(secret_b58: &str) -> Result<Self, SolError> {
        let bytes = Zeroizing::new(
            bs58::decode(secret_b58.trim())
                .into_vec()
                .map_err(|e| SolError::InvalidPrivateKey(format!("base58 decode failed: {e}")))?,
        );
        Self::from_keypair_bytes(&bytes)
    }

    /// The 32-byte public key.
    pub fn pubkey(&self) -> Pubkey {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The Base58 address of the public key.
    pub fn address(&self) -> String {
        encode_address(&self.pubkey())
    }

    /// Sign `message`, returning the 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    fn exported_bytes(keypair: &Keypair, seed: &[u8; 32]) -> Vec<u8> {
        let mut bytes = seed.to_vec();
        bytes.extend_from_slice(&keypair.pubkey());
        bytes
    }

    #[test]
    fn from_seed_is_deterministic() {
        let a = Keypair::from_seed(&[7u8; 32]);
        let b = Keypair::from_seed(&[7u8; 32]);
        assert_eq!(a.pubkey(), b.pubkey());
    }

    #[test]
    fn generated_keys_differ() {
        assert_ne!(Keypair::generate().pubkey(), Keypair::generate().pubkey());
    }

    #[test]
    fn hex_import_matches_seed() {
        let seed = [3u8; 32];
        let original = Keypair::from_seed(&seed);
        let exported = hex::encode(exported_bytes(&original, &seed));

        let imported = Keypair::from_hex(&exported).unwrap();
        assert_eq!(imported.pubkey(), original.pubkey());
    }

    #[test]
    fn base58_import_matches_seed() {
        let seed = [9u8; 32];
        let original = Keypair::from_seed(&seed);
        let exported = bs58::encode(exported_bytes(&original, &seed)).into_string();

        let imported = Keypair::from_base58(&exported).unwrap();
        assert_eq!(imported.address(), original.address());
    }

    #[test]
    fn mismatched_public_half_is_rejected() {
        let seed = [1u8; 32];
        let mut bytes = seed.to_vec();
        bytes.extend_from_slice(&[0xAB; 32]);

        let err = Keypair::from_keypair_bytes(&bytes).unwrap_err();
        assert!(matches!(err, SolError::InvalidPrivateKey(_)));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(Keypair::from_hex("abcd").is_err());
        assert!(Keypair::from_hex("zz").is_err());
        assert!(Keypair::from_base58("0OIl").is_err());
    }

    #[test]
    fn signature_verifies() {
        let keypair = Keypair::from_seed(&[5u8; 32]);
        let sig = keypair.sign(b"hello");

        let vk = VerifyingKey::from_bytes(&keypair.pubkey()).unwrap();
        assert!(vk.verify(b"hello", &Signature::from_bytes(&sig)).is_ok());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let keypair = Keypair::from_seed(&[0x11u8; 32]);
        let debug = format!("{keypair:?}");
        assert!(debug.contains(&keypair.address()));
        assert!(!debug.contains("1111111111111111"));
    }
}
