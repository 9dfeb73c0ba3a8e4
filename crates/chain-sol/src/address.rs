//! Solana addresses.
//!
//! An address is the Base58 encoding of a raw 32-byte key. Wallet addresses
//! are Ed25519 public keys; program-derived addresses are SHA-256 outputs
//! that deliberately fall off the curve (see [`crate::pda`]).

use crate::error::SolError;

/// A 32-byte account key as it appears on chain.
pub type Pubkey = [u8; 32];

/// Encode a 32-byte key as its Base58 address string.
pub fn encode_address(key: &Pubkey) -> String {
    bs58::encode(key).into_string()
}

/// Decode a Base58 address string into its 32-byte key.
///
/// Fails if the string is not Base58 or does not decode to exactly 32 bytes.
pub fn decode_address(address: &str) -> Result<Pubkey, SolError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| SolError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    bytes.try_into().map_err(|v: Vec<u8>| {
        SolError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })
}

/// Whether `address` is a well-formed Solana address.
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_ok()
}
