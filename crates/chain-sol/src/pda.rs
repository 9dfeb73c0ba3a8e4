//! Program Derived Address (PDA) derivation.
//!
//! A PDA is `SHA-256(seeds || bump || program_id || "ProgramDerivedAddress")`
//! for the highest bump seed whose hash is NOT a valid Ed25519 point, so no
//! private key can ever exist for it.

use sha2::{Digest, Sha256};

use crate::address::Pubkey;
use crate::error::SolError;
use crate::spl_token::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID};

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Solana caps individual seeds at 32 bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Find the canonical PDA and its bump seed for `seeds` under `program_id`.
///
/// Bump seeds are searched from 255 down to 0.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), SolError> {
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(SolError::DerivationFailed(format!(
            "seed of {} bytes exceeds {MAX_SEED_LEN}",
            seed.len()
        )));
    }

    for bump in (0u8..=255).rev() {
        if let Some(address) = create_program_address(seeds, bump, program_id) {
            return Ok((address, bump));
        }
    }

    Err(SolError::DerivationFailed(
        "no off-curve address in bump seed space".into(),
    ))
}

/// Derive the associated token account of `wallet` for `mint`.
///
/// Seeds: `[wallet, token_program_id, mint]` under the Associated Token
/// Account program.
pub fn find_associated_token_address(
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey, SolError> {
    find_program_address(
        &[wallet.as_ref(), &TOKEN_PROGRAM_ID, mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

/// `None` when the hash lands on the curve and the next bump must be tried.
fn create_program_address(seeds: &[&[u8]], bump: u8, program_id: &Pubkey) -> Option<Pubkey> {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let hash: Pubkey = hasher.finalize().into();
    (!is_on_curve(&hash)).then_some(hash)
}

pub(crate) fn is_on_curve(bytes: &Pubkey) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}
