//! System Program instructions.

use crate::address::Pubkey;
use crate::transaction::{AccountMeta, Instruction};

/// The System Program public key: 32 zero bytes.
/// Base58: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: Pubkey = [0u8; 32];

/// `CreateAccount` instruction index (little-endian u32).
const CREATE_ACCOUNT_IX_INDEX: u32 = 0;

/// Build a `CreateAccount` instruction.
///
/// Allocates `space` bytes at `new_account`, funds it with `lamports` from
/// `from` and assigns it to `owner`. Both `from` and `new_account` sign.
///
/// Data: u32 LE index + u64 LE lamports + u64 LE space + owner (32) = 52 bytes.
pub fn create_account(
    from: &Pubkey,
    new_account: &Pubkey,
    lamports: u64,
    space: u64,
    owner: &Pubkey,
) -> Instruction {
    let mut data = Vec::with_capacity(52);
    data.extend_from_slice(&CREATE_ACCOUNT_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner);

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*from, true),
            AccountMeta::writable(*new_account, true),
        ],
        data,
    }
}
