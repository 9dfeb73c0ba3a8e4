//! SPL Token and Associated Token Account program instructions.
//!
//! Only the instructions needed to create a mint, fund its first holder and
//! move balances are implemented. Layouts follow the programs' packed
//! (non-Borsh) instruction encoding.

use crate::address::Pubkey;
use crate::system::SYSTEM_PROGRAM_ID;
use crate::transaction::{AccountMeta, Instruction};

// ---------------------------------------------------------------------------
// Well-known program IDs
// ---------------------------------------------------------------------------

/// SPL Token Program ID: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: Pubkey = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79,
    0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff,
    0x00, 0xa9,
];

/// Associated Token Account Program ID: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d,
    0x83, 0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9,
    0xf8, 0x59,
];

/// Rent sysvar: `SysvarRent111111111111111111111111111111111`
pub const RENT_SYSVAR_ID: Pubkey = [
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x5c, 0x51, 0x21, 0x8c, 0xc9, 0x4c, 0x3d, 0x4a, 0xf1,
    0x7f, 0x58, 0xda, 0xee, 0x08, 0x9b, 0xa1, 0xfd, 0x44, 0xe3, 0xdb, 0xd9, 0x8a, 0x00, 0x00,
    0x00, 0x00,
];

/// Size in bytes of a packed SPL Token mint account.
pub const MINT_ACCOUNT_SIZE: u64 = 82;

const INITIALIZE_MINT: u8 = 0;
const TRANSFER: u8 = 3;
const SET_AUTHORITY: u8 = 6;
const MINT_TO: u8 = 7;

const ATA_CREATE: u8 = 0;
const ATA_CREATE_IDEMPOTENT: u8 = 1;

/// Authority kinds accepted by `SetAuthority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AuthorityType {
    MintTokens = 0,
    FreezeAccount = 1,
    AccountOwner = 2,
    CloseAccount = 3,
}

fn push_optional_key(data: &mut Vec<u8>, key: Option<&Pubkey>) {
    match key {
        Some(key) => {
            data.push(1);
            data.extend_from_slice(key);
        }
        None => data.push(0),
    }
}

// ---------------------------------------------------------------------------
// SPL Token
// ---------------------------------------------------------------------------

/// `InitializeMint`: `[0, decimals, mint_authority(32), COption<freeze_authority>]`.
pub fn initialize_mint(
    mint: &Pubkey,
    decimals: u8,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
) -> Instruction {
    let mut data = Vec::with_capacity(67);
    data.push(INITIALIZE_MINT);
    data.push(decimals);
    data.extend_from_slice(mint_authority);
    push_optional_key(&mut data, freeze_authority);

    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*mint, false),
            AccountMeta::readonly(RENT_SYSVAR_ID, false),
        ],
        data,
    }
}

/// `MintTo`: `[7, amount u64 LE]`, signed by the mint authority.
pub fn mint_to(
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*mint, false),
            AccountMeta::writable(*destination, false),
            AccountMeta::readonly(*authority, true),
        ],
        data: amount_data(MINT_TO, amount),
    }
}

/// `Transfer`: `[3, amount u64 LE]`, signed by the source account's owner.
///
/// `amount` is in base units: for a token with 6 decimals,
/// `amount = 1_000_000` moves one whole token.
pub fn transfer(source: &Pubkey, destination: &Pubkey, owner: &Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*source, false),
            AccountMeta::writable(*destination, false),
            AccountMeta::readonly(*owner, true),
        ],
        data: amount_data(TRANSFER, amount),
    }
}

/// `SetAuthority`: `[6, authority_type, COption<new_authority>]`.
///
/// Passing `None` as `new_authority` revokes the authority permanently.
pub fn set_authority(
    account: &Pubkey,
    current_authority: &Pubkey,
    authority_type: AuthorityType,
    new_authority: Option<&Pubkey>,
) -> Instruction {
    let mut data = Vec::with_capacity(35);
    data.push(SET_AUTHORITY);
    data.push(authority_type as u8);
    push_optional_key(&mut data, new_authority);

    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*account, false),
            AccountMeta::readonly(*current_authority, true),
        ],
        data,
    }
}

fn amount_data(tag: u8, amount: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(9);
    data.push(tag);
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

// ---------------------------------------------------------------------------
// Associated Token Account
// ---------------------------------------------------------------------------

/// Create `associated_account`, the associated token account of `wallet`
/// for `mint`, paid by `funder`.
///
/// With `idempotent` set the program succeeds when the account already
/// exists instead of failing the transaction.
pub fn create_associated_token_account(
    funder: &Pubkey,
    associated_account: &Pubkey,
    wallet: &Pubkey,
    mint: &Pubkey,
    idempotent: bool,
) -> Instruction {
    let tag = if idempotent {
        ATA_CREATE_IDEMPOTENT
    } else {
        ATA_CREATE
    };

    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*funder, true),
            AccountMeta::writable(*associated_account, false),
            AccountMeta::readonly(*wallet, false),
            AccountMeta::readonly(*mint, false),
            AccountMeta::readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: vec![tag],
    }
}
