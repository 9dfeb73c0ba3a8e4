//! Solana chain support for token minting and transfers.
//!
//! This crate handles key pairs, address and PDA derivation, the System,
//! SPL Token, Associated Token Account and Token Metadata instructions, and
//! the transaction wire format, all without pulling in `solana-sdk` (which
//! drags in 200+ transitive dependencies).
//!
//! Wire formats are written by hand, using `ed25519-dalek` for signing,
//! `curve25519-dalek` for the PDA off-curve check and `bs58` for addresses.

pub mod address;
pub mod error;
pub mod keypair;
pub mod metadata;
pub mod pda;
pub mod spl_token;
pub mod system;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use address::{decode_address, encode_address, is_valid_address, Pubkey};
pub use error::SolError;
pub use keypair::Keypair;
pub use metadata::{
    create_metadata_account_v3, find_metadata_address, Creator, MetadataArgs, METADATA_PROGRAM_ID,
};
pub use pda::{find_associated_token_address, find_program_address};
pub use spl_token::{
    AuthorityType, ASSOCIATED_TOKEN_PROGRAM_ID, MINT_ACCOUNT_SIZE, TOKEN_PROGRAM_ID,
};
pub use system::SYSTEM_PROGRAM_ID;
pub use transaction::{
    compile_message, sign_message, AccountMeta, CompiledInstruction, Instruction, Message,
    SignedTransaction,
};
