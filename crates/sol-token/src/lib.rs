//! # sol-token
//!
//! Mint SPL tokens with Metaplex metadata and transfer them, in one signed
//! transaction per operation.
//!
//! ```no_run
//! # async fn demo<C: sol_token::ChainClient>(client: &C) -> Result<(), sol_token::TokenError> {
//! use sol_token::{Keypair, MintRequest, TokenManager, TransferRequest};
//!
//! let owner = Keypair::from_base58("...")?;
//! let mut manager = TokenManager::new(client, &owner, &owner, None);
//!
//! let minted = manager
//!     .mint(&MintRequest {
//!         name: "Example Token".into(),
//!         symbol: "EXT".into(),
//!         uri: "https://example.com/ext.json".into(),
//!         supply: 1_000.0,
//!         enable_freeze: false,
//!         revoke_mint_authority: true,
//!     })
//!     .await?;
//!
//! manager
//!     .transfer(&TransferRequest {
//!         recipient: sol_token::decode_address("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM")?,
//!         amount: 250.0,
//!         check_mint_initialized: true,
//!     })
//!     .await?;
//! # let _ = minted;
//! # Ok(())
//! # }
//! ```
//!
//! RPC transport is not part of this crate: bring a [`ChainClient`].

pub mod client;
pub mod config;
pub mod derive;
pub mod error;
pub mod handle;
pub mod manager;
pub mod poller;
pub mod sequencer;
pub mod types;
pub mod units;

pub use chain_sol::{decode_address, encode_address, Keypair, Pubkey};
pub use client::{request_airdrop, AccountInfo, ChainClient, RecentBlockhash};
pub use config::TokenConfig;
pub use error::{ClientError, TokenError};
pub use handle::TokenHandle;
pub use manager::TokenManager;
pub use poller::ConfirmationPoller;
pub use sequencer::{InstructionSequence, InstructionSequencer};
pub use types::{MintRequest, MintResult, TransferRequest};
pub use units::{parse_base_units, to_base_units, to_lamports};
