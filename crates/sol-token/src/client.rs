//! The chain client seam.
//!
//! RPC transport lives outside this crate; anything that can answer these
//! queries (an HTTP JSON-RPC client, a test validator, an in-memory fake)
//! can drive [`TokenManager`](crate::TokenManager).

use std::future::Future;

use chain_sol::{encode_address, Pubkey, SignedTransaction};
use tracing::info;

use crate::error::{ClientError, TokenError};
use crate::units::to_lamports;

/// A recent blockhash and the last block height at which it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentBlockhash {
    pub blockhash: [u8; 32],
    pub last_valid_block_height: u64,
}

/// The subset of on-chain account state the orchestration needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

impl AccountInfo {
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

/// Trait for Solana RPC access.
///
/// Methods return `Send` futures so managers can be driven from spawned
/// tasks.
pub trait ChainClient: Send + Sync {
    /// `getLatestBlockhash`.
    fn latest_blockhash(&self) -> impl Future<Output = Result<RecentBlockhash, ClientError>> + Send;

    /// `getMinimumBalanceForRentExemption` for an account of `space` bytes.
    fn minimum_balance_for_rent_exemption(
        &self,
        space: u64,
    ) -> impl Future<Output = Result<u64, ClientError>> + Send;

    /// `getAccountInfo`; `Ok(None)` when the account does not exist.
    fn account_info(
        &self,
        address: &Pubkey,
    ) -> impl Future<Output = Result<Option<AccountInfo>, ClientError>> + Send;

    /// `sendTransaction`; returns the transaction signature.
    fn send_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// `requestAirdrop` of `lamports` to `address` (devnet/testnet faucets).
    fn request_airdrop(
        &self,
        address: &Pubkey,
        lamports: u64,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;

    /// Healthy when a blockhash with a positive validity height can be fetched.
    fn is_healthy(&self) -> impl Future<Output = bool> + Send {
        async move {
            match self.latest_blockhash().await {
                Ok(hash) => hash.last_valid_block_height > 0,
                Err(_) => false,
            }
        }
    }
}

/// Request `sol` native tokens from the cluster faucet for `address`.
pub async fn request_airdrop<C: ChainClient>(
    client: &C,
    address: &Pubkey,
    sol: f64,
) -> Result<String, TokenError> {
    let lamports = to_lamports(sol)?;
    let signature = client
        .request_airdrop(address, lamports)
        .await
        .map_err(TokenError::Submission)?;

    info!(address = %encode_address(address), lamports, %signature, "airdrop requested");
    Ok(signature)
}
