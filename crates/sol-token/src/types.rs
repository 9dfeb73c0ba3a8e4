use chain_sol::{encode_address, Pubkey};
use serde::{Deserialize, Serialize};

/// Parameters for creating a new token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintRequest {
    pub name: String,
    pub symbol: String,
    /// Off-chain JSON metadata location.
    pub uri: String,
    /// Initial supply in whole tokens, minted to the owner.
    pub supply: f64,
    /// Give the payer freeze authority over holder accounts.
    #[serde(default)]
    pub enable_freeze: bool,
    /// Revoke the mint authority in the same transaction, fixing the supply.
    #[serde(default)]
    pub revoke_mint_authority: bool,
}

/// Parameters for moving tokens from the owner to a recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Recipient wallet; its associated token account is created if needed.
    pub recipient: Pubkey,
    /// Amount in whole tokens.
    pub amount: f64,
    /// Wait for the mint account to be visible on chain before building.
    #[serde(default)]
    pub check_mint_initialized: bool,
}

/// Outcome of a successful mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintResult {
    pub mint: Pubkey,
    pub signature: String,
}

impl MintResult {
    pub fn mint_address(&self) -> String {
        encode_address(&self.mint)
    }
}
