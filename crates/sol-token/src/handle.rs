//! Token session state.

use chain_sol::{encode_address, Keypair, Pubkey};

use crate::error::TokenError;

/// Identities and mint of one token-management session.
///
/// The mint starts out absent and is recorded exactly once, after a mint
/// transaction has been accepted. A handle with a mint can only transfer.
/// Mutation goes through `&mut self`: sharing a handle across tasks needs
/// external locking.
#[derive(Debug)]
pub struct TokenHandle<'a> {
    owner: &'a Keypair,
    payer: &'a Keypair,
    mint: Option<Pubkey>,
}

impl<'a> TokenHandle<'a> {
    pub fn new(owner: &'a Keypair, payer: &'a Keypair, mint: Option<Pubkey>) -> Self {
        Self { owner, payer, mint }
    }

    pub fn owner(&self) -> &'a Keypair {
        self.owner
    }

    pub fn payer(&self) -> &'a Keypair {
        self.payer
    }

    pub fn mint(&self) -> Option<&Pubkey> {
        self.mint.as_ref()
    }

    /// Fails unless no mint has been recorded yet.
    pub fn ensure_unminted(&self) -> Result<(), TokenError> {
        match &self.mint {
            Some(mint) => Err(TokenError::Precondition(format!(
                "token {} already exists, cannot mint",
                encode_address(mint)
            ))),
            None => Ok(()),
        }
    }

    /// The recorded mint, or a precondition failure.
    pub fn require_mint(&self) -> Result<&Pubkey, TokenError> {
        self.mint.as_ref().ok_or_else(|| {
            TokenError::Precondition("token is not initialized, mint a new token first".into())
        })
    }

    pub(crate) fn record_mint(&mut self, mint: Pubkey) -> Result<(), TokenError> {
        self.ensure_unminted()?;
        self.mint = Some(mint);
        Ok(())
    }
}
