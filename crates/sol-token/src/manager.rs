//! The mint and transfer entry points.
//!
//! Every call runs strictly in sequence: fetch chain context, build the
//! instruction sequence, sign, submit. A failure at any step aborts the call
//! and leaves the handle untouched. The mint address is recorded only once
//! the submission has been accepted.
//!
//! `mint` does not wait for the new mint to become visible before returning.
//! A transfer issued right after a mint should set
//! [`TransferRequest::check_mint_initialized`] to avoid racing confirmation.

use chain_sol::{
    compile_message, encode_address, sign_message, Keypair, Pubkey, SignedTransaction,
    MINT_ACCOUNT_SIZE,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::ChainClient;
use crate::config::TokenConfig;
use crate::error::TokenError;
use crate::handle::TokenHandle;
use crate::poller::ConfirmationPoller;
use crate::sequencer::{InstructionSequence, InstructionSequencer};
use crate::types::{MintRequest, MintResult, TransferRequest};

/// Creates and moves one token on behalf of an owner, with fees paid by a
/// payer (which may be the same key pair).
pub struct TokenManager<'a, C: ChainClient> {
    client: &'a C,
    handle: TokenHandle<'a>,
    sequencer: InstructionSequencer,
    poller: ConfirmationPoller,
    cancel: CancellationToken,
}

impl<'a, C: ChainClient> TokenManager<'a, C> {
    /// A manager with default settings. Pass `mint` to manage an existing
    /// token (transfer only), or `None` to mint a new one.
    pub fn new(
        client: &'a C,
        owner: &'a Keypair,
        payer: &'a Keypair,
        mint: Option<Pubkey>,
    ) -> Self {
        Self {
            client,
            handle: TokenHandle::new(owner, payer, mint),
            sequencer: InstructionSequencer::default(),
            poller: ConfirmationPoller::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_config(
        client: &'a C,
        owner: &'a Keypair,
        payer: &'a Keypair,
        mint: Option<Pubkey>,
        config: &TokenConfig,
    ) -> Result<Self, TokenError> {
        config.validate()?;
        Ok(Self {
            sequencer: InstructionSequencer::new(config.decimals),
            poller: ConfirmationPoller::from_config(config),
            ..Self::new(client, owner, payer, mint)
        })
    }

    /// Use `cancel` (for example a child of an application-wide token) to
    /// abort pending confirmation waits.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn handle(&self) -> &TokenHandle<'a> {
        &self.handle
    }

    /// The managed token's mint, once known.
    pub fn mint_address(&self) -> Option<Pubkey> {
        self.handle.mint().copied()
    }

    pub fn decimals(&self) -> u8 {
        self.sequencer.decimals()
    }

    /// Create a new token with a freshly generated mint key pair.
    pub async fn mint(&mut self, request: &MintRequest) -> Result<MintResult, TokenError> {
        let mint_keypair = Keypair::generate();
        self.mint_with_keypair(&mint_keypair, request).await
    }

    /// Create a new token whose mint address is `mint_keypair`'s public key.
    ///
    /// The mint key pair signs only its own account creation; it has no
    /// authority over the token afterwards.
    pub async fn mint_with_keypair(
        &mut self,
        mint_keypair: &Keypair,
        request: &MintRequest,
    ) -> Result<MintResult, TokenError> {
        self.handle.ensure_unminted()?;
        let mint = mint_keypair.pubkey();

        let rent = self
            .client
            .minimum_balance_for_rent_exemption(MINT_ACCOUNT_SIZE)
            .await
            .map_err(TokenError::ChainQuery)?;

        let sequence = self.sequencer.mint(&self.handle, &mint, request, rent)?;
        debug!(
            mint = %encode_address(&mint),
            instructions = sequence.len(),
            rent,
            "mint sequence built"
        );

        let payer = self.handle.payer();
        let transaction = self.sign(sequence, &[payer, mint_keypair]).await?;
        let signature = self.submit(&transaction).await?;

        self.handle.record_mint(mint)?;
        info!(
            mint = %encode_address(&mint),
            symbol = %request.symbol,
            supply = request.supply,
            %signature,
            "token minted"
        );

        Ok(MintResult { mint, signature })
    }

    /// Send `request.amount` tokens from the owner to `request.recipient`.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<String, TokenError> {
        let mint = *self.handle.require_mint()?;

        if request.check_mint_initialized {
            self.poller
                .wait_until_visible(self.client, &mint, &self.cancel)
                .await?;
        }

        let sequence = self.sequencer.transfer(&self.handle, request)?;

        let transaction = self
            .sign(sequence, &[self.handle.payer(), self.handle.owner()])
            .await?;
        let signature = self.submit(&transaction).await?;

        info!(
            mint = %encode_address(&mint),
            recipient = %encode_address(&request.recipient),
            amount = request.amount,
            %signature,
            "tokens transferred"
        );

        Ok(signature)
    }

    /// Compile against a fresh blockhash and sign with `signers`.
    async fn sign(
        &self,
        sequence: InstructionSequence,
        signers: &[&Keypair],
    ) -> Result<SignedTransaction, TokenError> {
        let recent = self
            .client
            .latest_blockhash()
            .await
            .map_err(TokenError::ChainQuery)?;

        let fee_payer = self.handle.payer().pubkey();
        let message = compile_message(sequence.instructions(), &fee_payer, &recent.blockhash)?;
        Ok(sign_message(message, signers)?)
    }

    async fn submit(&self, transaction: &SignedTransaction) -> Result<String, TokenError> {
        let signature = self
            .client
            .send_transaction(transaction)
            .await
            .map_err(TokenError::Submission)?;

        let local_id = transaction.id();
        if signature != local_id {
            warn!(%signature, %local_id, "node reported an unexpected transaction signature");
        }

        Ok(signature)
    }
}
