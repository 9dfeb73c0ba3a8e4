//! Instruction templates for the mint and transfer flows.
//!
//! Instructions in one transaction run atomically but in order, and an
//! account has to exist before an instruction can write to it. Each template
//! therefore creates accounts strictly before using them. Building a
//! sequence performs no I/O: chain context (rent) is passed in.

use chain_sol::metadata::{create_metadata_account_v3, Creator, MetadataArgs};
use chain_sol::spl_token::{self, AuthorityType, MINT_ACCOUNT_SIZE, TOKEN_PROGRAM_ID};
use chain_sol::{system, Instruction, Pubkey};

use crate::config::DEFAULT_DECIMALS;
use crate::derive::{associated_token_address, metadata_address};
use crate::error::TokenError;
use crate::handle::TokenHandle;
use crate::types::{MintRequest, TransferRequest};
use crate::units::to_base_units;

/// An ordered, append-only list of instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSequence {
    instructions: Vec<Instruction>,
}

impl InstructionSequence {
    fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

/// Builds the instruction sequences at a fixed decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSequencer {
    decimals: u8,
}

impl Default for InstructionSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS)
    }
}

impl InstructionSequencer {
    pub fn new(decimals: u8) -> Self {
        Self { decimals }
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Instructions creating `mint` with metadata and the initial supply.
    ///
    /// 1. create the mint account (payer funds `rent_exemption` lamports)
    /// 2. initialize it; the payer is mint authority and, if requested,
    ///    freeze authority
    /// 3. create the owner's associated token account
    /// 4. mint the supply into it
    /// 5. create the metadata record (owner is update authority and sole
    ///    verified creator)
    /// 6. optionally revoke the mint authority; always last, since nothing
    ///    needing that authority can follow it
    ///
    /// Signers: payer and the mint keypair.
    pub fn mint(
        &self,
        handle: &TokenHandle<'_>,
        mint: &Pubkey,
        request: &MintRequest,
        rent_exemption: u64,
    ) -> Result<InstructionSequence, TokenError> {
        handle.ensure_unminted()?;

        let payer = handle.payer().pubkey();
        let owner = handle.owner().pubkey();
        let supply = to_base_units(request.supply, self.decimals)?;
        let owner_ata = associated_token_address(&owner, mint)?;
        let metadata = metadata_address(mint)?;

        let mut seq = InstructionSequence::default();

        seq.push(system::create_account(
            &payer,
            mint,
            rent_exemption,
            MINT_ACCOUNT_SIZE,
            &TOKEN_PROGRAM_ID,
        ));

        let freeze_authority = request.enable_freeze.then_some(payer);
        seq.push(spl_token::initialize_mint(
            mint,
            self.decimals,
            &payer,
            freeze_authority.as_ref(),
        ));

        seq.push(spl_token::create_associated_token_account(
            &payer, &owner_ata, &owner, mint, false,
        ));

        seq.push(spl_token::mint_to(mint, &owner_ata, &payer, supply));

        let args = MetadataArgs {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            uri: request.uri.clone(),
            seller_fee_basis_points: 0,
            creators: vec![Creator {
                address: owner,
                verified: true,
                share: 100,
            }],
            is_mutable: true,
        };
        seq.push(create_metadata_account_v3(
            &metadata, mint, &payer, &payer, &owner, &args,
        )?);

        if request.revoke_mint_authority {
            seq.push(spl_token::set_authority(
                mint,
                &payer,
                AuthorityType::MintTokens,
                None,
            ));
        }

        Ok(seq)
    }

    /// Instructions moving `request.amount` from the owner to the recipient.
    ///
    /// The recipient's associated token account is created idempotently, so
    /// existing holders are not an error. Signers: payer and owner.
    pub fn transfer(
        &self,
        handle: &TokenHandle<'_>,
        request: &TransferRequest,
    ) -> Result<InstructionSequence, TokenError> {
        let mint = handle.require_mint()?;
        let payer = handle.payer().pubkey();
        let owner = handle.owner().pubkey();
        let amount = to_base_units(request.amount, self.decimals)?;

        let sender_ata = associated_token_address(&owner, mint)?;
        let recipient_ata = associated_token_address(&request.recipient, mint)?;

        let mut seq = InstructionSequence::default();
        seq.push(spl_token::create_associated_token_account(
            &payer,
            &recipient_ata,
            &request.recipient,
            mint,
            true,
        ));
        seq.push(spl_token::transfer(&sender_ata, &recipient_ata, &owner, amount));

        Ok(seq)
    }
}

#[cfg(test)]
mod tests {
    use chain_sol::{Keypair, ASSOCIATED_TOKEN_PROGRAM_ID, METADATA_PROGRAM_ID, SYSTEM_PROGRAM_ID};

    use super::*;

    const MINT: Pubkey = [0x4d; 32];

    fn request() -> MintRequest {
        MintRequest {
            name: "Solana Token 001".into(),
            symbol: "SMY1".into(),
            uri: "https://example.com/metadata.json".into(),
            supply: 1000.0,
            enable_freeze: false,
            revoke_mint_authority: false,
        }
    }

    fn amount_of(ix: &Instruction) -> u64 {
        u64::from_le_bytes(ix.data[1..9].try_into().unwrap())
    }

    #[test]
    fn mint_sequence_order() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let payer = Keypair::from_seed(&[2u8; 32]);
        let handle = TokenHandle::new(&owner, &payer, None);

        let seq = InstructionSequencer::default()
            .mint(&handle, &MINT, &request(), 1_461_600)
            .unwrap();
        let ixs = seq.instructions();

        assert_eq!(seq.len(), 5);
        assert_eq!(ixs[0].program_id, SYSTEM_PROGRAM_ID);
        assert_eq!(ixs[1].program_id, TOKEN_PROGRAM_ID);
        assert_eq!(ixs[1].data[0], 0);
        assert_eq!(ixs[2].program_id, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert_eq!(ixs[3].data[0], 7);
        assert_eq!(ixs[4].program_id, METADATA_PROGRAM_ID);
    }

    #[test]
    fn mint_funds_the_mint_account_with_rent() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let handle = TokenHandle::new(&owner, &owner, None);

        let seq = InstructionSequencer::default()
            .mint(&handle, &MINT, &request(), 1_461_600)
            .unwrap();
        let create = &seq.instructions()[0];

        assert_eq!(u64::from_le_bytes(create.data[4..12].try_into().unwrap()), 1_461_600);
        assert_eq!(u64::from_le_bytes(create.data[12..20].try_into().unwrap()), MINT_ACCOUNT_SIZE);
        assert_eq!(create.accounts[1].pubkey, MINT);
        assert!(create.accounts[1].is_signer);
    }

    #[test]
    fn supply_lands_in_owner_ata() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let payer = Keypair::from_seed(&[2u8; 32]);
        let handle = TokenHandle::new(&owner, &payer, None);

        let seq = InstructionSequencer::default()
            .mint(&handle, &MINT, &request(), 0)
            .unwrap();
        let mint_to = &seq.instructions()[3];

        let owner_ata = associated_token_address(&owner.pubkey(), &MINT).unwrap();
        assert_eq!(amount_of(mint_to), 10_000_000_000_000);
        assert_eq!(mint_to.accounts[1].pubkey, owner_ata);
        assert_eq!(mint_to.accounts[2].pubkey, payer.pubkey());
        assert_eq!(seq.instructions()[2].accounts[1].pubkey, owner_ata);
    }

    #[test]
    fn freeze_authority_present_iff_requested() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let handle = TokenHandle::new(&owner, &owner, None);
        let sequencer = InstructionSequencer::default();

        let plain = sequencer.mint(&handle, &MINT, &request(), 0).unwrap();
        assert_eq!(plain.instructions()[1].data[34], 0);
        assert_eq!(plain.instructions()[1].data.len(), 35);

        let mut freezing = request();
        freezing.enable_freeze = true;
        let frozen = sequencer.mint(&handle, &MINT, &freezing, 0).unwrap();
        let init = &frozen.instructions()[1];
        assert_eq!(init.data[34], 1);
        assert_eq!(&init.data[35..67], &owner.pubkey());
    }

    #[test]
    fn revocation_is_last_or_absent() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let handle = TokenHandle::new(&owner, &owner, None);
        let sequencer = InstructionSequencer::default();

        let kept = sequencer.mint(&handle, &MINT, &request(), 0).unwrap();
        assert!(kept
            .instructions()
            .iter()
            .all(|ix| ix.data[0] != 6 || ix.program_id != TOKEN_PROGRAM_ID));

        for enable_freeze in [false, true] {
            let mut revoking = request();
            revoking.revoke_mint_authority = true;
            revoking.enable_freeze = enable_freeze;

            let seq = sequencer.mint(&handle, &MINT, &revoking, 0).unwrap();
            let last = seq.instructions().last().unwrap();
            assert_eq!(seq.len(), 6);
            assert_eq!(last.program_id, TOKEN_PROGRAM_ID);
            assert_eq!(last.data, vec![6, 0, 0]);
        }
    }

    #[test]
    fn decimals_come_from_the_sequencer() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let handle = TokenHandle::new(&owner, &owner, None);

        let seq = InstructionSequencer::new(6).mint(&handle, &MINT, &request(), 0).unwrap();
        assert_eq!(seq.instructions()[1].data[1], 6);
        assert_eq!(amount_of(&seq.instructions()[3]), 1_000_000_000);
    }

    #[test]
    fn mint_on_minted_handle_fails() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let handle = TokenHandle::new(&owner, &owner, Some(MINT));

        let err = InstructionSequencer::default()
            .mint(&handle, &[0x4e; 32], &request(), 0)
            .unwrap_err();
        assert!(matches!(err, TokenError::Precondition(_)));
    }

    #[test]
    fn invalid_supply_fails() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let handle = TokenHandle::new(&owner, &owner, None);
        let mut bad = request();
        bad.supply = -5.0;

        let err = InstructionSequencer::default().mint(&handle, &MINT, &bad, 0).unwrap_err();
        assert!(matches!(err, TokenError::InvalidAmount(_)));
    }

    #[test]
    fn oversized_metadata_is_a_build_error() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let handle = TokenHandle::new(&owner, &owner, None);
        let mut bad = request();
        bad.symbol = "TOOLONGSYMBOL".into();

        let err = InstructionSequencer::default().mint(&handle, &MINT, &bad, 0).unwrap_err();
        assert!(matches!(err, TokenError::TransactionBuild(_)));
    }

    #[test]
    fn transfer_sequence() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let payer = Keypair::from_seed(&[2u8; 32]);
        let handle = TokenHandle::new(&owner, &payer, Some(MINT));
        let recipient = [0x52; 32];

        let seq = InstructionSequencer::default()
            .transfer(
                &handle,
                &TransferRequest {
                    recipient,
                    amount: 250.0,
                    check_mint_initialized: false,
                },
            )
            .unwrap();
        let ixs = seq.instructions();

        let sender_ata = associated_token_address(&owner.pubkey(), &MINT).unwrap();
        let recipient_ata = associated_token_address(&recipient, &MINT).unwrap();

        assert_eq!(seq.len(), 2);
        assert_eq!(ixs[0].program_id, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert_eq!(ixs[0].data, vec![1]);
        assert_eq!(ixs[0].accounts[0].pubkey, payer.pubkey());
        assert_eq!(ixs[0].accounts[1].pubkey, recipient_ata);

        assert_eq!(ixs[1].data[0], 3);
        assert_eq!(amount_of(&ixs[1]), 2_500_000_000_000);
        assert_eq!(ixs[1].accounts[0].pubkey, sender_ata);
        assert_eq!(ixs[1].accounts[1].pubkey, recipient_ata);
        assert_eq!(ixs[1].accounts[2].pubkey, owner.pubkey());
    }

    #[test]
    fn transfer_without_mint_fails() {
        let owner = Keypair::from_seed(&[1u8; 32]);
        let handle = TokenHandle::new(&owner, &owner, None);

        let err = InstructionSequencer::default()
            .transfer(
                &handle,
                &TransferRequest {
                    recipient: [0x52; 32],
                    amount: 1.0,
                    check_mint_initialized: false,
                },
            )
            .unwrap_err();
        assert!(matches!(err, TokenError::Precondition(_)));
    }
}
