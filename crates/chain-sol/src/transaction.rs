//! Solana transaction wire format and signing.
//!
//! Transactions are built by hand; no `solana-sdk` dependency. Layout:
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures
//!   message:
//!     num_required_sigs     u8
//!     num_readonly_signed   u8
//!     num_readonly_unsigned u8
//!     num_accounts          compact-u16
//!     account_keys          32 bytes * num_accounts
//!     recent_blockhash      32 bytes
//!     num_instructions      compact-u16
//!     instructions[]        (see below)
//!
//! Instruction:
//!   program_id_index        u8
//!   num_accounts            compact-u16
//!   account_indices         u8 * num_accounts
//!   data_len                compact-u16
//!   data                    u8 * data_len
//! ```

use crate::address::{encode_address, Pubkey};
use crate::error::SolError;
use crate::keypair::Keypair;

// ---------------------------------------------------------------------------
// Compact-u16 encoding
// ---------------------------------------------------------------------------

/// Encode a `u16` value in Solana's compact-u16 format.
///
/// - Values 0..0x7f       -> 1 byte
/// - Values 0x80..0x3fff  -> 2 bytes
/// - Values 0x4000..      -> 3 bytes
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut val = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

fn compact_len(len: usize, what: &str) -> Result<Vec<u8>, SolError> {
    let len = u16::try_from(len)
        .map_err(|_| SolError::TransactionBuildError(format!("too many {what}: {len}")))?;
    Ok(encode_compact_u16(len))
}

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

/// A single account reference in an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn writable(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// An instruction before it is compiled into a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// An instruction whose accounts are indices into [`Message::account_keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A compiled legacy message: the bytes every signer signs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Account keys in canonical order:
    ///   1. writable signers (fee payer first)
    ///   2. read-only signers
    ///   3. writable non-signers
    ///   4. read-only non-signers
    pub account_keys: Vec<Pubkey>,
    pub num_required_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,
    pub recent_blockhash: [u8; 32],
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Keys that must sign, in signature-slot order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        &self.account_keys[..self.num_required_signatures as usize]
    }

    /// Recover the instruction list, with account roles taken from the header.
    pub fn decompile(&self) -> Result<Vec<Instruction>, SolError> {
        let key = |idx: u8| {
            self.account_keys.get(idx as usize).copied().ok_or_else(|| {
                SolError::TransactionBuildError(format!("account index {idx} out of range"))
            })
        };

        self.instructions
            .iter()
            .map(|ix| {
                let accounts = ix
                    .account_indices
                    .iter()
                    .map(|&idx| {
                        Ok(AccountMeta {
                            pubkey: key(idx)?,
                            is_signer: self.is_signer(idx as usize),
                            is_writable: self.is_writable(idx as usize),
                        })
                    })
                    .collect::<Result<Vec<_>, SolError>>()?;

                Ok(Instruction {
                    program_id: key(ix.program_id_index)?,
                    accounts,
                    data: ix.data.clone(),
                })
            })
            .collect()
    }

    fn is_signer(&self, idx: usize) -> bool {
        idx < self.num_required_signatures as usize
    }

    fn is_writable(&self, idx: usize) -> bool {
        let signers = self.num_required_signatures as usize;
        if idx < signers {
            idx < signers - self.num_readonly_signed as usize
        } else {
            idx < self.account_keys.len() - self.num_readonly_unsigned as usize
        }
    }

    /// Serialize the message (the bytes that get signed).
    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let mut buf = Vec::with_capacity(256);

        buf.push(self.num_required_signatures);
        buf.push(self.num_readonly_signed);
        buf.push(self.num_readonly_unsigned);

        buf.extend_from_slice(&compact_len(self.account_keys.len(), "account keys")?);
        for key in &self.account_keys {
            buf.extend_from_slice(key);
        }

        buf.extend_from_slice(&self.recent_blockhash);

        buf.extend_from_slice(&compact_len(self.instructions.len(), "instructions")?);
        for ix in &self.instructions {
            buf.push(ix.program_id_index);

            buf.extend_from_slice(&compact_len(ix.account_indices.len(), "instruction accounts")?);
            buf.extend_from_slice(&ix.account_indices);

            buf.extend_from_slice(&compact_len(ix.data.len(), "instruction data bytes")?);
            buf.extend_from_slice(&ix.data);
        }

        Ok(buf)
    }
}

/// Compile `instructions` into a message paid for by `fee_payer`.
///
/// The fee payer is always the first writable signer. Accounts referenced by
/// several instructions are merged, keeping the union of their permissions.
pub fn compile_message(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    recent_blockhash: &[u8; 32],
) -> Result<Message, SolError> {
    if instructions.is_empty() {
        return Err(SolError::TransactionBuildError(
            "message has no instructions".into(),
        ));
    }

    // Instruction account lists are tiny, a linear scan beats hashing.
    let mut entries: Vec<AccountMeta> = vec![AccountMeta::writable(*fee_payer, true)];

    let mut upsert = |meta: &AccountMeta| {
        if let Some(entry) = entries.iter_mut().find(|e| e.pubkey == meta.pubkey) {
            entry.is_signer |= meta.is_signer;
            entry.is_writable |= meta.is_writable;
        } else {
            entries.push(meta.clone());
        }
    };

    for ix in instructions {
        for meta in &ix.accounts {
            upsert(meta);
        }
        upsert(&AccountMeta::readonly(ix.program_id, false));
    }

    // Stable sort: insertion order survives within a category, and the fee
    // payer was inserted first as a writable signer.
    entries.sort_by_key(|e| match (e.is_signer, e.is_writable) {
        (true, true) => 0u8,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    });

    if entries.len() > u8::MAX as usize + 1 {
        return Err(SolError::TransactionBuildError(format!(
            "too many accounts: {}",
            entries.len()
        )));
    }

    let count = |f: fn(&AccountMeta) -> bool| entries.iter().filter(|e| f(e)).count() as u8;
    let num_required_signatures = count(|e| e.is_signer);
    let num_readonly_signed = count(|e| e.is_signer && !e.is_writable);
    let num_readonly_unsigned = count(|e| !e.is_signer && !e.is_writable);

    let account_keys: Vec<Pubkey> = entries.iter().map(|e| e.pubkey).collect();
    let index_of = |key: &Pubkey| {
        account_keys
            .iter()
            .position(|k| k == key)
            .map(|i| i as u8)
            .ok_or_else(|| SolError::TransactionBuildError("account not in account keys".into()))
    };

    let mut compiled = Vec::with_capacity(instructions.len());
    for ix in instructions {
        let account_indices = ix
            .accounts
            .iter()
            .map(|meta| index_of(&meta.pubkey))
            .collect::<Result<Vec<_>, _>>()?;

        compiled.push(CompiledInstruction {
            program_id_index: index_of(&ix.program_id)?,
            account_indices,
            data: ix.data.clone(),
        });
    }

    Ok(Message {
        account_keys,
        num_required_signatures,
        num_readonly_signed,
        num_readonly_unsigned,
        recent_blockhash: *recent_blockhash,
        instructions: compiled,
    })
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// A fully signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub signatures: Vec<[u8; 64]>,
    pub message: Message,
}

impl SignedTransaction {
    /// The transaction id: Base58 of the fee payer's signature.
    pub fn id(&self) -> String {
        self.signatures
            .first()
            .map(|sig| bs58::encode(sig).into_string())
            .unwrap_or_default()
    }

    /// Serialize into the wire format accepted by `sendTransaction`.
    pub fn to_wire(&self) -> Result<Vec<u8>, SolError> {
        let message = self.message.serialize()?;
        let mut wire = Vec::with_capacity(3 + self.signatures.len() * 64 + message.len());

        wire.extend_from_slice(&compact_len(self.signatures.len(), "signatures")?);
        for sig in &self.signatures {
            wire.extend_from_slice(sig);
        }
        wire.extend_from_slice(&message);

        Ok(wire)
    }
}

/// Sign `message` with every required signer found in `signers`.
///
/// Each signature slot is filled by the keypair whose public key matches
/// the corresponding signer key. A missing keypair is an error; keypairs
/// that are not required are ignored.
pub fn sign_message(message: Message, signers: &[&Keypair]) -> Result<SignedTransaction, SolError> {
    let bytes = message.serialize()?;

    let signatures = message
        .signer_keys()
        .iter()
        .map(|key| {
            signers
                .iter()
                .find(|kp| kp.pubkey() == *key)
                .map(|kp| kp.sign(&bytes))
                .ok_or_else(|| {
                    SolError::SigningError(format!(
                        "missing keypair for signer {}",
                        encode_address(key)
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SignedTransaction {
        signatures,
        message,
    })
}
