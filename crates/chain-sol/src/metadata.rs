//! Token Metadata program support: metadata-account derivation and
//! `CreateMetadataAccountV3`.
//!
//! The instruction payload is Borsh. It is small and fixed in shape, so it
//! is written by hand like the rest of the wire formats in this crate.

use crate::address::Pubkey;
use crate::error::SolError;
use crate::pda::find_program_address;
use crate::system::SYSTEM_PROGRAM_ID;
use crate::transaction::{AccountMeta, Instruction};

/// Token Metadata Program ID: `metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s`
pub const METADATA_PROGRAM_ID: Pubkey = [
    0x0b, 0x70, 0x65, 0xb1, 0xe3, 0xd1, 0x7c, 0x45, 0x38, 0x9d, 0x52, 0x7f, 0x6b, 0x04, 0xc3,
    0xcd, 0x58, 0xb8, 0x6c, 0x73, 0x1a, 0xa0, 0xfd, 0xb5, 0x49, 0xb6, 0xd1, 0xbc, 0x03, 0xf8,
    0x29, 0x46,
];

/// Domain tag of the metadata PDA seeds.
pub const METADATA_SEED: &[u8] = b"metadata";

const CREATE_METADATA_ACCOUNT_V3: u8 = 33;

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_CREATOR_LIMIT: usize = 5;

/// A creator entry. Shares across all creators must total 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    pub share: u8,
}

/// The `DataV2` fields this crate sets; collection and uses are always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataArgs {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Vec<Creator>,
    pub is_mutable: bool,
}

/// Derive the metadata account for `mint`.
///
/// Seeds: `["metadata", metadata_program_id, mint]`.
pub fn find_metadata_address(mint: &Pubkey) -> Result<Pubkey, SolError> {
    find_program_address(
        &[METADATA_SEED, &METADATA_PROGRAM_ID, mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

/// Build `CreateMetadataAccountV3` creating `metadata` for `mint`.
///
/// `metadata` must be [`find_metadata_address`] of `mint`.
pub fn create_metadata_account_v3(
    metadata: &Pubkey,
    mint: &Pubkey,
    mint_authority: &Pubkey,
    payer: &Pubkey,
    update_authority: &Pubkey,
    args: &MetadataArgs,
) -> Result<Instruction, SolError> {
    validate(args)?;

    let strings_len = args.name.len() + args.symbol.len() + args.uri.len();
    let mut data = Vec::with_capacity(1 + 4 * 3 + strings_len + 200);
    data.push(CREATE_METADATA_ACCOUNT_V3);

    // DataV2
    push_string(&mut data, &args.name);
    push_string(&mut data, &args.symbol);
    push_string(&mut data, &args.uri);
    data.extend_from_slice(&args.seller_fee_basis_points.to_le_bytes());
    if args.creators.is_empty() {
        data.push(0);
    } else {
        data.push(1);
        data.extend_from_slice(&(args.creators.len() as u32).to_le_bytes());
        for creator in &args.creators {
            data.extend_from_slice(&creator.address);
            data.push(creator.verified as u8);
            data.push(creator.share);
        }
    }
    data.push(0); // collection: None
    data.push(0); // uses: None

    data.push(args.is_mutable as u8);
    data.push(0); // collection_details: None

    Ok(Instruction {
        program_id: METADATA_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*metadata, false),
            AccountMeta::readonly(*mint, false),
            AccountMeta::readonly(*mint_authority, true),
            AccountMeta::writable(*payer, true),
            AccountMeta::readonly(*update_authority, false),
            AccountMeta::readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data,
    })
}

fn validate(args: &MetadataArgs) -> Result<(), SolError> {
    let too_long = |field: &str, len: usize, max: usize| {
        SolError::InstructionBuildError(format!("{field} is {len} bytes, max {max}"))
    };

    if args.name.len() > MAX_NAME_LENGTH {
        return Err(too_long("name", args.name.len(), MAX_NAME_LENGTH));
    }
    if args.symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(too_long("symbol", args.symbol.len(), MAX_SYMBOL_LENGTH));
    }
    if args.uri.len() > MAX_URI_LENGTH {
        return Err(too_long("uri", args.uri.len(), MAX_URI_LENGTH));
    }
    if args.seller_fee_basis_points > 10_000 {
        return Err(SolError::InstructionBuildError(
            "seller fee exceeds 10000 basis points".into(),
        ));
    }
    if args.creators.len() > MAX_CREATOR_LIMIT {
        return Err(SolError::InstructionBuildError(format!(
            "{} creators, max {MAX_CREATOR_LIMIT}",
            args.creators.len()
        )));
    }
    if !args.creators.is_empty() {
        let total: u32 = args.creators.iter().map(|c| c.share as u32).sum();
        if total != 100 {
            return Err(SolError::InstructionBuildError(format!(
                "creator shares total {total}, expected 100"
            )));
        }
    }

    Ok(())
}

fn push_string(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::encode_address;

    fn args() -> MetadataArgs {
        MetadataArgs {
            name: "Solana Token 001".into(),
            symbol: "SMY1".into(),
            uri: "https://example.com/metadata.json".into(),
            seller_fee_basis_points: 0,
            creators: vec![Creator {
                address: [9u8; 32],
                verified: true,
                share: 100,
            }],
            is_mutable: true,
        }
    }

    #[test]
    fn program_id_roundtrip() {
        assert_eq!(
            encode_address(&METADATA_PROGRAM_ID),
            "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s"
        );
    }

    #[test]
    fn metadata_address_depends_on_mint() {
        let a = find_metadata_address(&[1u8; 32]).unwrap();
        let b = find_metadata_address(&[2u8; 32]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, find_metadata_address(&[1u8; 32]).unwrap());
    }

    #[test]
    fn borsh_layout() {
        let a = args();
        let ix = create_metadata_account_v3(
            &[8u8; 32],
            &[1u8; 32],
            &[2u8; 32],
            &[2u8; 32],
            &[9u8; 32],
            &a,
        )
        .unwrap();
        let d = &ix.data;

        assert_eq!(d[0], 33);
        assert_eq!(u32::from_le_bytes(d[1..5].try_into().unwrap()), 16);
        assert_eq!(&d[5..21], b"Solana Token 001");

        let symbol_at = 21;
        assert_eq!(u32::from_le_bytes(d[symbol_at..symbol_at + 4].try_into().unwrap()), 4);

        // Tail: fee(2) + Some(1) + len(4) + creator(34) + collection(1) + uses(1)
        // + is_mutable(1) + collection_details(1)
        let tail = &d[d.len() - 45..];
        assert_eq!(&tail[..2], &[0, 0]);
        assert_eq!(tail[2], 1);
        assert_eq!(u32::from_le_bytes(tail[3..7].try_into().unwrap()), 1);
        assert_eq!(&tail[7..39], &[9u8; 32]);
        assert_eq!(tail[39], 1);
        assert_eq!(tail[40], 100);
        assert_eq!(&tail[41..], &[0, 0, 1, 0]);
    }

    #[test]
    fn account_roles() {
        let mint = [1u8; 32];
        let metadata = find_metadata_address(&mint).unwrap();
        let ix = create_metadata_account_v3(
            &metadata,
            &mint,
            &[2u8; 32],
            &[3u8; 32],
            &[9u8; 32],
            &args(),
        )
        .unwrap();

        assert_eq!(ix.program_id, METADATA_PROGRAM_ID);
        assert_eq!(ix.accounts[0].pubkey, metadata);
        assert!(ix.accounts[0].is_writable);
        assert!(ix.accounts[2].is_signer);
        assert!(ix.accounts[3].is_signer && ix.accounts[3].is_writable);
    }

    #[test]
    fn long_name_is_rejected() {
        let mut a = args();
        a.name = "x".repeat(33);
        let err = create_metadata_account_v3(
            &[8u8; 32],
            &[1u8; 32],
            &[2u8; 32],
            &[2u8; 32],
            &[9u8; 32],
            &a,
        )
        .unwrap_err();
        assert!(err.to_string().contains("name is 33 bytes"));
    }

    #[test]
    fn creator_shares_must_total_100() {
        let mut a = args();
        a.creators[0].share = 90;
        let result = create_metadata_account_v3(
            &[8u8; 32],
            &[1u8; 32],
            &[2u8; 32],
            &[2u8; 32],
            &[9u8; 32],
            &a,
        );
        assert!(result.is_err());
    }
}
