//! Deterministic addresses used by the mint and transfer flows.

use chain_sol::Pubkey;

use crate::error::TokenError;

/// The token account holding `owner`'s balance of `mint`.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, TokenError> {
    Ok(chain_sol::find_associated_token_address(owner, mint)?)
}

/// The Token Metadata record of `mint`.
pub fn metadata_address(mint: &Pubkey) -> Result<Pubkey, TokenError> {
    Ok(chain_sol::find_metadata_address(mint)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_and_metadata_addresses_differ() {
        let mint = [4u8; 32];
        let ata = associated_token_address(&[5u8; 32], &mint).unwrap();
        let meta = metadata_address(&mint).unwrap();
        assert_ne!(ata, meta);
    }

    #[test]
    fn associated_address_is_stable() {
        let a = associated_token_address(&[5u8; 32], &[4u8; 32]).unwrap();
        let b = associated_token_address(&[5u8; 32], &[4u8; 32]).unwrap();
        assert_eq!(a, b);
    }
}
