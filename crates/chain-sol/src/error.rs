use thiserror::Error;

/// Solana chain operation errors.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("address derivation failed: {0}")]
    DerivationFailed(String),

    #[error("instruction build error: {0}")]
    InstructionBuildError(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("signing error: {0}")]
    SigningError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_private_key() {
        let err = SolError::InvalidPrivateKey("key too short".into());
        assert_eq!(err.to_string(), "invalid private key: key too short");
    }

    #[test]
    fn display_derivation_failed() {
        let err = SolError::DerivationFailed("no bump seed".into());
        assert_eq!(err.to_string(), "address derivation failed: no bump seed");
    }

    #[test]
    fn display_instruction_build_error() {
        let err = SolError::InstructionBuildError("name too long".into());
        assert_eq!(err.to_string(), "instruction build error: name too long");
    }

    #[test]
    fn display_transaction_build_error() {
        let err = SolError::TransactionBuildError("missing signer".into());
        assert_eq!(err.to_string(), "transaction build error: missing signer");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(SolError::SigningError("test".into()));
        assert!(err.to_string().contains("test"));
    }
}
