use std::time::Duration;

use chain_sol::SolError;
use thiserror::Error;

/// Failures reported by a [`ChainClient`](crate::client::ChainClient).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("rpc request failed: {0}")]
    Rpc(String),

    #[error("malformed rpc response: {0}")]
    InvalidResponse(String),

    #[error("transaction rejected: {0}")]
    Rejected(String),
}

/// Token orchestration errors.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The handle is in the wrong lifecycle state for the operation.
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("chain query failed: {0}")]
    ChainQuery(#[source] ClientError),

    #[error("account {address} not visible after {waited:?}")]
    Timeout { address: String, waited: Duration },

    #[error("operation cancelled")]
    Cancelled,

    #[error("address derivation failed: {0}")]
    Derivation(String),

    /// Rebuilding with a fresh blockhash and resubmitting is up to the caller.
    #[error("transaction submission failed: {0}")]
    Submission(#[source] ClientError),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("transaction build failed: {0}")]
    TransactionBuild(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<SolError> for TokenError {
    fn from(e: SolError) -> Self {
        match e {
            SolError::DerivationFailed(msg) => TokenError::Derivation(msg),
            other => TokenError::TransactionBuild(other.to_string()),
        }
    }
}
