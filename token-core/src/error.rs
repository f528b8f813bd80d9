//! Error types for the token core

use crate::types::{AccountId, Amount};
use thiserror::Error;

/// Result type for token operations
pub type Result<T> = std::result::Result<T, Error>;

/// Token errors
///
/// Every error is unrecoverable at the point raised: propagation is
/// abort-and-unwind, never catch-and-retry. A failed flash mint reverts
/// with no state change, and the caller may re-attempt a fresh call.
#[derive(Error, Debug)]
pub enum Error {
    /// Minting would push total supply above the fixed ceiling
    #[error("supply limit exceeded: supply {supply} over ceiling {ceiling}")]
    SupplyLimitExceeded {
        /// Supply the rejected mint would have produced
        supply: Amount,
        /// Fixed ceiling the guard enforces
        ceiling: Amount,
    },

    /// Borrower balance after the callback is below principal plus fee
    #[error("supply not restored: {account} holds {balance}, owes {owed}")]
    SupplyNotRestored {
        /// Borrower proxy account that failed verification
        account: AccountId,
        /// Balance found at verification time
        balance: Amount,
        /// Principal plus fee the session must burn
        owed: Amount,
    },

    /// Burn, transfer, or withdraw from an account lacking sufficient funds
    #[error("insufficient balance: {account} holds {balance}, needs {needed}")]
    InsufficientBalance {
        /// Account that came up short
        account: AccountId,
        /// Balance the account holds
        balance: Amount,
        /// Amount the operation required
        needed: Amount,
    },

    /// Balance or total-supply arithmetic would wrap past the representable range
    #[error("amount overflow")]
    Overflow,

    /// Flash minting switched off in configuration
    #[error("flash minting is disabled")]
    FlashMintingDisabled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
