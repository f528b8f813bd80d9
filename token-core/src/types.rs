//! Core types for the wrapped-native token
//!
//! Amounts are fixed-width unsigned base units; all arithmetic on them
//! is checked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token amount in base units.
pub type Amount = u128;

/// Maximum total supply the token will ever report: `2^112 - 1`.
///
/// The ceiling holds at every observable point, including the transient
/// window while a flash session's minted supply is live.
pub const MAX_SUPPLY: Amount = (1 << 112) - 1;

/// Basis-points denominator for fee arithmetic.
pub const BPS_DENOMINATOR: Amount = 10_000;

/// Account identifier (address-like opaque key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_display() {
        let account = AccountId::new("0xabc123");
        assert_eq!(account.to_string(), "0xabc123");
        assert_eq!(account.as_str(), "0xabc123");
    }

    #[test]
    fn test_max_supply_value() {
        assert_eq!(MAX_SUPPLY, 5_192_296_858_534_827_628_530_496_329_220_095);
    }
}
