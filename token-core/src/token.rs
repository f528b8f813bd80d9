//! Wrapped-native token surface
//!
//! Ties the ledger, supply guard, and flash sessions into the public
//! token API. Deposit and withdraw wrap and unwrap the native asset;
//! moving the native-side value is the caller's concern, the token only
//! records the wrapped balance.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::metrics::Metrics;
use crate::supply::SupplyGuard;
use crate::types::{AccountId, Amount, BPS_DENOMINATOR, MAX_SUPPLY};
use tracing::debug;

/// Wrapped-native-asset token with flash minting
pub struct WrappedNative {
    pub(crate) ledger: Ledger,
    pub(crate) guard: SupplyGuard,
    pub(crate) config: Config,
    pub(crate) metrics: Metrics,

    /// Current flash nesting depth. Telemetry only; session state lives
    /// in each call's own frame.
    pub(crate) depth: usize,
}

impl WrappedNative {
    /// Create a token with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            ledger: Ledger::new(),
            guard: SupplyGuard::new(MAX_SUPPLY),
            metrics: Metrics::default(),
            depth: 0,
            config,
        }
    }

    /// Balance of `account`
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.ledger.balance_of(account)
    }

    /// Current total supply
    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Largest amount a flash mint could currently request
    pub fn max_flash_mint(&self) -> Amount {
        self.guard.max_supply().saturating_sub(self.ledger.total_supply())
    }

    /// Fee charged on a flash mint of `amount`
    pub fn flash_fee(&self, amount: Amount) -> Result<Amount> {
        let bps = self.config.flash.fee_bps as Amount;
        amount
            .checked_mul(bps)
            .map(|scaled| scaled / BPS_DENOMINATOR)
            .ok_or(Error::Overflow)
    }

    /// Wrap native units: credit `account` and grow the supply
    ///
    /// The ceiling is checked before anything is mutated, so a rejected
    /// deposit leaves no trace.
    pub fn deposit(&mut self, account: &AccountId, value: Amount) -> Result<()> {
        let prospective = self
            .ledger
            .total_supply()
            .checked_add(value)
            .ok_or(Error::Overflow)?;
        self.guard.check(prospective)?;

        self.ledger.mint(account, value)?;
        self.metrics.record_deposit();
        debug!("{} deposited {}", account, value);
        Ok(())
    }

    /// Unwrap: burn `value` from `account`
    ///
    /// The native-side payout is external to the token.
    pub fn withdraw(&mut self, account: &AccountId, value: Amount) -> Result<()> {
        self.ledger.burn(account, value)?;
        self.metrics.record_withdrawal();
        debug!("{} withdrew {}", account, value);
        Ok(())
    }

    /// Move `value` from `from` to `to`
    pub fn transfer(&mut self, from: &AccountId, to: &AccountId, value: Amount) -> Result<()> {
        self.ledger.transfer(from, to, value)
    }

    /// Check the conservation invariant: balances sum to total supply
    pub fn conserves_supply(&self) -> bool {
        self.ledger.conserves_supply()
    }

    /// Metrics handle
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
