//! Balance and supply bookkeeping
//!
//! The ledger is the only holder of mutable token state. Each operation
//! applies both of its mutations (balance and total supply) or neither,
//! so callers observe every call as a single atomic step. Side effects
//! are visible immediately; there is no buffering.

use crate::error::{Error, Result};
use crate::types::{AccountId, Amount};
use std::collections::HashMap;
use tracing::debug;

/// Per-account balances plus total supply
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Account balances; absent means zero
    balances: HashMap<AccountId, Amount>,

    /// Sum of all balances
    total_supply: Amount,
}

/// Snapshot of full ledger state, restorable on abort
///
/// Taken at flash-session entry so a failing session can undo every
/// mutation of its frame, including those of nested callbacks.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    balances: HashMap<AccountId, Amount>,
    total_supply: Amount,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `account`, zero if never credited
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Current total supply
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Credit `account` and grow total supply by `amount`
    ///
    /// Fails with [`Error::Overflow`] if either addition would wrap, in
    /// which case nothing is mutated.
    pub fn mint(&mut self, account: &AccountId, amount: Amount) -> Result<()> {
        let balance = self.balance_of(account);
        let new_balance = balance.checked_add(amount).ok_or(Error::Overflow)?;
        let new_supply = self.total_supply.checked_add(amount).ok_or(Error::Overflow)?;

        self.balances.insert(account.clone(), new_balance);
        self.total_supply = new_supply;
        debug!("minted {} to {} (supply {})", amount, account, new_supply);
        Ok(())
    }

    /// Debit `account` and shrink total supply by `amount`
    ///
    /// Fails with [`Error::InsufficientBalance`] if the account is short,
    /// in which case nothing is mutated. The supply subtraction is also
    /// checked to guard against ledger misuse.
    pub fn burn(&mut self, account: &AccountId, amount: Amount) -> Result<()> {
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(Error::InsufficientBalance {
                account: account.clone(),
                balance,
                needed: amount,
            });
        }
        let new_supply = self.total_supply.checked_sub(amount).ok_or(Error::Overflow)?;

        self.balances.insert(account.clone(), balance - amount);
        self.total_supply = new_supply;
        debug!("burned {} from {} (supply {})", amount, account, new_supply);
        Ok(())
    }

    /// Move `amount` between accounts without touching supply
    pub fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance {
                account: from.clone(),
                balance: from_balance,
                needed: amount,
            });
        }
        if from == to {
            return Ok(());
        }
        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        self.balances.insert(from.clone(), from_balance - amount);
        self.balances.insert(to.clone(), new_to);
        Ok(())
    }

    /// Snapshot the full ledger state
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            balances: self.balances.clone(),
            total_supply: self.total_supply,
        }
    }

    /// Restore a snapshot taken with [`Ledger::checkpoint`]
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.balances = checkpoint.balances;
        self.total_supply = checkpoint.total_supply;
    }

    /// Check the conservation invariant
    ///
    /// Verify that the sum of all account balances equals total supply.
    /// Holds at every point outside an in-flight flash session's
    /// mint/burn pair.
    pub fn conserves_supply(&self) -> bool {
        let mut sum: Amount = 0;
        for balance in self.balances.values() {
            sum = match sum.checked_add(*balance) {
                Some(s) => s,
                None => return false,
            };
        }
        sum == self.total_supply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str) -> AccountId {
        AccountId::new(id)
    }

    #[test]
    fn test_mint_and_burn() {
        let mut ledger = Ledger::new();
        let alice = account("alice");

        ledger.mint(&alice, 100).unwrap();
        assert_eq!(ledger.balance_of(&alice), 100);
        assert_eq!(ledger.total_supply(), 100);

        ledger.burn(&alice, 40).unwrap();
        assert_eq!(ledger.balance_of(&alice), 60);
        assert_eq!(ledger.total_supply(), 60);
        assert!(ledger.conserves_supply());
    }

    #[test]
    fn test_burn_insufficient_balance() {
        let mut ledger = Ledger::new();
        let alice = account("alice");
        ledger.mint(&alice, 5).unwrap();

        let result = ledger.burn(&alice, 6);
        assert!(matches!(
            result,
            Err(Error::InsufficientBalance {
                balance: 5,
                needed: 6,
                ..
            })
        ));

        // nothing mutated
        assert_eq!(ledger.balance_of(&alice), 5);
        assert_eq!(ledger.total_supply(), 5);
    }

    #[test]
    fn test_mint_overflow() {
        let mut ledger = Ledger::new();
        let alice = account("alice");
        ledger.mint(&alice, Amount::MAX).unwrap();

        let result = ledger.mint(&alice, 1);
        assert!(matches!(result, Err(Error::Overflow)));
        assert_eq!(ledger.total_supply(), Amount::MAX);
    }

    #[test]
    fn test_transfer() {
        let mut ledger = Ledger::new();
        let alice = account("alice");
        let bob = account("bob");
        ledger.mint(&alice, 10).unwrap();

        ledger.transfer(&alice, &bob, 4).unwrap();
        assert_eq!(ledger.balance_of(&alice), 6);
        assert_eq!(ledger.balance_of(&bob), 4);
        assert_eq!(ledger.total_supply(), 10);

        let result = ledger.transfer(&bob, &alice, 5);
        assert!(matches!(result, Err(Error::InsufficientBalance { .. })));
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let mut ledger = Ledger::new();
        let alice = account("alice");
        ledger.mint(&alice, 10).unwrap();

        ledger.transfer(&alice, &alice, 10).unwrap();
        assert_eq!(ledger.balance_of(&alice), 10);
        assert!(ledger.conserves_supply());
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut ledger = Ledger::new();
        let alice = account("alice");
        let bob = account("bob");
        ledger.mint(&alice, 10).unwrap();

        let checkpoint = ledger.checkpoint();
        ledger.mint(&bob, 7).unwrap();
        ledger.transfer(&alice, &bob, 3).unwrap();
        assert_eq!(ledger.total_supply(), 17);

        ledger.restore(checkpoint);
        assert_eq!(ledger.balance_of(&alice), 10);
        assert_eq!(ledger.balance_of(&bob), 0);
        assert_eq!(ledger.total_supply(), 10);
        assert!(ledger.conserves_supply());
    }
}
