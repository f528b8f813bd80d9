//! Reference flash borrowers
//!
//! A recording borrower harness that exercises the flash-mint protocol
//! the way real consumers would: plain repayment, theft attempts,
//! nested sessions, and withdraw-redeposit round trips. The harness
//! records what it observed while the minted balance was live, so tests
//! can assert on transient state after the session completes.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use token_core::{AccountId, Amount, FlashBorrower, Result, WrappedNative};
use tracing::debug;

/// What the harness does while it holds the minted balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Hold the balance and let the session burn it back
    Repay,
    /// Move the minted balance away and keep it
    Steal,
    /// Issue a nested flash mint for double the amount
    Reenter,
    /// Withdraw the minted units to native, then redeposit them
    WithdrawRedeposit,
}

/// Recording borrower harness
///
/// Observations (`flash_balance`, `flash_value`, `flash_initiator`) are
/// overwritten on every callback invocation, so after a nested session
/// they reflect the innermost frame.
#[derive(Debug)]
pub struct FlashMinterHarness {
    account: AccountId,
    sink: AccountId,
    action: Action,
    depth: usize,

    /// Proxy balance observed at callback entry
    pub flash_balance: Amount,

    /// Amount argument observed by the callback
    pub flash_value: Amount,

    /// Initiator observed by the callback
    pub flash_initiator: Option<AccountId>,

    /// Native units held outside the token between withdraw and redeposit
    pub native_held: Amount,
}

impl FlashMinterHarness {
    /// Harness crediting `account` during sessions
    pub fn new(account: AccountId) -> Self {
        let sink = AccountId::new(format!("{}-sink", account.as_str()));
        Self {
            account,
            sink,
            action: Action::Repay,
            depth: 0,
            flash_balance: 0,
            flash_value: 0,
            flash_initiator: None,
            native_held: 0,
        }
    }

    /// Account credited with minted funds
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Account stolen funds are parked on
    pub fn sink(&self) -> &AccountId {
        &self.sink
    }

    /// Flash mint and repay
    pub fn flash_mint(
        &mut self,
        token: &mut WrappedNative,
        initiator: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.action = Action::Repay;
        token.flash_mint(initiator, self, amount)
    }

    /// Flash mint and keep the minted balance
    pub fn flash_mint_and_steal(
        &mut self,
        token: &mut WrappedNative,
        initiator: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.action = Action::Steal;
        token.flash_mint(initiator, self, amount)
    }

    /// Flash mint and issue a second, nested flash mint from the callback
    pub fn flash_mint_and_reenter(
        &mut self,
        token: &mut WrappedNative,
        initiator: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.action = Action::Reenter;
        token.flash_mint(initiator, self, amount)
    }

    /// Flash mint, withdraw the minted units to native, redeposit them
    pub fn flash_mint_and_withdraw(
        &mut self,
        token: &mut WrappedNative,
        initiator: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.action = Action::WithdrawRedeposit;
        token.flash_mint(initiator, self, amount)
    }

    fn handle(
        &mut self,
        token: &mut WrappedNative,
        initiator: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.flash_balance = token.balance_of(&self.account);
        self.flash_value = amount;
        self.flash_initiator = Some(initiator.clone());
        debug!(
            "callback at depth {}: balance {} for value {}",
            self.depth, self.flash_balance, amount
        );

        match self.action {
            Action::Repay => Ok(()),
            Action::Steal => token.transfer(&self.account, &self.sink, amount),
            Action::Reenter => {
                if self.depth == 1 {
                    token.flash_mint(initiator, self, amount * 2)
                } else {
                    Ok(())
                }
            }
            Action::WithdrawRedeposit => {
                token.withdraw(&self.account, amount)?;
                self.native_held += amount;
                token.deposit(&self.account, amount)?;
                self.native_held -= amount;
                Ok(())
            }
        }
    }
}

impl FlashBorrower for FlashMinterHarness {
    fn proxy(&self) -> &AccountId {
        &self.account
    }

    fn on_flash_loan(
        &mut self,
        token: &mut WrappedNative,
        initiator: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.depth += 1;
        let result = self.handle(token, initiator, amount);
        self.depth -= 1;
        result
    }
}
