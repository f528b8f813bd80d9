//! Flash session state machine
//!
//! A flash mint creates temporary supply that must be fully repaid
//! before the call returns, or the entire operation is void. Each
//! invocation owns a stack-scoped session frame and its own ledger
//! checkpoint, so borrower callbacks may re-enter [`WrappedNative::flash_mint`]
//! and every frame unwinds independently. There is no shared "in-flight
//! loan" flag.
//!
//! # Session lifecycle
//!
//! ```text
//! Idle -> Minted -> AwaitingCallback -> Verified -> Burned   (success)
//! Idle -> Minted -> AwaitingCallback -> Reverted             (failure)
//! ```

use crate::error::{Error, Result};
use crate::token::WrappedNative;
use crate::types::{AccountId, Amount};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Borrower capability invoked during a flash session
///
/// The session credits the minted supply to [`FlashBorrower::proxy`] and
/// hands control to [`FlashBorrower::on_flash_loan`] while that balance
/// is live. When the callback returns, the proxy must hold at least
/// principal plus fee; only the final balance matters, not the path
/// taken. Returning `Ok(())` is the acknowledgement; any error aborts
/// the session.
pub trait FlashBorrower {
    /// Account credited with the minted supply for the session
    fn proxy(&self) -> &AccountId;

    /// Synchronous callback run while the minted balance is live
    ///
    /// The borrower may deposit, withdraw, transfer, or issue a nested
    /// flash mint through `token`.
    fn on_flash_loan(
        &mut self,
        token: &mut WrappedNative,
        initiator: &AccountId,
        amount: Amount,
    ) -> Result<()>;
}

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No mint performed yet
    Idle,
    /// Supply minted to the borrower proxy
    Minted,
    /// Borrower callback running
    AwaitingCallback,
    /// Repayment verified on the proxy account
    Verified,
    /// Principal plus fee burned, session complete
    Burned,
    /// Session aborted, all effects undone
    Reverted,
}

/// Ephemeral record of one flash-mint invocation
///
/// Stack-scoped: created when `flash_mint` is entered and discarded at
/// its return. Nested invocations own independent frames.
#[derive(Debug, Clone)]
pub struct SessionFrame {
    /// Frame id for log correlation
    pub id: Uuid,

    /// Account credited with the minted funds
    pub borrower: AccountId,

    /// Principal minted
    pub amount: Amount,

    /// Fee charged on top of the principal
    pub fee: Amount,

    /// Lifecycle state
    pub state: SessionState,
}

impl SessionFrame {
    fn new(borrower: AccountId, amount: Amount, fee: Amount) -> Self {
        Self {
            id: Uuid::now_v7(),
            borrower,
            amount,
            fee,
            state: SessionState::Idle,
        }
    }

    fn transition(&mut self, state: SessionState) {
        debug!("session {} {:?} -> {:?}", self.id, self.state, state);
        self.state = state;
    }
}

impl WrappedNative {
    /// Run one flash-mint session
    ///
    /// Mints `amount` to the borrower proxy, checks the supply ceiling,
    /// hands control to the borrower callback, verifies repayment, and
    /// burns principal plus fee. Any failure at any step restores the
    /// ledger to its state at entry and propagates the error, so a
    /// failed call has no lasting effect even when an enclosing callback
    /// swallows it.
    pub fn flash_mint(
        &mut self,
        initiator: &AccountId,
        borrower: &mut dyn FlashBorrower,
        amount: Amount,
    ) -> Result<()> {
        if !self.config.flash.enabled {
            return Err(Error::FlashMintingDisabled);
        }
        let fee = self.flash_fee(amount)?;
        let mut frame = SessionFrame::new(borrower.proxy().clone(), amount, fee);
        let checkpoint = self.ledger.checkpoint();

        self.depth += 1;
        let depth = self.depth;
        debug!(
            "session {} opened at depth {}: {} borrows {}",
            frame.id, depth, frame.borrower, frame.amount
        );
        let result = self.run_session(initiator, borrower, &mut frame);
        self.depth -= 1;

        match result {
            Ok(()) => {
                self.metrics.record_flash_mint(depth);
                info!(
                    "session {} complete: {} repaid {} (+{} fee)",
                    frame.id, frame.borrower, frame.amount, frame.fee
                );
                Ok(())
            }
            Err(err) => {
                self.ledger.restore(checkpoint);
                frame.transition(SessionState::Reverted);
                self.metrics.record_flash_revert();
                warn!("session {} reverted: {}", frame.id, err);
                Err(err)
            }
        }
    }

    /// Drive the mint -> guard -> callback -> verify -> burn sequence
    fn run_session(
        &mut self,
        initiator: &AccountId,
        borrower: &mut dyn FlashBorrower,
        frame: &mut SessionFrame,
    ) -> Result<()> {
        self.ledger.mint(&frame.borrower, frame.amount)?;
        frame.transition(SessionState::Minted);

        // The borrower must never observe a supply above the ceiling,
        // even transiently.
        self.guard.check(self.ledger.total_supply())?;

        frame.transition(SessionState::AwaitingCallback);
        borrower.on_flash_loan(self, initiator, frame.amount)?;

        let owed = frame.amount.checked_add(frame.fee).ok_or(Error::Overflow)?;
        let balance = self.ledger.balance_of(&frame.borrower);
        if balance < owed {
            return Err(Error::SupplyNotRestored {
                account: frame.borrower.clone(),
                balance,
                owed,
            });
        }
        frame.transition(SessionState::Verified);

        self.ledger.burn(&frame.borrower, owed)?;
        frame.transition(SessionState::Burned);
        Ok(())
    }
}
