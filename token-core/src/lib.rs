//! Wrapped-Native Token Core
//!
//! A wrapped-native-asset token with flash minting: a caller may mint
//! uncollateralized, temporary supply, use it within the same call, and
//! must return it (plus any fee) before the call completes, or the
//! entire operation is rejected and all state changes are undone.
//!
//! # Architecture
//!
//! - **Ledger**: per-account balances and total supply; each operation
//!   applies both of its mutations or neither
//! - **Supply Guard**: fixed ceiling, held even during the transient
//!   window while flash-minted supply is live
//! - **Flash Session**: mint -> guard -> callback -> verify -> burn,
//!   one stack-scoped frame per invocation, reentrancy by nesting
//!
//! # Invariants
//!
//! - Conservation: Σ(balances) == total supply outside in-flight sessions
//! - Ceiling: total supply ≤ [`MAX_SUPPLY`] at every observable point
//! - Atomicity: a failed flash mint leaves no trace

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod flash;
pub mod ledger;
pub mod metrics;
pub mod supply;
pub mod token;
pub mod types;

// Re-exports
pub use config::{Config, FlashConfig};
pub use error::{Error, Result};
pub use flash::{FlashBorrower, SessionFrame, SessionState};
pub use ledger::Ledger;
pub use metrics::Metrics;
pub use supply::SupplyGuard;
pub use token::WrappedNative;
pub use types::{AccountId, Amount, BPS_DENOMINATOR, MAX_SUPPLY};
