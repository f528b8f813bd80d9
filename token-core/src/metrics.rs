//! Metrics collection for observability
//!
//! Prometheus metrics for the token:
//!
//! - `token_flash_mints_total` - Flash sessions completed
//! - `token_flash_reverts_total` - Flash sessions aborted and unwound
//! - `token_flash_depth` - Histogram of session nesting depth
//! - `token_deposits_total` - Native deposits wrapped
//! - `token_withdrawals_total` - Withdrawals unwrapped

use prometheus::{Histogram, HistogramOpts, IntCounter, Opts, Registry};
use std::sync::Arc;

/// Metrics collector
///
/// Each collector owns its registry, so independent token instances
/// never collide on registration.
#[derive(Clone)]
pub struct Metrics {
    /// Flash sessions completed
    pub flash_mints_total: IntCounter,

    /// Flash sessions aborted and unwound
    pub flash_reverts_total: IntCounter,

    /// Nesting depth observed per completed session
    pub flash_depth: Histogram,

    /// Native deposits wrapped
    pub deposits_total: IntCounter,

    /// Withdrawals unwrapped
    pub withdrawals_total: IntCounter,

    registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let flash_mints_total = IntCounter::with_opts(Opts::new(
            "token_flash_mints_total",
            "Flash sessions completed",
        ))?;
        registry.register(Box::new(flash_mints_total.clone()))?;

        let flash_reverts_total = IntCounter::with_opts(Opts::new(
            "token_flash_reverts_total",
            "Flash sessions aborted and unwound",
        ))?;
        registry.register(Box::new(flash_reverts_total.clone()))?;

        let flash_depth = Histogram::with_opts(
            HistogramOpts::new("token_flash_depth", "Histogram of session nesting depth")
                .buckets(vec![1.0, 2.0, 3.0, 5.0, 8.0]),
        )?;
        registry.register(Box::new(flash_depth.clone()))?;

        let deposits_total = IntCounter::with_opts(Opts::new(
            "token_deposits_total",
            "Native deposits wrapped",
        ))?;
        registry.register(Box::new(deposits_total.clone()))?;

        let withdrawals_total = IntCounter::with_opts(Opts::new(
            "token_withdrawals_total",
            "Withdrawals unwrapped",
        ))?;
        registry.register(Box::new(withdrawals_total.clone()))?;

        Ok(Self {
            flash_mints_total,
            flash_reverts_total,
            flash_depth,
            deposits_total,
            withdrawals_total,
            registry,
        })
    }

    /// Record a completed flash session and the depth it ran at
    pub fn record_flash_mint(&self, depth: usize) {
        self.flash_mints_total.inc();
        self.flash_depth.observe(depth as f64);
    }

    /// Record an aborted flash session
    pub fn record_flash_revert(&self) {
        self.flash_reverts_total.inc();
    }

    /// Record a deposit
    pub fn record_deposit(&self) {
        self.deposits_total.inc();
    }

    /// Record a withdrawal
    pub fn record_withdrawal(&self) {
        self.withdrawals_total.inc();
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
