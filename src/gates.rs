//! Ready-made rate-limit gates
//!
//! [`RateLimiter`] implementations covering the common cases: no gating at
//! all, stopping on a depleted source-reported budget, and local token-bucket
//! pacing via the governor crate.

use crate::error::{Error, Result};
use crate::paginate::RateLimiter;
use crate::types::PageContext;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

// ============================================================================
// Unlimited
// ============================================================================

/// Gate that never stops pagination
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

#[async_trait]
impl RateLimiter for Unlimited {
    async fn rate_limit(
        &mut self,
        _cancel: &CancellationToken,
        _context: &PageContext,
    ) -> Result<bool> {
        Ok(true)
    }
}

// ============================================================================
// Budget Gate
// ============================================================================

/// Gate that stops paging when the source-reported budget runs low
///
/// Reads the [`crate::types::RateSnapshot`] the Lister attached to the page
/// context and stops once the remaining budget is at or below `floor`.
/// Leaving a floor above zero keeps some budget free for other consumers of
/// the same API quota.
#[derive(Debug, Clone, Default)]
pub struct BudgetGate {
    /// Stop once `remaining` is at or below this value
    pub floor: u32,
    /// Treat a page without a snapshot as an evaluation failure
    pub require_snapshot: bool,
}

impl BudgetGate {
    /// Create a gate stopping at the given remaining-budget floor
    pub fn new(floor: u32) -> Self {
        Self {
            floor,
            require_snapshot: false,
        }
    }

    /// Fail the walk when a page carries no rate snapshot
    #[must_use]
    pub fn require_snapshot(mut self) -> Self {
        self.require_snapshot = true;
        self
    }
}

#[async_trait]
impl RateLimiter for BudgetGate {
    async fn rate_limit(
        &mut self,
        _cancel: &CancellationToken,
        context: &PageContext,
    ) -> Result<bool> {
        let Some(rate) = context.rate else {
            if self.require_snapshot {
                return Err(Error::rate_limit("page context carried no rate snapshot"));
            }
            return Ok(true);
        };

        if rate.remaining <= self.floor {
            warn!(
                remaining = rate.remaining,
                floor = self.floor,
                "rate budget depleted, stopping pagination"
            );
            return Ok(false);
        }
        Ok(true)
    }
}

// ============================================================================
// Throttle Gate
// ============================================================================

/// Configuration for [`ThrottleGate`]
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Maximum number of pages fetched per second
    pub pages_per_second: u32,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            pages_per_second: 10,
            burst_size: 10,
        }
    }
}

impl ThrottleConfig {
    /// Create a new throttle config
    pub fn new(pages_per_second: u32, burst_size: u32) -> Self {
        Self {
            pages_per_second,
            burst_size,
        }
    }
}

/// Token-bucket pacing gate
///
/// Never stops pagination on its own; it delays the decision until the local
/// bucket has a token, so page fetches are spaced out regardless of what the
/// source reports. Aborts with [`Error::Cancelled`] if the walk is cancelled
/// mid-wait.
#[derive(Clone)]
pub struct ThrottleGate {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl ThrottleGate {
    /// Create a throttle gate with the given config
    pub fn new(config: &ThrottleConfig) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(config.pages_per_second).unwrap_or(NonZeroU32::new(1).unwrap()),
        )
        .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::new(1).unwrap()));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }
}

impl Default for ThrottleGate {
    fn default() -> Self {
        Self::new(&ThrottleConfig::default())
    }
}

impl std::fmt::Debug for ThrottleGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThrottleGate").finish()
    }
}

#[async_trait]
impl RateLimiter for ThrottleGate {
    async fn rate_limit(
        &mut self,
        cancel: &CancellationToken,
        _context: &PageContext,
    ) -> Result<bool> {
        tokio::select! {
            () = cancel.cancelled() => Err(Error::Cancelled),
            () = self.limiter.until_ready() => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RateSnapshot;

    #[tokio::test]
    async fn test_unlimited_always_continues() {
        let cancel = CancellationToken::new();
        let mut gate = Unlimited;
        let context = PageContext::next(2);
        assert!(gate.rate_limit(&cancel, &context).await.unwrap());
    }

    #[tokio::test]
    async fn test_budget_gate_continues_above_floor() {
        let cancel = CancellationToken::new();
        let mut gate = BudgetGate::new(10);
        let context = PageContext::next(2).with_rate(RateSnapshot::new(5000, 11));
        assert!(gate.rate_limit(&cancel, &context).await.unwrap());
    }

    #[tokio::test]
    async fn test_budget_gate_stops_at_floor() {
        let cancel = CancellationToken::new();
        let mut gate = BudgetGate::new(10);
        let context = PageContext::next(2).with_rate(RateSnapshot::new(5000, 10));
        assert!(!gate.rate_limit(&cancel, &context).await.unwrap());

        let context = PageContext::next(2).with_rate(RateSnapshot::new(5000, 0));
        assert!(!gate.rate_limit(&cancel, &context).await.unwrap());
    }

    #[tokio::test]
    async fn test_budget_gate_missing_snapshot() {
        let cancel = CancellationToken::new();
        let context = PageContext::next(2);

        // lenient by default
        let mut gate = BudgetGate::new(0);
        assert!(gate.rate_limit(&cancel, &context).await.unwrap());

        // strict mode fails the evaluation
        let mut gate = BudgetGate::new(0).require_snapshot();
        let err = gate.rate_limit(&cancel, &context).await.unwrap_err();
        assert!(matches!(err, Error::RateLimit { .. }));
    }

    #[tokio::test]
    async fn test_throttle_gate_allows_burst() {
        let cancel = CancellationToken::new();
        let mut gate = ThrottleGate::new(&ThrottleConfig::new(10, 5));
        let context = PageContext::next(2);

        for _ in 0..5 {
            assert!(gate.rate_limit(&cancel, &context).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_throttle_gate_cancelled_mid_wait() {
        let cancel = CancellationToken::new();
        let mut gate = ThrottleGate::new(&ThrottleConfig::new(1, 1));
        let context = PageContext::next(2);

        // drain the single token, then cancel before the bucket refills
        assert!(gate.rate_limit(&cancel, &context).await.unwrap());
        cancel.cancel();
        let err = gate.rate_limit(&cancel, &context).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
