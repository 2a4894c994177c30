//! Shared data model for the pagination driver
//!
//! The types a paged source and the driver exchange: the request describing
//! one page, and the continuation metadata that comes back with it. All of
//! them are plain serde-derived values so they can travel inside a larger
//! configuration or state document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size applied by the options normalizer
pub const DEFAULT_PER_PAGE: u32 = 100;

// ============================================================================
// Page Request
// ============================================================================

/// Describes one page to fetch from a paged source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number to fetch (first page is 1)
    pub page: u32,
    /// Number of items requested per page
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Create a page request
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }
}

// ============================================================================
// Page Context
// ============================================================================

/// Continuation metadata returned alongside one fetched page
///
/// `next_page == 0` means the source has no further pages; this is the sole
/// exhaustion signal the driver honors, independent of item count or rate
/// budget. `last_page` is informational and never read by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// Page number of the next page, 0 when no further pages exist
    #[serde(default)]
    pub next_page: u32,
    /// Page number of the last page, when the source reports it
    #[serde(default)]
    pub last_page: u32,
    /// Rate-limit bookkeeping the source lifted off the response, if any
    #[serde(default)]
    pub rate: Option<RateSnapshot>,
}

impl PageContext {
    /// Context for a page with no successor
    pub fn exhausted() -> Self {
        Self::default()
    }

    /// Context pointing at the next page to fetch
    pub fn next(next_page: u32) -> Self {
        Self {
            next_page,
            ..Self::default()
        }
    }

    /// Attach a rate snapshot
    #[must_use]
    pub fn with_rate(mut self, rate: RateSnapshot) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Whether the source reported a further page
    pub fn has_next(&self) -> bool {
        self.next_page != 0
    }
}

// ============================================================================
// Rate Snapshot
// ============================================================================

/// Rate-limit budget as observed on one page response
///
/// Opaque to the driver; consumed by rate gates that decide whether paging
/// may continue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Total request budget in the current window
    pub limit: u32,
    /// Requests remaining in the current window
    pub remaining: u32,
    /// When the window resets, if the source reports it
    #[serde(default)]
    pub reset: Option<DateTime<Utc>>,
}

impl RateSnapshot {
    /// Create a snapshot without a reset timestamp
    pub fn new(limit: u32, remaining: u32) -> Self {
        Self {
            limit,
            remaining,
            reset: None,
        }
    }

    /// Attach the window reset time
    #[must_use]
    pub fn with_reset(mut self, reset: DateTime<Utc>) -> Self {
        self.reset = Some(reset);
        self
    }

    /// Whether the budget is fully spent
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_default() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_page_context_has_next() {
        assert!(!PageContext::exhausted().has_next());
        assert!(PageContext::next(2).has_next());
        assert!(!PageContext::next(0).has_next());
    }

    #[test]
    fn test_rate_snapshot_exhausted() {
        assert!(RateSnapshot::new(5000, 0).is_exhausted());
        assert!(!RateSnapshot::new(5000, 1).is_exhausted());
    }

    #[test]
    fn test_page_context_serde() {
        let context: PageContext = serde_json::from_str(r#"{"next_page": 4}"#).unwrap();
        assert_eq!(context.next_page, 4);
        assert_eq!(context.last_page, 0);
        assert!(context.rate.is_none());

        let context: PageContext = serde_json::from_str(
            r#"{"next_page": 2, "last_page": 9, "rate": {"limit": 5000, "remaining": 4312}}"#,
        )
        .unwrap();
        assert_eq!(context.last_page, 9);
        assert_eq!(context.rate.unwrap().remaining, 4312);
    }

    #[test]
    fn test_rate_snapshot_serde_roundtrip() {
        let snapshot = RateSnapshot::new(60, 42).with_reset(Utc::now());
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
