//! Capability traits and options for the pagination driver
//!
//! The driver consumes three independent single-method capabilities rather
//! than one fat interface: a [`Lister`] that knows how to fetch one page, a
//! [`Processor`] that knows what to do with one item, and a [`RateLimiter`]
//! that decides whether paging may continue. Each is an async trait taking
//! the walk's cancellation token so in-flight work can observe it.

use crate::error::{Error, Result};
use crate::types::{PageContext, PageRequest, DEFAULT_PER_PAGE};
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

// ============================================================================
// Capability Traits
// ============================================================================

/// A paged data source
///
/// Supplied by an external collaborator (typically an API client); the driver
/// has no knowledge of HTTP, headers, or serialization. On error the driver
/// trusts neither items nor continuation metadata from the failed call.
#[async_trait]
pub trait Lister: Send {
    /// Item type produced by the source
    type Item: Send + Sync;

    /// Fetch the page described by `request`
    async fn list(
        &mut self,
        cancel: &CancellationToken,
        request: &PageRequest,
    ) -> Result<(Vec<Self::Item>, PageContext)>;
}

/// A per-item processing step
///
/// Invoked once per item, in page order then in-page order, synchronously
/// with respect to the walk. The driver retains ownership of the item; the
/// processor borrows it.
#[async_trait]
pub trait Processor<T>: Send {
    /// Process one item
    async fn process(&mut self, cancel: &CancellationToken, item: &T) -> Result<()>;
}

/// A rate-limit gate, consulted once per page after its items are processed
///
/// `Ok(true)` keeps paging, `Ok(false)` stops it cleanly. An `Err` means the
/// evaluation itself failed (e.g. the snapshot it needed was malformed),
/// which is distinct from a stop decision.
#[async_trait]
pub trait RateLimiter: Send {
    /// Decide whether the walk may fetch another page
    async fn rate_limit(
        &mut self,
        cancel: &CancellationToken,
        context: &PageContext,
    ) -> Result<bool>;
}

// ============================================================================
// Closure Adapters
// ============================================================================

/// Adapter turning a closure into a [`Lister`]
///
/// The closure receives the page request by value and returns a boxed
/// future, so it can capture shared state and do real async work.
pub struct ListWith<F> {
    f: F,
}

impl<F> ListWith<F> {
    /// Wrap a listing closure
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<T, F> Lister for ListWith<F>
where
    T: Send + Sync + 'static,
    F: FnMut(PageRequest) -> BoxFuture<'static, Result<(Vec<T>, PageContext)>> + Send,
{
    type Item = T;

    async fn list(
        &mut self,
        _cancel: &CancellationToken,
        request: &PageRequest,
    ) -> Result<(Vec<T>, PageContext)> {
        (self.f)(*request).await
    }
}

/// Adapter turning a synchronous closure into a [`Processor`]
///
/// Processing steps that need to await something should implement
/// [`Processor`] directly.
pub struct ProcessWith<F> {
    f: F,
}

impl<F> ProcessWith<F> {
    /// Wrap a processing closure
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<T, F> Processor<T> for ProcessWith<F>
where
    T: Send + Sync,
    F: FnMut(&T) -> Result<()> + Send,
{
    async fn process(&mut self, _cancel: &CancellationToken, item: &T) -> Result<()> {
        (self.f)(item)
    }
}

/// Adapter turning a synchronous closure into a [`RateLimiter`]
pub struct RateLimitWith<F> {
    f: F,
}

impl<F> RateLimitWith<F> {
    /// Wrap a gate closure
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> RateLimiter for RateLimitWith<F>
where
    F: FnMut(&PageContext) -> Result<bool> + Send,
{
    async fn rate_limit(
        &mut self,
        _cancel: &CancellationToken,
        context: &PageContext,
    ) -> Result<bool> {
        (self.f)(context)
    }
}

// ============================================================================
// Options
// ============================================================================

/// Options seeding a pagination walk
///
/// Designed to sit inside a larger configuration document; every field
/// defaults, and an absent value altogether is equivalent to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorOpts {
    /// Starting page request; `None` lets the normalizer pick defaults
    #[serde(default)]
    pub list: Option<PageRequest>,
    /// Safety cap on pages walked, 0 = unlimited
    #[serde(default)]
    pub max_pages: u32,
}

impl PaginatorOpts {
    /// Create empty options (all defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a specific page request
    #[must_use]
    pub fn with_list(mut self, list: PageRequest) -> Self {
        self.list = Some(list);
        self
    }

    /// Cap the number of pages walked
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Produce the concrete first-page request from possibly-absent options
///
/// Absent options, or options with no inner request, yield
/// `{page: 1, per_page: 100}`. A zero `per_page` is forced to the default
/// with the page number preserved verbatim; any positive `per_page` passes
/// through unchanged, with no upper-bound validation. Idempotent, and the
/// caller's options are left untouched.
pub fn page_request(opts: Option<&PaginatorOpts>) -> PageRequest {
    match opts.and_then(|o| o.list) {
        Some(mut request) => {
            if request.per_page == 0 {
                request.per_page = DEFAULT_PER_PAGE;
            }
            request
        }
        None => PageRequest::default(),
    }
}

// ============================================================================
// Walk Outcome
// ============================================================================

/// Outcome of a pagination walk
///
/// The accumulated items are returned regardless of why the walk stopped;
/// `error` is set when it stopped early. There is no separate
/// partial-success signal, so callers must inspect both fields.
#[derive(Debug)]
pub struct Paginated<T> {
    /// Items accumulated in page order, then in-page order
    pub items: Vec<T>,
    /// The error that stopped the walk, if any
    pub error: Option<Error>,
}

impl<T> Paginated<T> {
    pub(crate) fn complete(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    pub(crate) fn aborted(items: Vec<T>, error: Error) -> Self {
        Self {
            items,
            error: Some(error),
        }
    }

    /// Whether the walk finished without an error
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Number of items accumulated
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was accumulated
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert into a plain `Result`, discarding partial items on error
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.items),
        }
    }
}
