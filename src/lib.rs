//! # pagekit
//!
//! A minimal, Rust-native pagination driver for paged APIs.
//!
//! Given a paged data source, a per-item processing step, and a rate-limit
//! gate, [`paginate()`] walks all pages, invokes processing on each item, and
//! returns the accumulated items together with the first error encountered.
//! "How to fetch one page" and "what to do with one item" stay out of the
//! loop; they are injected as capabilities.
//!
//! ## Features
//!
//! - **Capability injection**: [`Lister`], [`Processor`], and [`RateLimiter`]
//!   are independent single-method traits, implementable as plain structs or
//!   supplied as closures via the `*With` adapters
//! - **Partial results on every path**: the accumulated items come back
//!   whether the walk finished, was stopped by the rate gate, errored, or
//!   was cancelled
//! - **Cancellation aware**: a `CancellationToken` is checked before each
//!   fetch and threaded through every capability call
//! - **Ready-made gates**: budget-floor and token-bucket gates in
//!   [`gates`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagekit::gates::BudgetGate;
//! use pagekit::{paginate, PaginatorOpts};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cancel = CancellationToken::new();
//!     let mut source = repos_client();      // impl Lister
//!     let mut store = warehouse_writer();   // impl Processor
//!     let mut gate = BudgetGate::new(50);
//!
//!     let walk = paginate(&cancel, &mut source, &mut store, &mut gate, None).await;
//!     println!("synced {} repos", walk.len());
//!     if let Some(err) = walk.error {
//!         eprintln!("stopped early: {err}");
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     paginate(cancel, …)                     │
//! │  normalize opts → fetch page → process items → consult gate │
//! │  → advance to source-reported next page → repeat            │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴───────────┬───────────────────┐
//! │    Lister     │        Processor        │    RateLimiter    │
//! ├───────────────┼─────────────────────────┼───────────────────┤
//! │ one page +    │ one item at a time,     │ Unlimited         │
//! │ continuation  │ in page order           │ BudgetGate        │
//! │ metadata      │                         │ ThrottleGate      │
//! └───────────────┴─────────────────────────┴───────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Shared data model (page requests, page context, rate snapshots)
pub mod types;

/// The pagination driver and its capability traits
pub mod paginate;

/// Ready-made rate-limit gates
pub mod gates;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{PageContext, PageRequest, RateSnapshot, DEFAULT_PER_PAGE};

pub use paginate::{
    page_request, paginate, ListWith, Lister, Paginated, PaginatorOpts, ProcessWith, Processor,
    RateLimitWith, RateLimiter,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
