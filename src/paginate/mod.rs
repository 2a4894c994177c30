//! Pagination driver
//!
//! The core walk loop over a paged source.
//!
//! # Overview
//!
//! [`paginate`] decouples "how to fetch one page" ([`Lister`]) and "what to
//! do with one item" ([`Processor`]) from "how to walk all pages while
//! respecting a rate budget and cancellation" ([`RateLimiter`] plus a
//! [`CancellationToken`]). The loop is strictly sequential: one page at a
//! time, items in order, no concurrent fetches. The items accumulated so
//! far are returned no matter what stops the walk, whether that is
//! exhaustion, a gate decision, an error, or cancellation.

mod types;

pub use types::{
    page_request, ListWith, Lister, Paginated, PaginatorOpts, ProcessWith, Processor,
    RateLimitWith, RateLimiter,
};

use crate::error::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Walk every page of a source, processing each item in order
///
/// Normalizes `opts` once, then loops: fetch a page, process its items,
/// consult the rate gate, and advance to whatever page the source says comes
/// next. Stops on the first error from any capability, on a `false` gate
/// decision, on continuation exhaustion, on cancellation, or when the
/// optional `max_pages` cap trips.
///
/// Failure semantics, per origin:
/// - Lister error: nothing from the failed page is kept.
/// - Processor error: items of the current page processed strictly before
///   the failing one are kept; the rest of the page is not processed.
/// - Gate error or stop: the current page's items are kept, since they were
///   already fully processed.
/// - Cancellation is checked before each fetch and surfaced as
///   [`Error::Cancelled`]; the token is also passed into every capability
///   call so in-flight work can observe it.
///
/// No retries happen here; retry policy belongs to the injected capabilities.
pub async fn paginate<L, P, R>(
    cancel: &CancellationToken,
    lister: &mut L,
    processor: &mut P,
    limiter: &mut R,
    opts: Option<&PaginatorOpts>,
) -> Paginated<L::Item>
where
    L: Lister,
    P: Processor<L::Item>,
    R: RateLimiter,
{
    let mut request = page_request(opts);
    let max_pages = opts.map_or(0, |o| o.max_pages);

    let mut items = Vec::new();
    let mut pages_walked: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Paginated::aborted(items, Error::Cancelled);
        }

        let (mut page_items, context) = match lister.list(cancel, &request).await {
            Ok(page) => page,
            Err(err) => return Paginated::aborted(items, err),
        };
        debug!(page = request.page, count = page_items.len(), "fetched page");

        let mut failure = None;
        for (idx, item) in page_items.iter().enumerate() {
            if let Err(err) = processor.process(cancel, item).await {
                failure = Some((idx, err));
                break;
            }
        }
        if let Some((idx, err)) = failure {
            // keep only the items processed before the failing one
            page_items.truncate(idx);
            items.extend(page_items);
            return Paginated::aborted(items, err);
        }
        items.extend(page_items);
        pages_walked += 1;

        match limiter.rate_limit(cancel, &context).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(page = request.page, "rate gate stopped pagination");
                return Paginated::complete(items);
            }
            Err(err) => return Paginated::aborted(items, err),
        }

        if !context.has_next() {
            return Paginated::complete(items);
        }

        if max_pages > 0 && pages_walked >= max_pages {
            warn!(max_pages, "page cap reached, stopping pagination early");
            return Paginated::complete(items);
        }

        // the source is authoritative about what page comes next
        request.page = context.next_page;
    }
}
