//! Sequential cursor traversal of a list endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use linear_bulk_core::SourceError;
use tracing::trace;

use crate::context::RequestContext;
use crate::source::PageSource;

/// Records collected by a full traversal, keyed by the caller's key function.
#[derive(Debug)]
pub struct Collected<T> {
    /// Every record seen, keyed by its lookup key.
    pub items: HashMap<String, Arc<T>>,
    /// Number of pages requested.
    pub pages: usize,
}

/// Walks every page of `source`, keying each record with `key_of`.
///
/// Pages are requested one at a time; the cursor for page `n + 1` is only
/// known once page `n` has returned. A key seen on a later page replaces the
/// record stored for it earlier. `on_page` runs once per request sent,
/// including a request that fails.
///
/// # Errors
///
/// Stops at the first failing page and returns its error. Records gathered
/// from earlier pages are discarded with the partial map.
pub async fn paginate<T, S, F>(
    source: &S,
    ctx: &RequestContext,
    key_of: fn(&T) -> &str,
    mut on_page: F,
) -> Result<Collected<T>, SourceError>
where
    T: Send + Sync,
    S: PageSource<T> + ?Sized,
    F: FnMut(),
{
    let mut items = HashMap::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;

    loop {
        let page = ctx.run(source.list_page(ctx, cursor.as_deref())).await;
        pages += 1;
        on_page();
        let page = page?;

        let next = page.page_info.next_cursor()?.map(str::to_owned);
        for node in page.nodes {
            items.insert(key_of(&node).to_owned(), Arc::new(node));
        }

        trace!(page = pages, collected = items.len(), "list page merged");

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(Collected { items, pages })
}
