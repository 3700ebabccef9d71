//! Lazily populated, keyed cache for one resource category.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use linear_bulk_core::{BulkCacheError, Category, Result, SourceError};
use tracing::{debug, warn};

use crate::context::RequestContext;
use crate::gate::{CategoryState, FetchOnce};
use crate::metrics::CacheMetrics;
use crate::paginate::paginate;
use crate::source::PageSource;

type Mapping<T> = HashMap<String, Arc<T>>;

/// Cache for every record of one category, fetched on first use.
///
/// Parameterized by the record type and the function that extracts its
/// lookup key. The page source is supplied per call so the cache does not
/// own the client.
pub struct KeyedCategory<T> {
    category: Category,
    key_of: fn(&T) -> &str,
    gate: FetchOnce<Mapping<T>>,
    metrics: CacheMetrics,
}

impl<T> KeyedCategory<T>
where
    T: Send + Sync + 'static,
{
    /// Creates an unpopulated category cache.
    pub fn new(category: Category, key_of: fn(&T) -> &str, metrics: CacheMetrics) -> Self {
        Self {
            category,
            key_of,
            gate: FetchOnce::new(),
            metrics,
        }
    }

    /// Returns the category this cache serves.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Populates the category on first call and returns the full mapping.
    ///
    /// # Errors
    ///
    /// The sticky transport error if the category failed to populate, now
    /// or on an earlier call.
    pub async fn ensure_populated<S>(
        &self,
        ctx: &RequestContext,
        source: &S,
    ) -> Result<Arc<Mapping<T>>>
    where
        S: PageSource<T> + ?Sized,
    {
        let outcome = self
            .gate
            .get_or_populate(self.category, || self.populate(ctx, source))
            .await;

        if outcome.is_err() {
            self.metrics.record_failure(self.category);
        }
        outcome
    }

    async fn populate<S>(
        &self,
        ctx: &RequestContext,
        source: &S,
    ) -> std::result::Result<Mapping<T>, SourceError>
    where
        S: PageSource<T> + ?Sized,
    {
        debug!("bulk fetching all {}", self.category);
        self.metrics.record_fetch(self.category);
        let started = Instant::now();

        let walked = paginate(source, ctx, self.key_of, || {
            self.metrics.record_pages(self.category, 1)
        })
        .await;

        match walked {
            Ok(collected) => {
                self.metrics
                    .record_fetch_duration(self.category, started.elapsed());
                debug!("bulk fetched {} {}", collected.items.len(), self.category);
                Ok(collected.items)
            },
            Err(e) => {
                warn!(category = %self.category, error = %e, "bulk fetch failed");
                Err(e)
            },
        }
    }

    /// Looks up one record by its key.
    ///
    /// # Errors
    ///
    /// - `BulkCacheError::Transport` if the category failed to populate
    /// - `BulkCacheError::NotFound` if the key is absent
    pub async fn get<S>(&self, ctx: &RequestContext, source: &S, key: &str) -> Result<Arc<T>>
    where
        S: PageSource<T> + ?Sized,
    {
        let items = self.ensure_populated(ctx, source).await?;

        match items.get(key) {
            Some(item) => {
                self.metrics.record_hit(self.category);
                Ok(Arc::clone(item))
            },
            None => {
                self.metrics.record_miss(self.category);
                Err(BulkCacheError::not_found(self.category, key))
            },
        }
    }

    /// Returns every record matching `predicate`, in no particular order.
    ///
    /// An empty result is not an error.
    pub async fn filter<S, P>(
        &self,
        ctx: &RequestContext,
        source: &S,
        predicate: P,
    ) -> Result<Vec<Arc<T>>>
    where
        S: PageSource<T> + ?Sized,
        P: Fn(&T) -> bool,
    {
        let items = self.ensure_populated(ctx, source).await?;
        let matched: Vec<_> = items
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect();

        if matched.is_empty() {
            self.metrics.record_miss(self.category);
        } else {
            self.metrics.record_hit(self.category);
        }
        Ok(matched)
    }

    /// Returns the current lifecycle state without triggering a fetch.
    pub fn state(&self) -> CategoryState {
        match self.gate.peek() {
            Some(Ok(items)) => CategoryState::Populated { items: items.len() },
            Some(Err(error)) => CategoryState::Failed {
                error: error.clone(),
            },
            None if self.gate.is_claimed() => CategoryState::Populating,
            None => CategoryState::Unpopulated,
        }
    }
}

impl<T> std::fmt::Debug for KeyedCategory<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedCategory")
            .field("category", &self.category)
            .field("gate", &self.gate)
            .finish()
    }
}
