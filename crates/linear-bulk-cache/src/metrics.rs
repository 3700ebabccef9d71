//! Bulk cache metrics recording.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use linear_bulk_core::Category;
use metrics::{counter, histogram};

/// Registers metric descriptions with the installed recorder.
/// Call once at startup.
pub fn register_cache_metrics() {
    metrics::describe_counter!(
        "linear_bulk_fetches_total",
        "Total number of bulk fetches started, per category"
    );
    metrics::describe_counter!(
        "linear_bulk_pages_total",
        "Total number of list pages fetched, per category"
    );
    metrics::describe_counter!(
        "linear_bulk_lookups_total",
        "Total number of cache lookups, per category and outcome"
    );
    metrics::describe_histogram!(
        "linear_bulk_fetch_seconds",
        "Time spent walking a category's list endpoint"
    );
}

#[derive(Debug, Default)]
struct Counters {
    fetches: AtomicU64,
    pages: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time counters for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    /// Populate routines started.
    pub fetches: u64,
    /// List pages fetched.
    pub pages: u64,
    /// Lookups answered with a record.
    pub hits: u64,
    /// Lookups for a key the category does not hold.
    pub misses: u64,
    /// Lookups answered with the category's sticky error.
    pub failures: u64,
}

/// Per-category metrics recorder.
///
/// Emits through the `metrics` facade and keeps atomic counters so callers
/// can inspect a cache without an exporter installed. Clones share counters.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    counters: Arc<[Counters; 4]>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, category: Category) -> &Counters {
        let index = match category {
            Category::Labels => 0,
            Category::WorkflowStates => 1,
            Category::Templates => 2,
            Category::Teams => 3,
        };
        &self.counters[index]
    }

    /// Records the start of a populate routine.
    pub fn record_fetch(&self, category: Category) {
        self.slot(category).fetches.fetch_add(1, Ordering::Relaxed);
        counter!("linear_bulk_fetches_total", "category" => category.metric_label()).increment(1);
    }

    /// Records the pages walked by a finished populate routine.
    pub fn record_pages(&self, category: Category, pages: usize) {
        let pages = pages as u64;
        self.slot(category).pages.fetch_add(pages, Ordering::Relaxed);
        counter!("linear_bulk_pages_total", "category" => category.metric_label()).increment(pages);
    }

    /// Records how long a populate routine took.
    pub fn record_fetch_duration(&self, category: Category, duration: Duration) {
        histogram!("linear_bulk_fetch_seconds", "category" => category.metric_label())
            .record(duration.as_secs_f64());
    }

    /// Records a lookup answered from the cache.
    pub fn record_hit(&self, category: Category) {
        self.slot(category).hits.fetch_add(1, Ordering::Relaxed);
        self.record_lookup(category, "hit");
    }

    /// Records a lookup for an absent key.
    pub fn record_miss(&self, category: Category) {
        self.slot(category).misses.fetch_add(1, Ordering::Relaxed);
        self.record_lookup(category, "miss");
    }

    /// Records a lookup answered with the sticky error.
    pub fn record_failure(&self, category: Category) {
        self.slot(category).failures.fetch_add(1, Ordering::Relaxed);
        self.record_lookup(category, "error");
    }

    fn record_lookup(&self, category: Category, outcome: &'static str) {
        counter!(
            "linear_bulk_lookups_total",
            "category" => category.metric_label(),
            "outcome" => outcome
        )
        .increment(1);
    }

    /// Returns the counters for one category.
    pub fn stats(&self, category: Category) -> CategoryStats {
        let slot = self.slot(category);
        CategoryStats {
            fetches: slot.fetches.load(Ordering::Relaxed),
            pages: slot.pages.load(Ordering::Relaxed),
            hits: slot.hits.load(Ordering::Relaxed),
            misses: slot.misses.load(Ordering::Relaxed),
            failures: slot.failures.load(Ordering::Relaxed),
        }
    }

    /// Returns the share of lookups answered with a record, across all categories.
    pub fn hit_rate(&self) -> f64 {
        let (hits, total) = Category::ALL.iter().fold((0u64, 0u64), |(h, t), c| {
            let s = self.stats(*c);
            (h + s.hits, t + s.hits + s.misses + s.failures)
        });
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
