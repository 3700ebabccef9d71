//! # Linear Bulk Cache
//!
//! Lazy, memoized bulk-fetch cache for cursor-paginated list APIs.
//!
//! The first lookup in a category (labels, workflow states, templates, teams)
//! walks the whole list endpoint once and keeps the result for the rest of
//! the process. Every later lookup in that category is served from memory.
//!
//! ## Features
//!
//! - Exactly one populate routine per category, even under concurrent first use
//! - Sticky failures: a category that failed to populate stays failed
//! - Async trait-based list source abstraction
//! - Per-category hit, miss and fetch metrics
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use linear_bulk_cache::{BulkCache, RequestContext};
//!
//! let cache = BulkCache::new(Arc::new(client));
//! let ctx = RequestContext::new();
//!
//! let team = cache.get_team_by_key(&ctx, "ENG").await?;
//! let states = cache.workflow_states_for_team(&ctx, &team.id).await?;
//! ```

pub mod bulk;
pub mod category;
pub mod context;
pub mod gate;
pub mod metrics;
pub mod paginate;
pub mod source;

// Re-exports
pub use bulk::{BulkCache, LinearApi, WarmReport};
pub use category::KeyedCategory;
pub use context::RequestContext;
pub use gate::{CategoryState, FetchOnce};
pub use metrics::{CacheMetrics, CategoryStats, register_cache_metrics};
pub use paginate::{Collected, paginate};
pub use source::{ListSource, PageSource, WholeList};

// Re-export linear_bulk_core for consumers
pub use linear_bulk_core;
