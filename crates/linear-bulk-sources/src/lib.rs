//! GraphQL list sources for the Linear bulk cache.
//!
//! [`LinearClient`] speaks the Linear GraphQL API over HTTP and implements
//! the cache's [`PageSource`](linear_bulk_cache::PageSource) and
//! [`ListSource`](linear_bulk_cache::ListSource) traits for every category.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use linear_bulk_cache::{BulkCache, RequestContext};
//! use linear_bulk_sources::{LinearClient, LinearClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LinearClientConfig::builder().api_key("lin_api_xxx").build()?;
//! let cache = BulkCache::new(Arc::new(LinearClient::new(config)?));
//!
//! let team = cache.get_team_by_key(&RequestContext::new(), "ENG").await?;
//! println!("{} -> {}", team.key, team.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod queries;

pub use client::LinearClient;
pub use config::{LinearClientConfig, LinearClientConfigBuilder};
