//! Linear Bulk Core - Domain types and errors
//!
//! This crate provides the records, page envelopes and error hierarchy shared
//! by the bulk cache and its remote sources.

pub mod category;
pub mod error;
pub mod page;
pub mod records;

pub use category::Category;
pub use error::{BulkCacheError, Result, SourceError};
pub use page::{Page, PageInfo};
pub use records::{IssueLabel, LabelRef, Team, TeamRef, Template, WorkflowState};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
