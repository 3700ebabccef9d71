//! Observable state of a category cache.

use std::fmt;

use linear_bulk_core::BulkCacheError;

/// Snapshot of where a category is in its fetch-once lifecycle.
///
/// Reading the state never triggers a fetch.
#[derive(Debug, Clone)]
pub enum CategoryState {
    /// No lookup has touched the category yet.
    Unpopulated,
    /// A populate routine is in flight.
    Populating,
    /// The category was fetched successfully.
    Populated {
        /// Number of cached records.
        items: usize,
    },
    /// The populate routine failed; every lookup returns this error.
    Failed {
        /// The sticky error.
        error: BulkCacheError,
    },
}

impl CategoryState {
    /// Returns true once the category can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Populated { .. } | Self::Failed { .. })
    }

    /// Returns true if the category holds a successfully fetched mapping.
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated { .. })
    }

    /// Returns the sticky error, if the category failed.
    pub fn error(&self) -> Option<&BulkCacheError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpopulated => f.write_str("unpopulated"),
            Self::Populating => f.write_str("populating"),
            Self::Populated { items } => write!(f, "populated ({items} items)"),
            Self::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linear_bulk_core::{Category, SourceError};

    #[test]
    fn test_terminal_states() {
        assert!(!CategoryState::Unpopulated.is_terminal());
        assert!(!CategoryState::Populating.is_terminal());
        assert!(CategoryState::Populated { items: 0 }.is_terminal());

        let failed = CategoryState::Failed {
            error: BulkCacheError::transport(Category::Labels, SourceError::Cancelled),
        };
        assert!(failed.is_terminal());
        assert!(!failed.is_populated());
        assert!(failed.error().is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(CategoryState::Unpopulated.to_string(), "unpopulated");
        assert_eq!(
            CategoryState::Populated { items: 3 }.to_string(),
            "populated (3 items)"
        );
    }
}
