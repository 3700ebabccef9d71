//! Cursor-paginated page envelopes.

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Continuation metadata for one page of a list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether the server has more records after this page.
    pub has_next_page: bool,
    /// Cursor of the last record on this page, if any.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Page info for the final page of a traversal.
    pub fn last() -> Self {
        Self::default()
    }

    /// Page info announcing a further page after `cursor`.
    pub fn more(cursor: impl Into<String>) -> Self {
        Self {
            has_next_page: true,
            end_cursor: Some(cursor.into()),
        }
    }

    /// Returns the cursor to request next, or `None` when the traversal is done.
    ///
    /// # Errors
    ///
    /// A page that claims more results but carries no cursor cannot be
    /// continued; this is reported as a decode error rather than silently
    /// truncating the listing.
    pub fn next_cursor(&self) -> Result<Option<&str>, SourceError> {
        if !self.has_next_page {
            return Ok(None);
        }
        self.end_cursor
            .as_deref()
            .map(Some)
            .ok_or_else(|| SourceError::decode("page reports more results but has no end cursor"))
    }
}

/// One page of records returned by a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page.
    pub nodes: Vec<T>,
    /// Continuation metadata.
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a page from its records and continuation metadata.
    pub fn new(nodes: Vec<T>, page_info: PageInfo) -> Self {
        Self { nodes, page_info }
    }

    /// Creates a final page holding every record of an unpaginated list.
    pub fn single(nodes: Vec<T>) -> Self {
        Self::new(nodes, PageInfo::last())
    }

    /// Returns the number of records on this page.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
