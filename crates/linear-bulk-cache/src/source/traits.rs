//! List source trait definitions.

use async_trait::async_trait;
use linear_bulk_core::{Page, SourceError};

use crate::context::RequestContext;

/// A cursor-paginated list endpoint for records of type `T`.
///
/// One client usually implements this trait several times, once per record
/// type it can list.
///
/// # Example
///
/// ```ignore
/// use linear_bulk_cache::{PageSource, RequestContext};
/// use linear_bulk_core::{IssueLabel, Page, SourceError};
///
/// struct MyClient;
///
/// #[async_trait]
/// impl PageSource<IssueLabel> for MyClient {
///     async fn list_page(
///         &self,
///         ctx: &RequestContext,
///         cursor: Option<&str>,
///     ) -> Result<Page<IssueLabel>, SourceError> {
///         // Implementation here
///     }
/// }
/// ```
#[async_trait]
pub trait PageSource<T: Send>: Send + Sync {
    /// Fetches one page of records.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The caller's request context
    /// * `cursor` - Continuation cursor from the previous page; `None` starts from the beginning
    ///
    /// # Errors
    ///
    /// Any transport, protocol or decoding failure. The cache does not retry.
    async fn list_page(
        &self,
        ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<T>, SourceError>;
}

/// An unpaginated list endpoint that returns every record in one call.
///
/// Used for categories known to be small. Wrap in [`WholeList`](super::WholeList)
/// to feed it to the paginator.
#[async_trait]
pub trait ListSource<T: Send>: Send + Sync {
    /// Fetches every record.
    async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<T>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use linear_bulk_core::PageInfo;

    struct Numbers;

    #[async_trait]
    impl PageSource<u32> for Numbers {
        async fn list_page(
            &self,
            _ctx: &RequestContext,
            cursor: Option<&str>,
        ) -> Result<Page<u32>, SourceError> {
            match cursor {
                None => Ok(Page::new(vec![1, 2], PageInfo::more("2"))),
                Some("2") => Ok(Page::single(vec![3])),
                Some(other) => Err(SourceError::request(format!("unknown cursor {other}"))),
            }
        }
    }

    #[tokio::test]
    async fn test_page_source_follows_cursor() {
        let ctx = RequestContext::new();

        let first = Numbers.list_page(&ctx, None).await.unwrap();
        assert_eq!(first.nodes, vec![1, 2]);

        let cursor = first.page_info.next_cursor().unwrap();
        let second = Numbers.list_page(&ctx, cursor).await.unwrap();
        assert_eq!(second.nodes, vec![3]);
        assert!(!second.page_info.has_next_page);
    }

    #[tokio::test]
    async fn test_page_source_reports_errors() {
        let ctx = RequestContext::new();
        let result = Numbers.list_page(&ctx, Some("zz")).await;
        assert!(matches!(result, Err(SourceError::Request(_))));
    }
}
