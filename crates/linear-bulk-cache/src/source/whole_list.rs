//! Adapter presenting an unpaginated list as a single final page.

use async_trait::async_trait;
use linear_bulk_core::{Page, SourceError};

use super::{ListSource, PageSource};
use crate::context::RequestContext;

/// Borrows a [`ListSource`] and exposes it as a one-page [`PageSource`].
pub struct WholeList<'a, S: ?Sized>(pub &'a S);

#[async_trait]
impl<'a, T, S> PageSource<T> for WholeList<'a, S>
where
    T: Send + 'static,
    S: ListSource<T> + ?Sized,
{
    async fn list_page(
        &self,
        ctx: &RequestContext,
        _cursor: Option<&str>,
    ) -> Result<Page<T>, SourceError> {
        let nodes = self.0.list_all(ctx).await?;
        Ok(Page::single(nodes))
    }
}
