//! Caller-supplied request context.

use std::future::Future;
use std::time::Duration;

use linear_bulk_core::SourceError;
use tracing::{Instrument, Span};

/// Context threaded through every remote call made on a caller's behalf.
///
/// It carries the caller's tracing span, so remote calls show up under the
/// operation that triggered them, and an optional per-request deadline.
/// It has no cache semantics of its own.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use linear_bulk_cache::RequestContext;
///
/// let ctx = RequestContext::new().with_timeout(Duration::from_secs(10));
/// assert_eq!(ctx.timeout(), Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    span: Span,
    timeout: Option<Duration>,
}

impl RequestContext {
    /// Creates a context bound to the current tracing span, with no deadline.
    pub fn new() -> Self {
        Self {
            span: Span::current(),
            timeout: None,
        }
    }

    /// Sets the deadline applied to each remote request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the span remote calls are recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the span remote calls are recorded under.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Returns the per-request deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Runs one remote call inside this context.
    ///
    /// The call is instrumented with the context span and, when a deadline
    /// is set, aborted with [`SourceError::Timeout`] once it elapses.
    pub async fn run<F, T>(&self, call: F) -> Result<T, SourceError>
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        let call = call.instrument(self.span.clone());

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| SourceError::Timeout {
                    seconds: limit.as_secs(),
                })?,
            None => call.await,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
