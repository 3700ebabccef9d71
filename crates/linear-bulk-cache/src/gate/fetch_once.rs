//! Run-exactly-once gate around a category's populate routine.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use linear_bulk_core::{BulkCacheError, Category, SourceError};
use tokio::sync::watch;

type Outcome<V> = Result<Arc<V>, BulkCacheError>;

/// Single-assignment gate holding the terminal outcome of one populate run.
///
/// The gate moves through `Unpopulated -> Populating -> Populated | Failed`
/// exactly once:
///
/// - the first caller claims the gate and runs the populate routine;
/// - callers arriving while it runs wait on a watch channel;
/// - once the outcome is stored, every caller returns a clone of it without
///   taking a lock.
///
/// If the claiming future is dropped or panics before the routine finishes,
/// the gate settles as failed with [`SourceError::Cancelled`]. It is never
/// re-armed.
pub struct FetchOnce<V> {
    claimed: AtomicBool,
    outcome: OnceLock<Outcome<V>>,
    settled: watch::Sender<bool>,
}

impl<V> FetchOnce<V> {
    /// Creates an unpopulated gate.
    pub fn new() -> Self {
        let (settled, _) = watch::channel(false);
        Self {
            claimed: AtomicBool::new(false),
            outcome: OnceLock::new(),
            settled,
        }
    }

    /// Returns the stored outcome, running `populate` if no caller has yet.
    ///
    /// Concurrent callers never run `populate` themselves; they wait for the
    /// claiming caller and then share its outcome.
    pub async fn get_or_populate<F, Fut>(&self, category: Category, populate: F) -> Outcome<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, SourceError>>,
    {
        if let Some(outcome) = self.outcome.get() {
            return outcome.clone();
        }

        let won = self
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        if !won {
            return self.wait(category).await;
        }

        let guard = SettleGuard {
            gate: self,
            category,
            armed: true,
        };

        let outcome = populate()
            .await
            .map(Arc::new)
            .map_err(|e| BulkCacheError::transport(category, e));

        guard.settle(outcome)
    }

    /// Returns the terminal outcome if the gate has fired.
    pub fn peek(&self) -> Option<&Outcome<V>> {
        self.outcome.get()
    }

    /// Returns true once some caller has started the populate routine.
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }

    async fn wait(&self, category: Category) -> Outcome<V> {
        let mut rx = self.settled.subscribe();
        // The sender lives as long as `self`, so this only fails if the gate is torn down.
        let _ = rx.wait_for(|settled| *settled).await;

        match self.outcome.get() {
            Some(outcome) => outcome.clone(),
            None => Err(BulkCacheError::transport(category, SourceError::Cancelled)),
        }
    }

    /// Stores the outcome unless one is already set, then wakes waiters.
    ///
    /// Returns the outcome the gate holds, which is the first one stored.
    fn store(&self, outcome: Outcome<V>) -> &Outcome<V> {
        let stored = self.outcome.get_or_init(|| outcome);
        self.settled.send_replace(true);
        stored
    }

    fn settle(&self, outcome: Outcome<V>) -> Outcome<V> {
        self.store(outcome).clone()
    }
}

impl<V> Default for FetchOnce<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for FetchOnce<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchOnce")
            .field("claimed", &self.is_claimed())
            .field("settled", &self.outcome.get().is_some())
            .finish()
    }
}

/// Settles the gate as cancelled if the populate routine never completes.
struct SettleGuard<'a, V> {
    gate: &'a FetchOnce<V>,
    category: Category,
    armed: bool,
}

impl<V> SettleGuard<'_, V> {
    fn settle(mut self, outcome: Outcome<V>) -> Outcome<V> {
        self.armed = false;
        self.gate.settle(outcome)
    }
}

impl<V> Drop for SettleGuard<'_, V> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(category = %self.category, "bulk fetch abandoned before completion");
            self.gate.store(Err(BulkCacheError::transport(
                self.category,
                SourceError::Cancelled,
            )));
        }
    }
}
