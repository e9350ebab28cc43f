use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one in-flight fetch issued by a [`FetchGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Drops responses that arrive after their view moved on.
///
/// Each fetch takes a ticket; only the newest ticket may apply its result.
/// Starting a newer fetch or calling [`FetchGuard::cancel`] (view torn down)
/// invalidates every older ticket.
///
/// Owned by the front end, one guard per screen; the services themselves are
/// stateless and never hold a ticket.
#[derive(Debug, Default)]
pub struct FetchGuard {
    generation: AtomicU64,
}

impl FetchGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch, superseding all earlier ones.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns `value` only while `ticket` is still current.
    pub fn accept<T>(&self, ticket: FetchTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(?ticket, "discarding stale fetch result");
            None
        }
    }

    /// Run `fetch` under a fresh ticket; `None` if it was superseded meanwhile.
    pub async fn run<F>(&self, fetch: F) -> Option<F::Output>
    where
        F: Future,
    {
        let ticket = self.begin();
        let value = fetch.await;
        self.accept(ticket, value)
    }
}
