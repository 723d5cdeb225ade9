//! "Latest request wins" guard for interactive availability queries.
//!
//! A customer can change the selected barber or date before the previous slot query
//! returns. Each query takes a [`Ticket`] for its parameters when it starts; when it
//! finishes, its result is only applied if no newer query has started since.

use std::fmt::Debug;
use tokio::sync::RwLock;
use tracing::debug;

/// Parameters of a slot query as seen by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotQuery {
    pub barber_id: i64,
    pub date: chrono::NaiveDate,
}

/// Proof that a query was started, carrying its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    generation: u64,
    key: K,
}

impl<K> Ticket<K> {
    /// The parameters this ticket was issued for.
    pub const fn key(&self) -> &K {
        &self.key
    }
}

#[derive(Debug)]
struct Selection<K> {
    generation: u64,
    key: Option<K>,
}

/// Tracks the most recent query and rejects results from superseded ones.
#[derive(Debug)]
pub struct LatestRequest<K> {
    current: RwLock<Selection<K>>,
}

impl<K> Default for LatestRequest<K> {
    fn default() -> Self {
        Self {
            current: RwLock::new(Selection {
                generation: 0,
                key: None,
            }),
        }
    }
}

impl<K> LatestRequest<K>
where
    K: Clone + PartialEq + Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` as the current selection and returns its ticket.
    pub async fn begin(&self, key: K) -> Ticket<K> {
        let mut current = self.current.write().await;
        current.generation += 1;
        current.key = Some(key.clone());
        Ticket {
            generation: current.generation,
            key,
        }
    }

    /// Whether `ticket` still belongs to the newest query.
    pub async fn is_current(&self, ticket: &Ticket<K>) -> bool {
        let current = self.current.read().await;
        current.generation == ticket.generation && current.key.as_ref() == Some(&ticket.key)
    }

    /// Returns `value` if `ticket` is still current, otherwise drops it.
    pub async fn accept<T>(&self, ticket: &Ticket<K>, value: T) -> Option<T> {
        if self.is_current(ticket).await {
            Some(value)
        } else {
            debug!(key = ?ticket.key, "Discarding result of superseded query");
            None
        }
    }

    /// Starts a query for `key`, awaits it and keeps the result only if it is
    /// still the newest one when it completes.
    pub async fn run<F, T>(&self, key: K, query: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin(key).await;
        let value = query.await;
        self.accept(&ticket, value).await
    }

    /// The parameters of the newest query, if any has started.
    pub async fn current_key(&self) -> Option<K> {
        self.current.read().await.key.clone()
    }
}
