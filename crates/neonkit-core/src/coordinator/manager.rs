use super::outcome::Outcome;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Bookkeeping for one active operation under a key.
struct InFlight {
    generation: u64,
    token: CancellationToken,
}

/// Runs at most one asynchronous operation per logical key, cancelling
/// superseded ones and discarding their results.
///
/// `RequestCoordinator` is responsible for:
/// - Minting a monotonically increasing generation for every request
/// - Cancelling the previous in-flight operation when a key is reused
/// - Delivering a settled result only if it still belongs to the latest
///   generation recorded for its key
/// - Tearing down every in-flight operation at once via
///   [`cancel_all`](Self::cancel_all)
///
/// Cancellation is cooperative: the operation receives a
/// [`CancellationToken`] and is expected to observe it. An operation that
/// ignores its token is abandoned anyway; its caller resolves to
/// [`Outcome::Cancelled`] as soon as the token fires, and a result that
/// settles after supersession is silently dropped by the generation check.
///
/// Coordinators are expected to be scoped one per consumer (e.g. one per
/// UI surface), each with its own independent key namespace.
#[derive(Default)]
pub struct RequestCoordinator {
    /// At most one entry per key at any instant.
    slots: Mutex<HashMap<String, InFlight>>,
    /// Source of generation tokens; strictly increasing across all keys.
    next_generation: AtomicU64,
}

impl RequestCoordinator {
    /// Creates a coordinator with no in-flight operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `operation` as the sole active request for `key`.
    ///
    /// Any previous in-flight operation under the same key is cancelled
    /// and replaced before `operation` starts; the generation bump and the
    /// record swap happen under one lock, so no observer ever sees two
    /// active records for a key.
    ///
    /// # Arguments
    ///
    /// * `key` - Non-empty logical slot name (e.g. `"products-search"`)
    /// * `operation` - Called once with a cancellation token; long-running
    ///   work (typically an HTTP call) should observe the token
    ///
    /// # Returns
    ///
    /// - `Ok(Outcome::Completed(value))`: The operation settled while
    ///   still current
    /// - `Ok(Outcome::Cancelled)`: Explicitly cancelled, superseded, or
    ///   the operation rejected after its token fired
    /// - `Err(error)`: The operation genuinely failed while still current;
    ///   delivered exactly once, never retried
    pub async fn request<T, E, F, Fut>(&self, key: &str, operation: F) -> Result<Outcome<T>, E>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        debug_assert!(!key.is_empty(), "operation key must be non-empty");

        let token = CancellationToken::new();

        // Mint and insert under one lock: concurrent callers on a
        // multi-thread runtime must observe slot generations in mint
        // order, or an older generation could win the insert race and
        // deliver.
        let generation;
        {
            let mut slots = self.lock_slots();
            generation = self.mint_generation();
            let superseded = slots.insert(
                key.to_string(),
                InFlight {
                    generation,
                    token: token.clone(),
                },
            );
            if let Some(previous) = superseded {
                previous.token.cancel();
                tracing::debug!(
                    key,
                    old_generation = previous.generation,
                    new_generation = generation,
                    "superseded in-flight request"
                );
            }
        }

        // Race the operation against its own token so an operation that
        // ignores the signal still releases its caller promptly.
        let settled = tokio::select! {
            result = operation(token.clone()) => Some(result),
            _ = token.cancelled() => None,
        };

        {
            let mut slots = self.lock_slots();
            let still_current = slots
                .get(key)
                .is_some_and(|slot| slot.generation == generation);
            if !still_current {
                // A newer request replaced us, or cancel() cleared the
                // slot. Whatever settled here is stale and must not reach
                // the caller.
                return Ok(Outcome::Cancelled);
            }
            // Still the authoritative generation: retire the record and
            // deliver.
            slots.remove(key);
        }

        match settled {
            None => Ok(Outcome::Cancelled),
            Some(Ok(value)) => Ok(Outcome::Completed(value)),
            // A rejection raised while the token is cancelled is
            // cancellation-kind, not a failure.
            Some(Err(_)) if token.is_cancelled() => Ok(Outcome::Cancelled),
            Some(Err(error)) => Err(error),
        }
    }

    /// Cancels and clears the in-flight operation for one key.
    ///
    /// Idempotent no-op when nothing is in flight for `key`.
    pub fn cancel(&self, key: &str) {
        let removed = self.lock_slots().remove(key);
        if let Some(slot) = removed {
            slot.token.cancel();
            tracing::debug!(key, generation = slot.generation, "cancelled request");
        }
    }

    /// Cancels and clears every in-flight operation.
    ///
    /// Intended for teardown; safe to call any number of times, including
    /// when nothing is in flight.
    pub fn cancel_all(&self) {
        let drained: Vec<(String, InFlight)> = self.lock_slots().drain().collect();
        for (key, slot) in drained {
            slot.token.cancel();
            tracing::debug!(key, generation = slot.generation, "cancelled request");
        }
    }

    /// Whether an operation is currently in flight for `key`.
    pub fn in_flight(&self, key: &str) -> bool {
        self.lock_slots().contains_key(key)
    }

    /// Number of keys with an in-flight operation.
    pub fn in_flight_count(&self) -> usize {
        self.lock_slots().len()
    }

    /// Mints the next generation token; strictly increasing, starting at 1.
    fn mint_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// All mutation of per-key state happens synchronously under this
    /// lock; it is never held across an await point.
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, InFlight>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for RequestCoordinator {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
