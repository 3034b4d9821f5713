use super::model::DraftRecord;
use crate::config::DraftConfig;
use crate::storage::KeyValueStorage;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

/// Best-effort durable persistence of one evolving piece of client state.
///
/// `DraftStore` is responsible for:
/// - Writing drafts immediately ([`save`](Self::save)) or after a quiet
///   period ([`save_debounced`](Self::save_debounced), trailing edge)
/// - Expiring drafts older than the retention window on read
/// - Reporting a coarse, human-readable draft age for recovery prompts
/// - Cancelling its pending debounce timer on teardown
///
/// Persistence is advisory, never load-bearing: every storage failure is
/// logged as a warning and degrades to a no-op or "no draft available".
/// Callers never see a storage error.
///
/// One store owns one storage key (`namespace + draft id`); stores with
/// distinct keys never interfere.
pub struct DraftStore<T, S> {
    storage: Arc<S>,
    key: String,
    config: DraftConfig,
    /// Pending debounced write, if any. Last-write-wins: scheduling a new
    /// write aborts the previous timer.
    pending: Mutex<Option<JoinHandle<()>>>,
    _payload: PhantomData<fn() -> T>,
}

impl<T, S> DraftStore<T, S>
where
    T: Serialize + DeserializeOwned + Send + 'static,
    S: KeyValueStorage + 'static,
{
    /// Creates a store for the draft identified by `draft_id`.
    ///
    /// # Arguments
    ///
    /// * `storage` - The storage substrate; shared across stores
    /// * `draft_id` - Caller-chosen identifier, appended to the configured
    ///   namespace to form the storage key
    /// * `config` - Debounce, retention, and namespace settings
    pub fn new(storage: Arc<S>, draft_id: &str, config: DraftConfig) -> Self {
        let key = format!("{}{}", config.namespace, draft_id);
        Self {
            storage,
            key,
            config,
            pending: Mutex::new(None),
            _payload: PhantomData,
        }
    }

    /// The full storage key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes `payload` immediately, stamped with the current time.
    ///
    /// Storage failures are logged and swallowed.
    pub fn save(&self, payload: T) {
        write_record(self.storage.as_ref(), &self.key, DraftRecord::new(payload));
    }

    /// Schedules a write of `payload` after the configured quiet period.
    ///
    /// Trailing-edge debounce: every call resets the pending timer, so
    /// only the last payload within a quiet window is ever written. The
    /// record's `last_modified` is stamped when the write fires.
    ///
    /// Must be called from within a tokio runtime.
    pub fn save_debounced(&self, payload: T) {
        let storage = Arc::clone(&self.storage);
        let key = self.key.clone();
        let delay = self.config.debounce();

        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            write_record(storage.as_ref(), &key, DraftRecord::new(payload));
        }));
    }

    /// Returns the stored draft, or `None` if absent, malformed, or
    /// expired.
    ///
    /// An expired record is deleted from storage before `None` is
    /// returned. Malformed data is treated as absent (warned, left in
    /// place); storage failures are treated as absent.
    pub fn load(&self) -> Option<DraftRecord<T>> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "draft storage read failed");
                return None;
            }
        };

        let record: DraftRecord<T> = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "malformed draft record");
                return None;
            }
        };

        if record.is_expired(Utc::now(), self.config.retention()) {
            tracing::debug!(key = %self.key, "purging expired draft");
            if let Err(error) = self.storage.remove(&self.key) {
                tracing::warn!(key = %self.key, %error, "failed to purge expired draft");
            }
            return None;
        }

        Some(record)
    }

    /// Whether a valid, unexpired draft exists.
    ///
    /// Carries the same purge side effect as [`load`](Self::load).
    pub fn has_draft(&self) -> bool {
        self.load().is_some()
    }

    /// Human-readable age of the stored draft ("just now", "2 hours
    /// ago"), or `None` when no valid draft exists.
    pub fn age_description(&self) -> Option<String> {
        self.load().map(|record| record.describe_age(Utc::now()))
    }

    /// Deletes the stored draft and drops any pending debounced write.
    ///
    /// Idempotent. The pending write is dropped so a queued timer cannot
    /// resurrect a draft the user just discarded.
    pub fn clear(&self) {
        if let Some(previous) = self.lock_pending().take() {
            previous.abort();
        }
        if let Err(error) = self.storage.remove(&self.key) {
            tracing::warn!(key = %self.key, %error, "failed to clear draft");
        }
    }
}

impl<T, S> DraftStore<T, S> {
    /// Cancels any pending debounced write without firing it.
    ///
    /// Intended for teardown of the owning scope; also runs on `Drop`.
    pub fn dispose(&self) {
        if let Some(previous) = self.lock_pending().take() {
            previous.abort();
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T, S> Drop for DraftStore<T, S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Serializes and writes one record, swallowing failures with a warning.
fn write_record<T, S>(storage: &S, key: &str, record: DraftRecord<T>)
where
    T: Serialize,
    S: KeyValueStorage + ?Sized,
{
    let json = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(error) => {
            tracing::warn!(key, %error, "failed to serialize draft");
            return;
        }
    };
    if let Err(error) = storage.set(key, &json) {
        tracing::warn!(key, %error, "draft storage write failed");
    }
}
