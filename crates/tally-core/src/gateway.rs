//! Persistence gateway: wraps every mutation of the progression state.
//!
//! The local write is synchronous and always happens; its failure is
//! fatal to the save. The remote write is asynchronous, debounced, and
//! best-effort. There is a single cooperative flow of control: the
//! state is never shared across threads, only across the suspend points
//! of the async remote calls.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::error::StorageError;
use crate::progress::{apply_rollover, DayKey, ProgressState};
use crate::storage::LocalStore;
use crate::sync::{resolve, DebouncedWrite, MergeDecision, RemoteStore, SyncStatus};

/// Owns the two stores and the debounced write slot.
pub struct ProgressGateway {
    local: LocalStore,
    remote: RemoteStore,
    debounce: DebouncedWrite,
    last_push_at: Option<DateTime<Utc>>,
}

impl ProgressGateway {
    pub fn new(local: LocalStore, remote: RemoteStore, debounce_window: Duration) -> Self {
        Self {
            local,
            remote,
            debounce: DebouncedWrite::new(debounce_window),
            last_push_at: None,
        }
    }

    /// Load the state for startup/resume: local copy (or defaults on
    /// first run), with the day rollover applied. If the rollover
    /// changed anything, the adjusted state is written back.
    pub fn load(&mut self, now: DateTime<Utc>) -> Result<ProgressState, StorageError> {
        let mut state = self.local.get()?.unwrap_or_default();
        let before = state.clone();
        apply_rollover(&mut state, DayKey::from_instant(now));
        if state != before {
            self.save(&state, now)?;
        }
        Ok(state)
    }

    /// Persist after a mutation. Local write first, errors propagating;
    /// then, if an identity exists, the same state is scheduled for a
    /// debounced remote put (cancel-and-replace, last write wins).
    pub fn save(&mut self, state: &ProgressState, now: DateTime<Utc>) -> Result<(), StorageError> {
        self.local.set(state)?;
        if self.remote.has_identity() {
            self.debounce.schedule(state.clone(), now);
        }
        Ok(())
    }

    /// Push the pending debounced write if its window has elapsed.
    /// Returns whether a push was attempted and succeeded.
    pub async fn flush_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.debounce.take_due(now) {
            Some(state) => self.push(&state).await,
            None => false,
        }
    }

    /// Push any pending write immediately (shutdown, explicit sync).
    pub async fn flush_now(&mut self) -> bool {
        match self.debounce.take_now() {
            Some(state) => self.push(&state).await,
            None => false,
        }
    }

    async fn push(&mut self, state: &ProgressState) -> bool {
        let ok = self.remote.put(state).await;
        if ok {
            self.last_push_at = Some(Utc::now());
        }
        ok
    }

    /// Reconcile local and remote copies when an identity becomes
    /// available. The winner is written to both stores. Returns which
    /// side won, or `UseLocal` when no remote document exists yet.
    pub async fn merge_on_sign_in(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<MergeDecision, StorageError> {
        // A write scheduled before sign-in holds pre-merge state; left
        // pending it would fire after resolution and overwrite the
        // winner on the remote.
        self.debounce.cancel();
        let local_state = self.local.get()?.unwrap_or_default();

        let decision = match self.remote.get().await {
            Some(remote_state) => {
                let decision = resolve(&local_state, &remote_state);
                if decision == MergeDecision::UseRemote {
                    debug!("remote copy dominates, replacing local state");
                    let mut adopted = remote_state;
                    apply_rollover(&mut adopted, DayKey::from_instant(now));
                    self.local.set(&adopted)?;
                    self.push(&adopted).await;
                    return Ok(MergeDecision::UseRemote);
                }
                decision
            }
            None => MergeDecision::UseLocal,
        };

        // Local kept: push it so the remote catches up.
        self.push(&local_state).await;
        Ok(decision)
    }

    /// User-initiated reset: the local document is cleared (errors
    /// propagate) and a best-effort remote delete is issued. A pending
    /// debounced write of the old state is cancelled.
    pub async fn reset(&mut self) -> Result<(), StorageError> {
        self.debounce.cancel();
        self.local.clear()?;
        let _ = self.remote.delete().await;
        Ok(())
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            last_push_at: self.last_push_at,
            pending: self.debounce.is_pending(),
            signed_in: self.remote.has_identity(),
        }
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }
}
