//! Remote mirroring layer: identity, the remote state resource, the
//! debounced write scheduler, and reconciliation of divergent copies.

pub mod debounce;
pub mod identity;
pub mod reconcile;
pub mod remote;

pub use debounce::DebouncedWrite;
pub use identity::{IdentityClient, KeyringTokens, StaticTokens, TokenProvider};
pub use reconcile::{resolve, MergeDecision};
pub use remote::RemoteStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current sync status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncStatus {
    /// Last successful remote push.
    pub last_push_at: Option<DateTime<Utc>>,
    /// Whether a debounced write is still pending.
    pub pending: bool,
    /// Whether an identity is established.
    pub signed_in: bool,
}
