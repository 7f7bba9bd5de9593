//! Reconciliation of divergent local and remote state copies.
//!
//! The progress-dominance rule: the remote copy fully replaces local
//! state iff it shows strictly more lifetime progress on either of two
//! signals -- `total_xp` or `stats.total_logged`. Otherwise local wins
//! and is the copy pushed back out. Deliberately coarse: no field-level
//! merge, so fine-grained progress on the losing side can be dropped.

use crate::progress::ProgressState;

/// Which copy of the state wins a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    UseLocal,
    UseRemote,
}

/// Apply the progress-dominance rule.
pub fn resolve(local: &ProgressState, remote: &ProgressState) -> MergeDecision {
    if remote.total_xp > local.total_xp
        || remote.stats.total_logged > local.stats.total_logged
    {
        MergeDecision::UseRemote
    } else {
        MergeDecision::UseLocal
    }
}
