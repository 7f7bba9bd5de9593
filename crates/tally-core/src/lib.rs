//! # Tally Core Library
//!
//! Core progression logic for the Tally habit tracker. All operations
//! are available through this library; the CLI binary is a thin layer
//! over it.
//!
//! ## Architecture
//!
//! - **Progress**: the pure rules engine. Logging intake, XP and
//!   levels, streaks, achievements and the calendar-day rollover, all
//!   driven by caller-supplied timestamps
//! - **Storage**: SQLite-backed local state document and TOML
//!   configuration
//! - **Sync**: best-effort remote mirror with a debounced write
//!   scheduler and progress-dominance reconciliation
//!
//! ## Key Components
//!
//! - [`ProgressState`]: the single durable state document
//! - [`log_intake`]: the one mutation entry point for intake events
//! - [`ProgressGateway`]: load/save orchestration across both stores
//! - [`Config`]: application configuration management

pub mod error;
pub mod gateway;
pub mod progress;
pub mod storage;
pub mod sync;

pub use error::{AuthError, ConfigError, CoreError, StorageError, ValidationError};
pub use gateway::ProgressGateway;
pub use progress::{
    apply_rollover, log_intake, ChangeSet, DayKey, LogEntry, ProgressState, Settings,
};
pub use storage::{Config, LocalStore};
pub use sync::{IdentityClient, MergeDecision, RemoteStore, SyncStatus};
