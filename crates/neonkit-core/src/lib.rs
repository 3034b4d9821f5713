//! Core client-side coordination layer for King Neon.
//!
//! Two cooperating utilities built around the same pattern: idempotent,
//! restartable, last-writer-wins coordination over an unreliable
//! asynchronous or persistent channel.
//!
//! - [`coordinator::RequestCoordinator`] runs at most one asynchronous
//!   operation per logical key, cancels superseded ones, and never
//!   delivers a stale result.
//! - [`draft::DraftStore`] persists in-progress user input with debounced
//!   writes, a seven-day expiration window, and recovery metadata.
//!
//! The two are independent and share no state. Storage backends live in
//! `neonkit-infrastructure`; this crate only defines the
//! [`storage::KeyValueStorage`] substrate they plug into.

pub mod config;
pub mod coordinator;
pub mod draft;
pub mod error;
pub mod storage;
pub mod teardown;

pub use config::{DraftConfig, NeonkitConfig};
pub use coordinator::{Outcome, RequestCoordinator};
pub use draft::{DraftRecord, DraftStore};
pub use error::{NeonkitError, Result};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use teardown::TeardownGuard;
