//! Request lifecycle coordination.
//!
//! A UI surface typically has a handful of logical request "slots" (one per
//! list, search box, or detail pane). This module keeps at most one
//! asynchronous operation active per slot, cancels superseded operations,
//! and guarantees that a stale result never reaches the caller.

mod manager;
mod outcome;

#[cfg(test)]
mod manager_test;

pub use manager::RequestCoordinator;
pub use outcome::Outcome;
