//! Draft persistence.
//!
//! Best-effort durable persistence of in-progress user input (a sign
//! design, a checkout form) so it can be offered back after a reload.
//! Writes are debounced, records expire after a retention window, and
//! every storage failure degrades silently to "no draft available".

mod model;
mod store;


pub use model::{DRAFT_VERSION, DraftRecord};
pub use store::DraftStore;
