//! Storage backends for the draft layer.

mod file;

pub use file::FileStorage;
