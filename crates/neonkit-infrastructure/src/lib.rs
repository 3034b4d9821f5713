//! Storage backends and configuration loading for the neonkit client
//! libraries.
//!
//! This crate supplies the durable side of `neonkit-core`: a file-backed
//! [`neonkit_core::KeyValueStorage`] with atomic writes, platform path
//! resolution, and a cached TOML configuration service.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::NeonkitPaths;
pub use storage::FileStorage;
