//! Shared types, configuration and the error taxonomy.

pub mod config;
/// Shared primitive types.
pub mod core;
/// Error taxonomy.
pub mod error;
