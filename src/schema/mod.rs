//! Schema module - Configuration and report types for evolutionary runs.

mod config;
mod evolution;

pub use config::*;
pub use evolution::*;
