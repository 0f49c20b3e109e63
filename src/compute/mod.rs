//! Compute module - The algorithmic core of the optimizer.

mod codec;

pub mod evolution;

pub use codec::*;
