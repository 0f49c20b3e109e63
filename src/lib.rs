//! Bounded GA - a small genetic algorithm engine for bounded parameter spaces.
//!
//! Candidate solutions are vectors of real parameters, each confined to a
//! closed interval. They are represented either as fixed-width binary
//! chromosomes or as vectors of reals, and evolved with generational or
//! steady-state replacement driven by a single seeded random stream.
//!
//! # Architecture
//!
//! - `schema`: configuration, bounds and result types (all serde-friendly)
//! - `compute`: the bit codec and the evolution engine with its operators
//! - `problems`: two benchmark objectives with preset configurations
//! - `error`: the error type shared by every fallible operation
//!
//! # Example
//!
//! ```rust,no_run
//! use bounded_ga::{EvolutionEngine, problems::Problem};
//!
//! let problem = Problem::BoxVolume;
//! let mut config = problem.default_config()?;
//! config.random_seed = Some(7);
//!
//! let mut engine = EvolutionEngine::new(config, problem.objective())?;
//! let result = engine.run()?;
//!
//! println!("Best volume {:.1} at {:?}", result.best.objective, result.best.phenotype);
//! # Ok::<(), bounded_ga::EvolutionError>(())
//! ```

pub mod compute;
pub mod error;
pub mod problems;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{EvolutionEngine, HistoryRecorder, Objective};
pub use error::{EvolutionError, GaResult};
pub use schema::{Bound, Direction, Encoding, EvolutionConfig, EvolutionResult, Replacement};
