//! Evolutionary search over bounded parameter spaces.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Genome** (`genome`): chromosome layout, decoding and the seeded RNG
//! - **Fitness** (`fitness`): objective functions and the direction adapter
//! - **Operators** (`selection`, `crossover`, `mutation`)
//! - **Search** (`search`): the generational and steady-state loop
//! - **History** (`history`): CSV export of per-generation records and
//!   population tables
//! - **Drift** (`drift`): mutation-only runs without selection
//!
//! # Example
//!
//! ```rust,no_run
//! use bounded_ga::schema::{Bound, Direction, EvolutionConfig};
//! use bounded_ga::compute::evolution::{EvolutionEngine, HistoryRecorder};
//!
//! let bound = Bound::new(-5.12, 5.12)?;
//! let mut config = EvolutionConfig::new(vec![bound, bound]);
//! config.direction = Direction::Minimize;
//!
//! let sphere = |p: &[f64]| p.iter().map(|x| x * x).sum::<f64>();
//! let mut engine = EvolutionEngine::new(config, sphere)?;
//!
//! let mut history = HistoryRecorder::new();
//! let result = engine.run_with_callback(|record| {
//!     println!("Generation {}: best fitness = {:.3}",
//!         record.generation, record.best_fitness);
//!     history.record(record);
//! })?;
//!
//! println!("Best: {:?} -> {:.6}", result.best.phenotype, result.best.objective);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Selection
//!
//! - `tournament`: best of k uniform draws, used by generational replacement
//! - `truncation`: deterministic top-m, used by steady-state replacement
//! - `roulette`: fitness-proportionate sampling, opt-in only

mod crossover;
mod drift;
mod fitness;
mod genome;
mod history;
mod mutation;
mod search;
mod selection;

pub use crossover::{crossover, one_point, recombine_pool};
pub use drift::{MutationChange, mutation_drift};
pub use fitness::{Objective, ObjectiveAdapter};
pub use genome::{Evaluation, Genome, GenomeLayout, GenomeRng};
pub use history::{HistoryRecorder, save_csv, write_csv, write_population_summary};
pub use mutation::{bit_flip, gaussian_clamp, mutate};
pub use search::EvolutionEngine;
pub use selection::{roulette, selection_probabilities, tournament, truncation, worst};
