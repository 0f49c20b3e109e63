//! Error types for the evolution engine.

use crate::schema::ConfigError;

/// Precondition violations raised by the codec, the genetic operators and
/// the evolution engine.
///
/// Every variant is fatal to the call that produced it; nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid bound: min ({min}) must be finite and strictly less than max ({max})")]
    InvalidBound { min: f64, max: f64 },
    #[error("Length mismatch: expected {expected} genes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Chromosome representations differ (binary vs. real)")]
    RepresentationMismatch,
    #[error("Invalid {name} probability: {value} (must be within [0, 1])")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Invalid selection size: requested {requested} from {available} individuals")]
    InvalidSelectionSize { requested: usize, available: usize },
    #[error("Cannot compute selection probabilities from an empty fitness set")]
    EmptyFitnessSet,
    #[error("Invalid bit width: {0} (must be within 1..={max})", max = crate::compute::MAX_BIT_WIDTH)]
    InvalidBitWidth(u32),
    #[error("Invalid mutation sigma: {0} (must be finite and non-negative)")]
    InvalidSigma(f64),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for engine operations.
pub type GaResult<T> = Result<T, EvolutionError>;

/// Check that `value` is a probability.
pub(crate) fn check_probability(name: &'static str, value: f64) -> GaResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvolutionError::InvalidProbability { name, value })
    }
}
