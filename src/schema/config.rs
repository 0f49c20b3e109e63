//! Parameter-space types shared by the codec, the genome layout and the
//! engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{EvolutionError, GaResult};

/// Closed interval `[min, max]` a problem variable is allowed to take.
///
/// The invariant `min < max` (both finite) is enforced on construction and
/// on deserialization, so every `Bound` in circulation is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Bound {
    min: f64,
    max: f64,
}

impl Bound {
    /// Create a bound, failing with [`EvolutionError::InvalidBound`] unless
    /// `min < max`.
    pub fn new(min: f64, max: f64) -> GaResult<Self> {
        if min.is_finite() && max.is_finite() && min < max {
            Ok(Self { min, max })
        } else {
            Err(EvolutionError::InvalidBound { min, max })
        }
    }

    /// Lower end of the interval.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper end of the interval.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the interval.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        self.min + self.span() / 2.0
    }

    /// Saturate `value` into the interval.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl TryFrom<(f64, f64)> for Bound {
    type Error = EvolutionError;

    fn try_from((min, max): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<Bound> for (f64, f64) {
    fn from(bound: Bound) -> Self {
        (bound.min, bound.max)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("At least one variable bound must be specified")]
    NoVariables,
    #[error("Invalid {name} probability: {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Bits per variable must be within 1..={max}, got {0}", max = crate::compute::MAX_BIT_WIDTH)]
    InvalidBitWidth(u32),
    #[error("Mutation sigma must be finite and non-negative, got {0}")]
    InvalidSigma(f64),
    #[error("Tournament size must be positive")]
    InvalidTournamentSize,
    #[error("Truncation count must be within 1..={population}, got {count}")]
    InvalidTruncationCount { count: usize, population: usize },
    #[error("Elitism ({elitism}) must be smaller than the population size ({population})")]
    ElitismTooLarge { elitism: usize, population: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_rejects_inverted_interval() {
        assert!(Bound::new(-1.0, 1.0).is_ok());
        assert_eq!(
            Bound::new(1.0, 1.0),
            Err(EvolutionError::InvalidBound { min: 1.0, max: 1.0 })
        );
        assert!(Bound::new(2.0, -2.0).is_err());
        assert!(Bound::new(f64::NAN, 1.0).is_err());
        assert!(Bound::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_bound_helpers() {
        let bound = Bound::new(5.0, 30.0).unwrap();
        assert_eq!(bound.span(), 25.0);
        assert_eq!(bound.midpoint(), 17.5);
        assert_eq!(bound.clamp(100.0), 30.0);
        assert_eq!(bound.clamp(-3.0), 5.0);
        assert!(bound.contains(5.0));
        assert!(!bound.contains(30.5));
    }

    #[test]
    fn test_bound_serialization() {
        let bound = Bound::new(-5.12, 5.12).unwrap();
        let json = serde_json::to_string(&bound).unwrap();
        assert_eq!(json, "[-5.12,5.12]");
        let parsed: Bound = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bound);

        let invalid: Result<Bound, _> = serde_json::from_str("[3.0,1.0]");
        assert!(invalid.is_err());
    }
}
