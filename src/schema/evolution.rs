//! Evolution configuration and report types.
//!
//! This module provides the serializable types for configuring a run
//! (representation, replacement strategy, operator probabilities) and the
//! records the engine emits while running and when it finishes.

use serde::{Deserialize, Serialize};

use super::{Bound, ConfigError};
use crate::compute::MAX_BIT_WIDTH;
use crate::error::check_probability;

/// Top-level configuration for an evolutionary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// One bound per problem variable, in phenotype order.
    pub variables: Vec<Bound>,
    /// Chromosome representation.
    #[serde(default)]
    pub encoding: Encoding,
    /// How offspring enter the population.
    #[serde(default)]
    pub replacement: Replacement,
    /// Population and generation settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Crossover and mutation probabilities.
    #[serde(default)]
    pub operators: OperatorConfig,
    /// Whether the objective is maximized or minimized.
    #[serde(default)]
    pub direction: Direction,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl EvolutionConfig {
    /// Create a configuration over `variables` with default settings.
    pub fn new(variables: Vec<Bound>) -> Self {
        Self {
            variables,
            encoding: Encoding::default(),
            replacement: Replacement::default(),
            population: PopulationConfig::default(),
            operators: OperatorConfig::default(),
            direction: Direction::default(),
            random_seed: None,
        }
    }
}

/// Chromosome representation, fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Encoding {
    /// Each variable is quantized into a fixed number of bits.
    Binary {
        #[serde(default = "default_bits_per_variable")]
        bits_per_variable: u32,
    },
    /// Each variable is one real-valued gene.
    Real {
        /// Standard deviation of the Gaussian mutation step.
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Binary {
            bits_per_variable: default_bits_per_variable(),
        }
    }
}

fn default_bits_per_variable() -> u32 {
    10
}
fn default_sigma() -> f64 {
    1.0
}

/// Replacement strategy applied after each evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Replacement {
    /// The whole population is replaced by offspring every generation.
    Generational {
        #[serde(default)]
        selection: SelectionMethod,
        /// Number of best individuals copied unchanged into the next
        /// generation. Zero reproduces plain generational replacement.
        #[serde(default)]
        elitism: usize,
    },
    /// The two fittest individuals breed two offspring which overwrite the
    /// two least fit individuals.
    SteadyState,
}

impl Default for Replacement {
    fn default() -> Self {
        Self::Generational {
            selection: SelectionMethod::default(),
            elitism: 0,
        }
    }
}

/// Parent selection policy for generational replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum SelectionMethod {
    /// Best of `size` uniform draws with replacement, repeated per slot.
    Tournament {
        #[serde(default = "default_tournament_size")]
        size: usize,
    },
    /// The top `count` individuals by fitness, cycled to fill the pool.
    Truncation { count: usize },
    /// Fitness-proportionate sampling over the selection probabilities.
    RouletteWheel,
}

impl Default for SelectionMethod {
    fn default() -> Self {
        Self::Tournament {
            size: default_tournament_size(),
        }
    }
}

fn default_tournament_size() -> usize {
    3
}

/// Population and generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Number of generations to run. There is no early exit.
    #[serde(default = "default_generations")]
    pub generations: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            generations: default_generations(),
        }
    }
}

fn default_population_size() -> usize {
    30
}
fn default_generations() -> usize {
    100
}

/// Operator probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Probability that a pair of parents is recombined.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Per-gene mutation probability.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
        }
    }
}

fn default_crossover_rate() -> f64 {
    0.7
}
fn default_mutation_rate() -> f64 {
    0.01
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    Maximize,
    Minimize,
}

impl Direction {
    /// Turn a raw objective value into a fitness score (higher is better).
    pub fn fitness(self, objective: f64) -> f64 {
        match self {
            Self::Maximize => objective,
            Self::Minimize => -objective,
        }
    }
}

/// Gene sequence of one individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "genes")]
pub enum Chromosome {
    Binary(Vec<bool>),
    Real(Vec<f64>),
}

impl Chromosome {
    /// Number of genes.
    pub fn len(&self) -> usize {
        match self {
            Self::Binary(bits) => bits.len(),
            Self::Real(genes) => genes.len(),
        }
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render a binary chromosome as `0`/`1` characters, or real genes as a
    /// comma separated list.
    pub fn to_gene_string(&self) -> String {
        match self {
            Self::Binary(bits) => bits.iter().map(|&b| if b { '1' } else { '0' }).collect(),
            Self::Real(genes) => genes
                .iter()
                .map(|g| format!("{g:.6}"))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

// ============================================================================
// Progress and Result Types
// ============================================================================

/// Per-generation summary handed to external loggers and printers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation index, starting at 1.
    pub generation: usize,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Decoded parameters of the best individual.
    pub best_phenotype: Vec<f64>,
    /// Raw objective value of the best individual.
    pub best_objective: f64,
}

/// The best individual of the final population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestIndividual {
    pub chromosome: Chromosome,
    pub phenotype: Vec<f64>,
    pub fitness: f64,
    pub objective: f64,
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Seed of the random stream; rerunning with it reproduces the run.
    pub seed: u64,
    /// Total generations run.
    pub generations: usize,
    /// Total objective evaluations performed.
    pub total_evaluations: u64,
    /// Mean fitness of the final population.
    pub final_mean_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
}

/// Final result of an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best individual of the final population.
    pub best: BestIndividual,
    /// Statistics from the run.
    pub stats: EvolutionStats,
}

/// Current phase of the engine state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EnginePhase {
    /// Population not yet created.
    #[default]
    Init,
    /// Computing fitness for the current population.
    Evaluate,
    /// Building the next population.
    Advance,
    /// Generation budget exhausted.
    Done,
}

// ============================================================================
// Validation
// ============================================================================

impl EvolutionConfig {
    /// Validate evolution configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population.size));
        }

        if self.variables.is_empty() {
            return Err(ConfigError::NoVariables);
        }

        for (name, value) in [
            ("crossover", self.operators.crossover_rate),
            ("mutation", self.operators.mutation_rate),
        ] {
            check_probability(name, value)
                .map_err(|_| ConfigError::InvalidProbability { name, value })?;
        }

        match self.encoding {
            Encoding::Binary { bits_per_variable } => {
                if bits_per_variable == 0 || bits_per_variable > MAX_BIT_WIDTH {
                    return Err(ConfigError::InvalidBitWidth(bits_per_variable));
                }
            }
            Encoding::Real { sigma } => {
                if !sigma.is_finite() || sigma < 0.0 {
                    return Err(ConfigError::InvalidSigma(sigma));
                }
            }
        }

        if let Replacement::Generational { selection, elitism } = self.replacement {
            match selection {
                SelectionMethod::Tournament { size } if size == 0 => {
                    return Err(ConfigError::InvalidTournamentSize);
                }
                SelectionMethod::Truncation { count }
                    if count == 0 || count > self.population.size =>
                {
                    return Err(ConfigError::InvalidTruncationCount {
                        count,
                        population: self.population.size,
                    });
                }
                _ => {}
            }
            if elitism >= self.population.size {
                return Err(ConfigError::ElitismTooLarge {
                    elitism,
                    population: self.population.size,
                });
            }
        }

        Ok(())
    }
}
