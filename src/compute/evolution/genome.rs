//! Genome representation and random generation.
//!
//! Provides the chromosome layout (how genes map onto problem variables),
//! the `Genome` container and the seeded random stream shared by every
//! stochastic operator.

use rand::prelude::*;

use crate::compute::decode;
use crate::error::{EvolutionError, GaResult};
use crate::schema::{Bound, Chromosome, Encoding};

/// Random number generator wrapper for genome operations.
///
/// A run owns exactly one of these; initialization, selection, crossover and
/// mutation all draw from it in a fixed order, so a fixed seed reproduces a
/// run exactly.
#[derive(Debug, Clone)]
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RngCore for GenomeRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// How a chromosome maps onto the problem variables.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomeLayout {
    bounds: Vec<Bound>,
    encoding: Encoding,
}

impl GenomeLayout {
    /// Create a layout with one bound per variable.
    pub fn new(bounds: Vec<Bound>, encoding: Encoding) -> Self {
        Self { bounds, encoding }
    }

    /// Per-variable bounds.
    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    /// Chromosome representation.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of problem variables.
    pub fn variable_count(&self) -> usize {
        self.bounds.len()
    }

    /// Number of genes in every chromosome of this layout.
    pub fn chromosome_len(&self) -> usize {
        match self.encoding {
            Encoding::Binary { bits_per_variable } => {
                self.bounds.len() * bits_per_variable as usize
            }
            Encoding::Real { .. } => self.bounds.len(),
        }
    }

    /// Decode a chromosome into its phenotype, one value per variable.
    pub fn decode(&self, chromosome: &Chromosome) -> GaResult<Vec<f64>> {
        let expected = self.chromosome_len();
        if chromosome.len() != expected {
            return Err(EvolutionError::LengthMismatch {
                expected,
                actual: chromosome.len(),
            });
        }

        match (self.encoding, chromosome) {
            (Encoding::Binary { bits_per_variable }, Chromosome::Binary(bits)) => bits
                .chunks(bits_per_variable as usize)
                .zip(&self.bounds)
                .map(|(slice, &bound)| decode(slice, bound))
                .collect(),
            (Encoding::Real { .. }, Chromosome::Real(genes)) => Ok(genes.clone()),
            _ => Err(EvolutionError::RepresentationMismatch),
        }
    }

    /// Generate a uniformly random chromosome respecting every bound.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        match self.encoding {
            Encoding::Binary { .. } => {
                Chromosome::Binary((0..self.chromosome_len()).map(|_| rng.r#gen()).collect())
            }
            Encoding::Real { .. } => Chromosome::Real(
                self.bounds
                    .iter()
                    .map(|b| rng.gen_range(b.min()..=b.max()))
                    .collect(),
            ),
        }
    }
}

/// Fitness and raw objective of an evaluated genome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Direction-adjusted score; higher is better.
    pub fitness: f64,
    /// Objective value as returned by the problem.
    pub objective: f64,
}

/// One individual: its chromosome, decoded phenotype and, once evaluated,
/// its fitness.
///
/// A genome owns its chromosome. Operators build new genomes through
/// [`Genome::new`], which always starts unevaluated, so a fitness value is
/// never inherited from a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    chromosome: Chromosome,
    phenotype: Vec<f64>,
    evaluation: Option<Evaluation>,
}

impl Genome {
    /// Wrap a chromosome, decoding its phenotype with `layout`.
    pub fn new(chromosome: Chromosome, layout: &GenomeLayout) -> GaResult<Self> {
        let phenotype = layout.decode(&chromosome)?;
        Ok(Self {
            chromosome,
            phenotype,
            evaluation: None,
        })
    }

    /// Generate a random genome.
    pub fn random<R: Rng>(layout: &GenomeLayout, rng: &mut R) -> GaResult<Self> {
        Self::new(layout.random_chromosome(rng), layout)
    }

    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    pub fn phenotype(&self) -> &[f64] {
        &self.phenotype
    }

    /// Fitness and objective, `None` until evaluated.
    pub fn evaluation(&self) -> Option<Evaluation> {
        self.evaluation
    }

    /// Fitness, `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.evaluation.map(|e| e.fitness)
    }

    pub(crate) fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.evaluation = Some(evaluation);
    }

    /// Take the chromosome out of the genome.
    pub fn into_chromosome(self) -> Chromosome {
        self.chromosome
    }
}
