//! Fitness evaluation for evolutionary search.
//!
//! The engine only ever maximizes fitness. `ObjectiveAdapter` is the seam
//! between a problem's objective function and that convention.

use crate::schema::Direction;

use super::genome::{Evaluation, Genome};

/// A scalar objective over a phenotype.
///
/// Implementations must be pure: the engine calls `evaluate` once per
/// individual per generation and relies on identical inputs giving
/// identical outputs.
pub trait Objective {
    fn evaluate(&self, phenotype: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, phenotype: &[f64]) -> f64 {
        self(phenotype)
    }
}

/// Wraps an objective and an optimization direction into a fitness score.
#[derive(Debug, Clone)]
pub struct ObjectiveAdapter<O> {
    objective: O,
    direction: Direction,
}

impl<O: Objective> ObjectiveAdapter<O> {
    /// Create a new adapter.
    pub fn new(objective: O, direction: Direction) -> Self {
        Self {
            objective,
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Raw objective value of a phenotype.
    pub fn objective(&self, phenotype: &[f64]) -> f64 {
        self.objective.evaluate(phenotype)
    }

    /// Fitness of a genome: the objective when maximizing, its negation when
    /// minimizing.
    pub fn fitness(&self, genome: &Genome) -> f64 {
        self.evaluate(genome).fitness
    }

    /// Fitness together with the raw objective value.
    pub fn evaluate(&self, genome: &Genome) -> Evaluation {
        let objective = self.objective(genome.phenotype());
        Evaluation {
            fitness: self.direction.fitness(objective),
            objective,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::GenomeLayout;
    use crate::schema::{Bound, Chromosome, Encoding};

    fn product(phenotype: &[f64]) -> f64 {
        phenotype.iter().product()
    }

    fn box_layout() -> GenomeLayout {
        GenomeLayout::new(
            vec![
                Bound::new(10.0, 50.0).unwrap(),
                Bound::new(20.0, 100.0).unwrap(),
                Bound::new(5.0, 30.0).unwrap(),
            ],
            Encoding::Real { sigma: 1.0 },
        )
    }

    #[test]
    fn test_midpoint_product() {
        let genome = Genome::new(Chromosome::Real(vec![30.0, 60.0, 17.5]), &box_layout()).unwrap();
        let adapter = ObjectiveAdapter::new(product, Direction::Maximize);
        let evaluation = adapter.evaluate(&genome);
        assert_eq!(evaluation.objective, 31500.0);
        assert_eq!(evaluation.fitness, 31500.0);
    }

    #[test]
    fn test_minimize_negates() {
        let genome = Genome::new(Chromosome::Real(vec![30.0, 60.0, 17.5]), &box_layout()).unwrap();
        let adapter = ObjectiveAdapter::new(product, Direction::Minimize);
        let evaluation = adapter.evaluate(&genome);
        assert_eq!(evaluation.objective, 31500.0);
        assert_eq!(adapter.fitness(&genome), -31500.0);
    }

    #[test]
    fn test_closure_objective() {
        let offset = 2.0;
        let adapter = ObjectiveAdapter::new(move |p: &[f64]| p[0] + offset, Direction::Maximize);
        assert_eq!(adapter.objective(&[1.0]), 3.0);
    }
}
