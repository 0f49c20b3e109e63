//! Mutation-only drift.
//!
//! Repeatedly mutates every member of a random population without selection
//! or crossover, reporting each individual whose phenotype changed. Useful
//! for watching how a mutation rate and step size move genes around inside
//! their bounds.

use log::debug;
use rand::Rng;

use crate::error::{EvolutionError, GaResult, check_probability};

use super::genome::{Genome, GenomeLayout};
use super::mutation::mutate;

/// Phenotype changes smaller than this count as unchanged.
const CHANGE_TOLERANCE: f64 = 1e-9;

/// One individual that moved during a drift generation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationChange {
    /// Generation index, starting at 1.
    pub generation: usize,
    /// Position of the individual in the population.
    pub index: usize,
    pub before: Vec<f64>,
    pub after: Vec<f64>,
}

/// Mutate a fresh random population for `generations` rounds.
///
/// Every generation replaces each individual by its mutant; `on_change` is
/// called for every individual whose decoded phenotype moved. Returns the
/// final population.
pub fn mutation_drift<R, F>(
    layout: &GenomeLayout,
    population_size: usize,
    generations: usize,
    rate: f64,
    rng: &mut R,
    mut on_change: F,
) -> GaResult<Vec<Genome>>
where
    R: Rng,
    F: FnMut(&MutationChange),
{
    check_probability("mutation", rate)?;
    if population_size == 0 {
        return Err(EvolutionError::InvalidSelectionSize {
            requested: 0,
            available: 0,
        });
    }

    let mut population = (0..population_size)
        .map(|_| Genome::random(layout, rng))
        .collect::<GaResult<Vec<_>>>()?;

    for generation in 1..=generations {
        let mut changed = 0;
        for (index, genome) in population.iter_mut().enumerate() {
            let mutant = Genome::new(mutate(genome.chromosome(), layout, rate, rng)?, layout)?;

            let moved = genome
                .phenotype()
                .iter()
                .zip(mutant.phenotype())
                .any(|(a, b)| (a - b).abs() > CHANGE_TOLERANCE);
            if moved {
                changed += 1;
                on_change(&MutationChange {
                    generation,
                    index,
                    before: genome.phenotype().to_vec(),
                    after: mutant.phenotype().to_vec(),
                });
            }
            *genome = mutant;
        }
        debug!("drift generation {generation}: {changed} of {population_size} individuals moved");
    }

    Ok(population)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::GenomeRng;
    use crate::schema::{Bound, Encoding};

    fn bar_layout(sigma: f64) -> GenomeLayout {
        GenomeLayout::new(
            vec![
                Bound::new(10.0, 50.0).unwrap(),
                Bound::new(20.0, 100.0).unwrap(),
                Bound::new(5.0, 30.0).unwrap(),
                Bound::new(0.0, 20.0).unwrap(),
            ],
            Encoding::Real { sigma },
        )
    }

    #[test]
    fn test_zero_rate_reports_nothing() {
        let mut rng = GenomeRng::new(4);
        let mut changes = 0;
        let population =
            mutation_drift(&bar_layout(1.0), 50, 10, 0.0, &mut rng, |_| changes += 1).unwrap();
        assert_eq!(changes, 0);
        assert_eq!(population.len(), 50);
    }

    #[test]
    fn test_changes_stay_in_bounds() {
        let layout = bar_layout(5.0);
        let mut rng = GenomeRng::new(9);
        let mut changes = Vec::new();
        let population =
            mutation_drift(&layout, 40, 20, 0.5, &mut rng, |c| changes.push(c.clone())).unwrap();

        assert!(!changes.is_empty());
        for change in &changes {
            assert!((1..=20).contains(&change.generation));
            assert!(change.index < 40);
            assert_ne!(change.before, change.after);
            for (value, bound) in change.after.iter().zip(layout.bounds()) {
                assert!(bound.contains(*value));
            }
        }
        for genome in &population {
            assert!(genome.evaluation().is_none());
        }
    }

    #[test]
    fn test_full_rate_moves_everyone_once_per_generation() {
        let mut rng = GenomeRng::new(17);
        let mut per_generation = vec![0; 3];
        mutation_drift(&bar_layout(1.0), 25, 3, 1.0, &mut rng, |c| {
            per_generation[c.generation - 1] += 1;
        })
        .unwrap();
        assert_eq!(per_generation, vec![25, 25, 25]);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = GenomeRng::new(0);
        assert!(matches!(
            mutation_drift(&bar_layout(1.0), 10, 1, 1.5, &mut rng, |_| {}),
            Err(EvolutionError::InvalidProbability { .. })
        ));
        assert!(mutation_drift(&bar_layout(1.0), 0, 1, 0.1, &mut rng, |_| {}).is_err());
    }
}
