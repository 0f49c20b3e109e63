//! Selection operators.
//!
//! Selection works on fitness slices and returns indices into the
//! population, so callers decide how parents are copied.
//!
//! Two policies cover the engine's replacement strategies:
//!
//! - [`tournament`]: stochastic best-of-k, one tournament per pool slot.
//! - [`truncation`]: deterministic top-m by fitness.
//!
//! [`selection_probabilities`] derives fitness shares. Truncation ranks by
//! fitness directly; the shares only drive the opt-in [`roulette`] sampler
//! and population summaries.

use std::cmp::Ordering;

use rand::Rng;

use crate::error::{EvolutionError, GaResult};

/// Compare two fitness values, treating NaN as less than all other values.
pub(crate) fn cmp_fitness(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn check_size(requested: usize, available: usize) -> GaResult<()> {
    if requested == 0 || available == 0 || requested > available {
        Err(EvolutionError::InvalidSelectionSize {
            requested,
            available,
        })
    } else {
        Ok(())
    }
}

/// Fill a pool of `pool_size` indices by k-way tournament.
///
/// Each slot draws `size` indices uniformly with replacement and keeps the
/// fittest; ties go to the first drawn. Slots are independent, so an
/// individual may appear any number of times.
pub fn tournament<R: Rng>(
    fitness: &[f64],
    size: usize,
    pool_size: usize,
    rng: &mut R,
) -> GaResult<Vec<usize>> {
    if fitness.is_empty() || size == 0 {
        return Err(EvolutionError::InvalidSelectionSize {
            requested: size,
            available: fitness.len(),
        });
    }

    let pool = (0..pool_size)
        .map(|_| {
            let mut best = rng.gen_range(0..fitness.len());
            for _ in 1..size {
                let idx = rng.gen_range(0..fitness.len());
                if cmp_fitness(fitness[idx], fitness[best]) == Ordering::Greater {
                    best = idx;
                }
            }
            best
        })
        .collect();
    Ok(pool)
}

/// The `count` fittest indices, highest fitness first.
///
/// Equal fitness keeps population order.
pub fn truncation(fitness: &[f64], count: usize) -> GaResult<Vec<usize>> {
    check_size(count, fitness.len())?;

    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| cmp_fitness(fitness[b], fitness[a]));
    order.truncate(count);
    Ok(order)
}

/// The `count` least fit indices, lowest fitness first.
pub fn worst(fitness: &[f64], count: usize) -> GaResult<Vec<usize>> {
    check_size(count, fitness.len())?;

    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| cmp_fitness(fitness[a], fitness[b]));
    order.truncate(count);
    Ok(order)
}

/// Fitness shares `f_i / sum(f)`.
///
/// When the total is not positive every individual gets `1 / n`.
pub fn selection_probabilities(fitness: &[f64]) -> GaResult<Vec<f64>> {
    if fitness.is_empty() {
        return Err(EvolutionError::EmptyFitnessSet);
    }

    let total: f64 = fitness.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        let n = fitness.len() as f64;
        return Ok(vec![1.0 / n; fitness.len()]);
    }
    Ok(fitness.iter().map(|f| f / total).collect())
}

/// Fill a pool of `pool_size` indices by fitness-proportionate sampling.
///
/// Negative shares are treated as zero.
pub fn roulette<R: Rng>(fitness: &[f64], pool_size: usize, rng: &mut R) -> GaResult<Vec<usize>> {
    let probabilities = selection_probabilities(fitness)?;
    let total: f64 = probabilities.iter().map(|p| p.max(0.0)).sum();

    let pool = (0..pool_size)
        .map(|_| spin(&probabilities, rng.r#gen::<f64>() * total))
        .collect();
    Ok(pool)
}

/// Index whose cumulative share first exceeds `target`.
///
/// When rounding keeps the running sum at or below `target`, the last index
/// with a positive share wins.
fn spin(probabilities: &[f64], target: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p.max(0.0);
        if cumulative > target {
            return i;
        }
    }
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len().saturating_sub(1))
}
