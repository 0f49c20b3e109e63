//! One-point crossover.
//!
//! Children are always freshly allocated; a child never shares its gene
//! storage with a parent.

use rand::Rng;

use crate::error::{EvolutionError, GaResult, check_probability};
use crate::schema::Chromosome;

/// Swap the suffixes of `a` and `b` starting at `point`.
///
/// `childA = a[..point] + b[point..]`, `childB = b[..point] + a[point..]`.
pub fn one_point<T: Clone>(a: &[T], b: &[T], point: usize) -> GaResult<(Vec<T>, Vec<T>)> {
    if a.len() != b.len() {
        return Err(EvolutionError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    let point = point.min(a.len());

    let child_a = a[..point].iter().chain(&b[point..]).cloned().collect();
    let child_b = b[..point].iter().chain(&a[point..]).cloned().collect();
    Ok((child_a, child_b))
}

fn crossover_genes<T: Clone, R: Rng>(
    a: &[T],
    b: &[T],
    rate: f64,
    rng: &mut R,
) -> GaResult<(Vec<T>, Vec<T>)> {
    if a.len() != b.len() {
        return Err(EvolutionError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    if rng.r#gen::<f64>() >= rate || a.len() < 2 {
        return Ok((a.to_vec(), b.to_vec()));
    }

    let point = rng.gen_range(1..a.len());
    one_point(a, b, point)
}

/// Recombine two parents with probability `rate`.
///
/// Without recombination the children are copies of the parents. The cut
/// point is uniform in `1..=len-1`; chromosomes shorter than two genes are
/// always copied through.
pub fn crossover<R: Rng>(
    a: &Chromosome,
    b: &Chromosome,
    rate: f64,
    rng: &mut R,
) -> GaResult<(Chromosome, Chromosome)> {
    check_probability("crossover", rate)?;

    match (a, b) {
        (Chromosome::Binary(a), Chromosome::Binary(b)) => {
            let (x, y) = crossover_genes(a, b, rate, rng)?;
            Ok((Chromosome::Binary(x), Chromosome::Binary(y)))
        }
        (Chromosome::Real(a), Chromosome::Real(b)) => {
            let (x, y) = crossover_genes(a, b, rate, rng)?;
            Ok((Chromosome::Real(x), Chromosome::Real(y)))
        }
        _ => Err(EvolutionError::RepresentationMismatch),
    }
}

/// Recombine a whole selection pool pairwise: `(0, 1)`, `(2, 3)`, ...
///
/// An odd last member is copied through unchanged.
pub fn recombine_pool<R: Rng>(
    pool: &[Chromosome],
    rate: f64,
    rng: &mut R,
) -> GaResult<Vec<Chromosome>> {
    check_probability("crossover", rate)?;

    let mut offspring = Vec::with_capacity(pool.len());
    let mut pairs = pool.chunks_exact(2);
    for pair in pairs.by_ref() {
        let (x, y) = crossover(&pair[0], &pair[1], rate, rng)?;
        offspring.push(x);
        offspring.push(y);
    }
    offspring.extend(pairs.remainder().iter().cloned());
    Ok(offspring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_one_point_at_two() {
        let (x, y) = one_point(&[0, 0, 0, 0], &[1, 1, 1, 1], 2).unwrap();
        assert_eq!(x, vec![0, 0, 1, 1]);
        assert_eq!(y, vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_length_mismatch() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = Chromosome::Binary(vec![true; 4]);
        let b = Chromosome::Binary(vec![false; 5]);
        assert_eq!(
            crossover(&a, &b, 1.0, &mut rng),
            Err(EvolutionError::LengthMismatch {
                expected: 4,
                actual: 5
            })
        );
    }

    #[test]
    fn test_representation_mismatch() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = Chromosome::Binary(vec![true; 2]);
        let b = Chromosome::Real(vec![0.0; 2]);
        assert_eq!(
            crossover(&a, &b, 1.0, &mut rng),
            Err(EvolutionError::RepresentationMismatch)
        );
    }

    #[test]
    fn test_zero_rate_copies_parents() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = Chromosome::Binary(vec![false; 8]);
        let b = Chromosome::Binary(vec![true; 8]);
        for _ in 0..50 {
            let (x, y) = crossover(&a, &b, 0.0, &mut rng).unwrap();
            assert_eq!(x, a);
            assert_eq!(y, b);
        }
    }

    #[test]
    fn test_full_rate_always_cuts() {
        let mut rng = StdRng::seed_from_u64(12);
        let a = Chromosome::Binary(vec![false; 8]);
        let b = Chromosome::Binary(vec![true; 8]);
        for _ in 0..50 {
            let (x, y) = crossover(&a, &b, 1.0, &mut rng).unwrap();
            let Chromosome::Binary(x) = x else { panic!() };
            let Chromosome::Binary(y) = y else { panic!() };
            // Cut point in 1..=7: both children start with their own
            // parent's gene and end with the other's.
            assert!(!x[0] && x[7]);
            assert!(y[0] && !y[7]);
        }
    }

    #[test]
    fn test_invalid_rate() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = Chromosome::Real(vec![0.0; 3]);
        assert!(matches!(
            crossover(&a, &a, 1.5, &mut rng),
            Err(EvolutionError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_single_gene_copied() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = Chromosome::Real(vec![1.0]);
        let b = Chromosome::Real(vec![2.0]);
        let (x, y) = crossover(&a, &b, 1.0, &mut rng).unwrap();
        assert_eq!((x, y), (a, b));
    }

    #[test]
    fn test_recombine_pool_odd_member() {
        let mut rng = StdRng::seed_from_u64(4);
        let pool = vec![
            Chromosome::Binary(vec![false; 6]),
            Chromosome::Binary(vec![true; 6]),
            Chromosome::Binary(vec![true, false, true, false, true, false]),
        ];
        let offspring = recombine_pool(&pool, 1.0, &mut rng).unwrap();
        assert_eq!(offspring.len(), 3);
        assert_eq!(offspring[2], pool[2]);
        assert_ne!(offspring[0], pool[0]);
    }
}
