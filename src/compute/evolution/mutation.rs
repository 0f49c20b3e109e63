//! Per-gene mutation operators.
//!
//! Both policies draw one uniform number per gene to decide whether it
//! mutates, and return a new vector; the input is never modified.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{EvolutionError, GaResult, check_probability};
use crate::schema::{Bound, Chromosome, Encoding};

use super::genome::GenomeLayout;

/// Flip every bit independently with probability `rate`.
pub fn bit_flip<R: Rng>(bits: &[bool], rate: f64, rng: &mut R) -> GaResult<Vec<bool>> {
    check_probability("mutation", rate)?;

    Ok(bits
        .iter()
        .map(|&bit| if rng.r#gen::<f64>() < rate { !bit } else { bit })
        .collect())
}

/// With probability `rate` per gene, add `N(0, sigma)` noise and clamp the
/// result into that gene's bound.
pub fn gaussian_clamp<R: Rng>(
    genes: &[f64],
    bounds: &[Bound],
    rate: f64,
    sigma: f64,
    rng: &mut R,
) -> GaResult<Vec<f64>> {
    check_probability("mutation", rate)?;
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(EvolutionError::InvalidSigma(sigma));
    }
    if genes.len() != bounds.len() {
        return Err(EvolutionError::LengthMismatch {
            expected: bounds.len(),
            actual: genes.len(),
        });
    }

    Ok(genes
        .iter()
        .zip(bounds)
        .map(|(&gene, bound)| {
            if rng.r#gen::<f64>() < rate {
                let noise: f64 = rng.sample(StandardNormal);
                bound.clamp(gene + noise * sigma)
            } else {
                gene
            }
        })
        .collect())
}

/// Mutate a chromosome with the policy matching the layout's encoding.
pub fn mutate<R: Rng>(
    chromosome: &Chromosome,
    layout: &GenomeLayout,
    rate: f64,
    rng: &mut R,
) -> GaResult<Chromosome> {
    match (chromosome, layout.encoding()) {
        (Chromosome::Binary(bits), Encoding::Binary { .. }) => {
            Ok(Chromosome::Binary(bit_flip(bits, rate, rng)?))
        }
        (Chromosome::Real(genes), Encoding::Real { sigma }) => Ok(Chromosome::Real(
            gaussian_clamp(genes, layout.bounds(), rate, sigma, rng)?,
        )),
        _ => Err(EvolutionError::RepresentationMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bar_bounds() -> Vec<Bound> {
        vec![
            Bound::new(10.0, 50.0).unwrap(),
            Bound::new(20.0, 100.0).unwrap(),
            Bound::new(5.0, 30.0).unwrap(),
            Bound::new(0.0, 20.0).unwrap(),
        ]
    }

    #[test]
    fn test_bit_flip_extremes() {
        let mut rng = StdRng::seed_from_u64(8);
        let bits = vec![true, false, true, true, false, false, true, false];

        let all = bit_flip(&bits, 1.0, &mut rng).unwrap();
        assert!(all.iter().zip(&bits).all(|(a, b)| a != b));

        let none = bit_flip(&bits, 0.0, &mut rng).unwrap();
        assert_eq!(none, bits);
    }

    #[test]
    fn test_bit_flip_rate_statistics() {
        let mut rng = StdRng::seed_from_u64(21);
        let bits = vec![false; 10_000];
        let flipped = bit_flip(&bits, 0.1, &mut rng).unwrap();
        let count = flipped.iter().filter(|&&b| b).count();
        assert!((800..1200).contains(&count), "flipped {count}");
    }

    #[test]
    fn test_gaussian_clamp_contained() {
        let mut rng = StdRng::seed_from_u64(2);
        let bounds = bar_bounds();
        let genes = vec![10.0, 100.0, 17.5, 0.0];
        for _ in 0..200 {
            let mutated = gaussian_clamp(&genes, &bounds, 1.0, 1000.0, &mut rng).unwrap();
            for (value, bound) in mutated.iter().zip(&bounds) {
                assert!(bound.contains(*value));
            }
        }
    }

    #[test]
    fn test_gaussian_zero_rate_identity() {
        let mut rng = StdRng::seed_from_u64(2);
        let genes = vec![12.0, 40.0, 6.0, 3.0];
        let mutated = gaussian_clamp(&genes, &bar_bounds(), 0.0, 5.0, &mut rng).unwrap();
        assert_eq!(mutated, genes);
    }

    #[test]
    fn test_gaussian_errors() {
        let mut rng = StdRng::seed_from_u64(2);
        let bounds = bar_bounds();
        assert!(matches!(
            gaussian_clamp(&[1.0; 4], &bounds, -0.5, 1.0, &mut rng),
            Err(EvolutionError::InvalidProbability { .. })
        ));
        assert_eq!(
            gaussian_clamp(&[11.0; 4], &bounds, 0.5, -1.0, &mut rng),
            Err(EvolutionError::InvalidSigma(-1.0))
        );
        assert!(matches!(
            gaussian_clamp(&[11.0; 3], &bounds, 0.5, 1.0, &mut rng),
            Err(EvolutionError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_bit_flip_invalid_rate() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(bit_flip(&[true], 1.01, &mut rng).is_err());
    }

    #[test]
    fn test_mutate_dispatch() {
        let mut rng = StdRng::seed_from_u64(0);
        let layout = GenomeLayout::new(bar_bounds(), Encoding::Real { sigma: 1.0 });
        let chromosome = Chromosome::Real(vec![30.0, 60.0, 17.5, 10.0]);
        assert!(matches!(
            mutate(&chromosome, &layout, 0.5, &mut rng),
            Ok(Chromosome::Real(_))
        ));

        let bits = Chromosome::Binary(vec![true; 4]);
        assert_eq!(
            mutate(&bits, &layout, 0.5, &mut rng),
            Err(EvolutionError::RepresentationMismatch)
        );
    }
}
