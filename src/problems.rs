//! Benchmark problems with preset run configurations.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GaResult;
use crate::schema::{
    Bound, Direction, Encoding, EvolutionConfig, OperatorConfig, PopulationConfig, Replacement,
    SelectionMethod,
};

/// `20 + x² + y² - cos(2πx) + cos(2πy)`, a bowl with a cosine ripple.
pub fn cosine_bowl(x: f64, y: f64) -> f64 {
    20.0 + x.powi(2) + y.powi(2) - (2.0 * PI * x).cos() + (2.0 * PI * y).cos()
}

/// Volume of a rectangular box.
pub fn box_volume(length: f64, width: f64, height: f64) -> f64 {
    length * width * height
}

/// Share of whey protein in a bar mixed from whey, oats, almond butter and
/// sugar, all in grams.
pub fn protein_fraction(whey: f64, oats: f64, almond_butter: f64, sugar: f64) -> f64 {
    whey / (whey + oats + almond_butter + sugar)
}

/// Known problems runnable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Problem {
    /// Minimize [`cosine_bowl`] over `[-5.12, 5.12]²`.
    CosineBowl,
    /// Maximize [`box_volume`] over `[10, 50] × [10, 50] × [5, 30]`.
    BoxVolume,
    /// Maximize [`protein_fraction`] over ingredient grams
    /// `[10, 50] × [20, 100] × [5, 30] × [0, 20]`, with real-valued genes.
    ProteinBar,
}

impl Problem {
    pub const ALL: [Problem; 3] = [Self::CosineBowl, Self::BoxVolume, Self::ProteinBar];

    /// Objective over a phenotype of [`Self::variable_names`] length.
    ///
    /// A phenotype with too few variables evaluates to NaN, which ranks
    /// below every other fitness.
    pub fn objective(self) -> fn(&[f64]) -> f64 {
        match self {
            Self::CosineBowl => |p: &[f64]| match p {
                [x, y, ..] => cosine_bowl(*x, *y),
                _ => f64::NAN,
            },
            Self::BoxVolume => |p: &[f64]| match p {
                [l, w, h, ..] => box_volume(*l, *w, *h),
                _ => f64::NAN,
            },
            Self::ProteinBar => |p: &[f64]| match p {
                [whey, oats, almond, sugar, ..] => protein_fraction(*whey, *oats, *almond, *sugar),
                _ => f64::NAN,
            },
        }
    }

    pub fn variable_names(self) -> &'static [&'static str] {
        match self {
            Self::CosineBowl => &["x", "y"],
            Self::BoxVolume => &["length", "width", "height"],
            Self::ProteinBar => &["whey", "oats", "almond_butter", "sugar"],
        }
    }

    pub fn bounds(self) -> GaResult<Vec<Bound>> {
        let pairs: &[(f64, f64)] = match self {
            Self::CosineBowl => &[(-5.12, 5.12), (-5.12, 5.12)],
            Self::BoxVolume => &[(10.0, 50.0), (10.0, 50.0), (5.0, 30.0)],
            Self::ProteinBar => &[(10.0, 50.0), (20.0, 100.0), (5.0, 30.0), (0.0, 20.0)],
        };
        pairs
            .iter()
            .map(|&(min, max)| Bound::new(min, max))
            .collect()
    }

    /// Preset configuration for the problem.
    ///
    /// The bowl runs generational replacement with 3-way tournaments; the
    /// box runs steady-state replacement of the two worst individuals. The
    /// protein bar evolves real-valued genes by selection and Gaussian
    /// mutation alone.
    pub fn default_config(self) -> GaResult<EvolutionConfig> {
        let config = match self {
            Self::CosineBowl => EvolutionConfig {
                variables: self.bounds()?,
                encoding: Encoding::Binary {
                    bits_per_variable: 10,
                },
                replacement: Replacement::Generational {
                    selection: SelectionMethod::Tournament { size: 3 },
                    elitism: 0,
                },
                population: PopulationConfig {
                    size: 30,
                    generations: 100,
                },
                operators: OperatorConfig {
                    crossover_rate: 0.7,
                    mutation_rate: 0.01,
                },
                direction: Direction::Minimize,
                random_seed: None,
            },
            Self::BoxVolume => EvolutionConfig {
                variables: self.bounds()?,
                encoding: Encoding::Binary {
                    bits_per_variable: 10,
                },
                replacement: Replacement::SteadyState,
                population: PopulationConfig {
                    size: 100,
                    generations: 50,
                },
                operators: OperatorConfig {
                    crossover_rate: 1.0,
                    mutation_rate: 0.05,
                },
                direction: Direction::Maximize,
                random_seed: None,
            },
            Self::ProteinBar => EvolutionConfig {
                variables: self.bounds()?,
                encoding: Encoding::Real { sigma: 1.0 },
                replacement: Replacement::Generational {
                    selection: SelectionMethod::Tournament { size: 3 },
                    elitism: 0,
                },
                population: PopulationConfig {
                    size: 1000,
                    generations: 50,
                },
                operators: OperatorConfig {
                    crossover_rate: 0.0,
                    mutation_rate: 0.1,
                },
                direction: Direction::Maximize,
                random_seed: None,
            },
        };
        Ok(config)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CosineBowl => write!(f, "cosine bowl"),
            Self::BoxVolume => write!(f, "box volume"),
            Self::ProteinBar => write!(f, "protein bar"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_bowl_values() {
        assert!((cosine_bowl(0.0, 0.0) - 20.0).abs() < 1e-12);
        assert!((cosine_bowl(0.0, 0.5) - 18.25).abs() < 1e-12);
    }

    #[test]
    fn test_box_volume_midpoints() {
        assert_eq!(box_volume(30.0, 60.0, 17.5), 31500.0);
        let objective = Problem::BoxVolume.objective();
        assert_eq!(objective(&[50.0, 50.0, 30.0]), 75000.0);
    }

    #[test]
    fn test_protein_fraction() {
        assert_eq!(protein_fraction(50.0, 30.0, 20.0, 0.0), 0.5);
        let objective = Problem::ProteinBar.objective();
        assert_eq!(objective(&[10.0, 20.0, 5.0, 5.0]), 0.25);
    }

    #[test]
    fn test_short_phenotype_is_nan() {
        for problem in Problem::ALL {
            let objective = problem.objective();
            assert!(objective(&[1.0]).is_nan());
            assert!(objective(&[]).is_nan());
        }
    }

    #[test]
    fn test_default_configs_valid() {
        for problem in Problem::ALL {
            let config = problem.default_config().unwrap();
            assert!(config.validate().is_ok());
            assert_eq!(config.variables.len(), problem.variable_names().len());
        }
    }

    #[test]
    fn test_protein_bar_preset_is_real_valued() {
        let config = Problem::ProteinBar.default_config().unwrap();
        assert_eq!(config.encoding, Encoding::Real { sigma: 1.0 });
        assert_eq!(config.operators.mutation_rate, 0.1);
        assert_eq!(config.population.size, 1000);
        assert_eq!(config.population.generations, 50);
        assert_eq!(config.variables[1], Bound::new(20.0, 100.0).unwrap());
    }
}
