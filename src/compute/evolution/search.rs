//! The evolution loop.
//!
//! `EvolutionEngine` drives the state machine
//! `Init -> (Evaluate -> Advance)* -> Done` for a fixed number of
//! generations and reports one [`GenerationRecord`] per generation.

use std::time::Instant;

use log::{debug, info, trace};

use crate::error::{EvolutionError, GaResult};
use crate::schema::{
    BestIndividual, Chromosome, EnginePhase, EvolutionConfig, EvolutionResult, EvolutionStats,
    GenerationRecord, Replacement, SelectionMethod,
};

use super::crossover::{crossover, recombine_pool};
use super::fitness::{Objective, ObjectiveAdapter};
use super::genome::{Genome, GenomeLayout, GenomeRng};
use super::mutation::mutate;
use super::selection::{cmp_fitness, roulette, tournament, truncation, worst};

/// Evolution engine that runs the search.
pub struct EvolutionEngine<O> {
    config: EvolutionConfig,
    layout: GenomeLayout,
    adapter: ObjectiveAdapter<O>,
    rng: GenomeRng,
    population: Vec<Genome>,
    generation: usize,
    evaluations: u64,
    phase: EnginePhase,
}

impl<O: Objective> EvolutionEngine<O> {
    /// Create a new evolution engine.
    ///
    /// The random stream is seeded from `config.random_seed`. Without one a
    /// seed is drawn from entropy and written back into the config, so
    /// [`Self::seed`] always reproduces the run.
    pub fn new(mut config: EvolutionConfig, objective: O) -> GaResult<Self> {
        config.validate()?;

        let seed = *config.random_seed.get_or_insert_with(rand::random);
        let rng = GenomeRng::new(seed);
        let layout = GenomeLayout::new(config.variables.clone(), config.encoding);
        let adapter = ObjectiveAdapter::new(objective, config.direction);

        Ok(Self {
            config,
            layout,
            adapter,
            rng,
            population: Vec::new(),
            generation: 0,
            evaluations: 0,
            phase: EnginePhase::Init,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Seed of the random stream.
    pub fn seed(&self) -> u64 {
        self.config.random_seed.unwrap_or_default()
    }

    pub fn layout(&self) -> &GenomeLayout {
        &self.layout
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Initialize the population with uniformly random genomes.
    pub fn initialize(&mut self) -> GaResult<()> {
        self.population = (0..self.config.population.size)
            .map(|_| Genome::random(&self.layout, &mut self.rng))
            .collect::<GaResult<_>>()?;
        self.generation = 0;
        self.phase = EnginePhase::Evaluate;
        Ok(())
    }

    /// Evaluate all genomes and summarize the current population.
    pub fn evaluate_population(&mut self) -> GaResult<GenerationRecord> {
        for genome in &mut self.population {
            let evaluation = self.adapter.evaluate(genome);
            genome.set_evaluation(evaluation);
        }
        self.evaluations += self.population.len() as u64;
        self.phase = EnginePhase::Advance;

        self.summarize()
    }

    /// Index of the fittest genome; ties go to the lowest index.
    fn best_index(&self) -> Option<usize> {
        let fitness = self.fitness_values();
        (0..fitness.len()).reduce(|best, i| {
            if cmp_fitness(fitness[i], fitness[best]).is_gt() {
                i
            } else {
                best
            }
        })
    }

    /// The fittest genome of the last evaluation.
    pub fn best(&self) -> Option<&Genome> {
        self.best_index().map(|i| &self.population[i])
    }

    fn fitness_values(&self) -> Vec<f64> {
        self.population
            .iter()
            .map(|g| g.fitness().unwrap_or(f64::NAN))
            .collect()
    }

    fn summarize(&self) -> GaResult<GenerationRecord> {
        let best = self.best().ok_or(EvolutionError::EmptyFitnessSet)?;
        let evaluation = best.evaluation().ok_or(EvolutionError::EmptyFitnessSet)?;
        let fitness = self.fitness_values();
        let mean_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;

        Ok(GenerationRecord {
            generation: self.generation + 1,
            best_fitness: evaluation.fitness,
            mean_fitness,
            best_phenotype: best.phenotype().to_vec(),
            best_objective: evaluation.objective,
        })
    }

    /// Build the next population from the evaluated current one.
    pub fn advance(&mut self) -> GaResult<()> {
        match self.config.replacement {
            Replacement::Generational { selection, elitism } => {
                self.advance_generational(selection, elitism)?;
            }
            Replacement::SteadyState => self.advance_steady_state()?,
        }

        self.generation += 1;
        self.phase = EnginePhase::Evaluate;
        Ok(())
    }

    /// Select a full pool, recombine it pairwise, mutate every child and
    /// replace the whole population.
    fn advance_generational(&mut self, selection: SelectionMethod, elitism: usize) -> GaResult<()> {
        let fitness = self.fitness_values();
        let size = self.population.len();

        let selected = match selection {
            SelectionMethod::Tournament { size: k } => {
                tournament(&fitness, k, size, &mut self.rng)?
            }
            SelectionMethod::Truncation { count } => truncation(&fitness, count)?
                .into_iter()
                .cycle()
                .take(size)
                .collect(),
            SelectionMethod::RouletteWheel => roulette(&fitness, size, &mut self.rng)?,
        };

        let pool: Vec<Chromosome> = selected
            .iter()
            .map(|&i| self.population[i].chromosome().clone())
            .collect();
        let offspring = recombine_pool(&pool, self.config.operators.crossover_rate, &mut self.rng)?;

        let mut next_gen = Vec::with_capacity(size);

        // Elitism: keep best individuals
        if elitism > 0 {
            for i in truncation(&fitness, elitism)? {
                let elite = self.population[i].chromosome().clone();
                next_gen.push(Genome::new(elite, &self.layout)?);
            }
        }

        for child in offspring.into_iter().take(size - next_gen.len()) {
            let mutated = mutate(
                &child,
                &self.layout,
                self.config.operators.mutation_rate,
                &mut self.rng,
            )?;
            next_gen.push(Genome::new(mutated, &self.layout)?);
        }

        self.population = next_gen;
        Ok(())
    }

    /// Breed the two fittest genomes and overwrite the two least fit slots.
    fn advance_steady_state(&mut self) -> GaResult<()> {
        let fitness = self.fitness_values();
        let parents = truncation(&fitness, 2)?;

        let (a, b) = crossover(
            self.population[parents[0]].chromosome(),
            self.population[parents[1]].chromosome(),
            self.config.operators.crossover_rate,
            &mut self.rng,
        )?;
        let rate = self.config.operators.mutation_rate;
        let a = mutate(&a, &self.layout, rate, &mut self.rng)?;
        let b = mutate(&b, &self.layout, rate, &mut self.rng)?;

        let slots = worst(&fitness, 2)?;
        trace!(
            "generation {}: parents {:?} replace slots {:?}",
            self.generation + 1,
            parents,
            slots
        );
        self.population[slots[0]] = Genome::new(a, &self.layout)?;
        self.population[slots[1]] = Genome::new(b, &self.layout)?;
        Ok(())
    }

    /// Re-evaluate the population and report its best individual.
    fn finish(&mut self, start_time: Instant) -> GaResult<EvolutionResult> {
        let summary = self.evaluate_population()?;
        self.phase = EnginePhase::Done;

        let best = self.best().ok_or(EvolutionError::EmptyFitnessSet)?;
        let best = BestIndividual {
            chromosome: best.chromosome().clone(),
            phenotype: summary.best_phenotype,
            fitness: summary.best_fitness,
            objective: summary.best_objective,
        };

        let elapsed = start_time.elapsed().as_secs_f64();
        info!(
            "evolution finished after {} generations: best objective {:.6} at {:?} ({:.2}s)",
            self.generation, best.objective, best.phenotype, elapsed
        );

        Ok(EvolutionResult {
            best,
            stats: EvolutionStats {
                seed: self.seed(),
                generations: self.generation,
                total_evaluations: self.evaluations,
                final_mean_fitness: summary.mean_fitness,
                elapsed_seconds: elapsed,
            },
        })
    }

    /// Run evolution with a per-generation callback.
    ///
    /// The callback sees each generation's record after evaluation and
    /// before the population advances.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> GaResult<EvolutionResult>
    where
        F: FnMut(&GenerationRecord),
    {
        self.run_with_observer(|record, _| callback(record))
    }

    /// Like [`Self::run_with_callback`], but the callback also sees the
    /// evaluated population the record summarizes.
    pub fn run_with_observer<F>(&mut self, mut callback: F) -> GaResult<EvolutionResult>
    where
        F: FnMut(&GenerationRecord, &[Genome]),
    {
        let start_time = Instant::now();
        info!(
            "starting evolution: {} individuals, {} generations, {:?}, seed {}",
            self.config.population.size,
            self.config.population.generations,
            self.config.replacement,
            self.seed()
        );

        self.evaluations = 0;
        self.initialize()?;

        for _ in 0..self.config.population.generations {
            let record = self.evaluate_population()?;
            debug!(
                "generation {}: best fitness {:.6}, mean fitness {:.6}",
                record.generation, record.best_fitness, record.mean_fitness
            );
            callback(&record, &self.population);

            self.advance()?;
        }

        self.finish(start_time)
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> GaResult<EvolutionResult> {
        self.run_with_callback(|_| {})
    }
}
