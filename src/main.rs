//! Bounded GA CLI - run the benchmark problems from the command line.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use bounded_ga::{
    EvolutionEngine, EvolutionError, HistoryRecorder,
    compute::evolution::{GenomeLayout, GenomeRng, mutation_drift, write_population_summary},
    problems::Problem,
    schema::{Encoding, EvolutionConfig},
};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use thiserror::Error;

/// Bounded GA - genetic search over bounded parameter spaces
#[derive(Parser, Debug)]
#[command(name = "bounded-ga")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a benchmark problem
    Run {
        /// Problem to optimize
        problem: ProblemArg,

        #[command(flatten)]
        common: CommonArgs,

        /// Crossover probability
        #[arg(long)]
        crossover: Option<f64>,

        /// Use real-valued chromosomes with Gaussian mutation
        #[arg(long)]
        real: bool,

        /// Standard deviation of Gaussian mutation noise (default: 1.0)
        #[arg(long, requires = "real")]
        sigma: Option<f64>,

        /// Write per-generation history as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the initial and final population as tables
        #[arg(long)]
        summary: bool,
    },

    /// Mutate a random population without selection and show what moves
    Drift {
        /// Problem whose variables and preset to use
        problem: ProblemArg,

        #[command(flatten)]
        common: CommonArgs,

        /// Standard deviation of Gaussian mutation noise; switches to
        /// real-valued chromosomes
        #[arg(long)]
        sigma: Option<f64>,
    },

    /// Print a problem's preset configuration as JSON
    ExampleConfig {
        /// Problem whose preset to print
        problem: ProblemArg,
    },
}

/// Options shared by `run` and `drift`.
#[derive(ClapArgs, Debug)]
struct CommonArgs {
    /// JSON configuration replacing the problem's preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of generations
    #[arg(short, long)]
    generations: Option<usize>,

    /// Population size
    #[arg(short, long)]
    population: Option<usize>,

    /// Random seed (default: random, printed at start)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Per-gene mutation probability
    #[arg(long)]
    mutation: Option<f64>,

    /// Suppress per-generation output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProblemArg {
    /// Minimize the cosine bowl over [-5.12, 5.12]²
    CosineBowl,
    /// Maximize the volume of a box
    BoxVolume,
    /// Maximize the protein share of a four-ingredient bar
    ProteinBar,
}

impl From<ProblemArg> for Problem {
    fn from(arg: ProblemArg) -> Self {
        match arg {
            ProblemArg::CosineBowl => Problem::CosineBowl,
            ProblemArg::BoxVolume => Problem::BoxVolume,
            ProblemArg::ProteinBar => Problem::ProteinBar,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("reading {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("writing {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("writing output: {0}")]
    Output(#[from] io::Error),
    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Evolution(#[from] EvolutionError),
    #[error("config defines {actual} variables, {problem} needs {expected}")]
    VariableCount {
        problem: Problem,
        expected: usize,
        actual: usize,
    },
}

/// Build the run configuration from the preset or a file, then apply
/// command-line overrides. `sigma` switches to real-valued chromosomes.
fn load_config(
    problem: Problem,
    common: &CommonArgs,
    crossover: Option<f64>,
    sigma: Option<f64>,
) -> Result<EvolutionConfig, CliError> {
    let mut config = match &common.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text)?
        }
        None => problem.default_config()?,
    };

    if let Some(generations) = common.generations {
        config.population.generations = generations;
    }
    if let Some(size) = common.population {
        config.population.size = size;
    }
    if common.seed.is_some() {
        config.random_seed = common.seed;
    }
    if let Some(rate) = common.mutation {
        config.operators.mutation_rate = rate;
    }
    if let Some(rate) = crossover {
        config.operators.crossover_rate = rate;
    }
    if let Some(sigma) = sigma {
        config.encoding = Encoding::Real { sigma };
    }

    let expected = problem.variable_names().len();
    if config.variables.len() != expected {
        return Err(CliError::VariableCount {
            problem,
            expected,
            actual: config.variables.len(),
        });
    }

    Ok(config)
}

fn print_header(problem: Problem, config: &EvolutionConfig, seed: u64) {
    println!("Bounded GA: {problem}");
    println!("====================");
    println!(
        "Population: {}, generations: {}",
        config.population.size, config.population.generations
    );
    println!(
        "Crossover: {}, mutation: {}",
        config.operators.crossover_rate, config.operators.mutation_rate
    );
    println!("Encoding: {:?}", config.encoding);
    println!("Replacement: {:?}", config.replacement);
    println!("Seed: {seed}");
    println!();
}

fn format_params(names: &[&str], values: &[f64]) -> String {
    names
        .iter()
        .zip(values)
        .map(|(name, value)| format!("{name}={value:.4}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run(
    problem: Problem,
    config: EvolutionConfig,
    quiet: bool,
    csv: Option<PathBuf>,
    summary: bool,
) -> Result<(), CliError> {
    let names = problem.variable_names();

    let mut engine = EvolutionEngine::new(config, problem.objective())?;
    print_header(problem, engine.config(), engine.seed());

    let mut history = HistoryRecorder::new();
    let mut output_error = None;

    let result = engine.run_with_observer(|record, population| {
        if summary && record.generation == 1 {
            println!("Initial population:");
            if let Err(e) = write_population_summary(io::stdout().lock(), population, names) {
                output_error.get_or_insert(e);
            }
            println!();
        }
        if !quiet {
            println!(
                "Generation {}: best={:.6} mean={:.6} {} f={:.6}",
                record.generation,
                record.best_fitness,
                record.mean_fitness,
                format_params(names, &record.best_phenotype),
                record.best_objective
            );
        }
        history.record(record);
    })?;
    if let Some(e) = output_error {
        return Err(e.into());
    }

    if summary {
        println!();
        println!("Final population:");
        write_population_summary(io::stdout().lock(), engine.population(), names)?;
    }

    println!();
    println!("Best solution:");
    for (name, value) in names.iter().zip(&result.best.phenotype) {
        println!("  {name} = {value:.6}");
    }
    println!("  objective = {:.6}", result.best.objective);
    println!("  chromosome = {}", result.best.chromosome.to_gene_string());
    println!(
        "Evaluations: {} in {:.2}s (seed {})",
        result.stats.total_evaluations, result.stats.elapsed_seconds, result.stats.seed
    );

    if let Some(path) = csv {
        history
            .save_csv(&path, names)
            .map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
        println!("History written to {}", path.display());
    }

    Ok(())
}

fn drift(problem: Problem, mut config: EvolutionConfig, quiet: bool) -> Result<(), CliError> {
    config.validate().map_err(EvolutionError::from)?;
    let names = problem.variable_names();
    let seed = *config.random_seed.get_or_insert_with(rand::random);
    print_header(problem, &config, seed);

    let layout = GenomeLayout::new(config.variables.clone(), config.encoding);
    let mut rng = GenomeRng::new(seed);
    let mut moved = 0usize;

    mutation_drift(
        &layout,
        config.population.size,
        config.population.generations,
        config.operators.mutation_rate,
        &mut rng,
        |change| {
            moved += 1;
            if !quiet {
                println!("Generation {:02}, individual {:04}:", change.generation, change.index);
                println!("  before: {}", format_params(names, &change.before));
                println!("  after:  {}", format_params(names, &change.after));
            }
        },
    )?;

    println!();
    println!(
        "{moved} mutations moved an individual over {} generations",
        config.population.generations
    );
    Ok(())
}

fn print_example_config(problem: Problem) -> Result<(), CliError> {
    let config = problem.default_config()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            problem,
            common,
            crossover,
            real,
            sigma,
            csv,
            summary,
        } => {
            let problem = Problem::from(problem);
            let sigma = real.then(|| sigma.unwrap_or(1.0));
            load_config(problem, &common, crossover, sigma)
                .and_then(|config| run(problem, config, common.quiet, csv, summary))
        }
        Commands::Drift {
            problem,
            common,
            sigma,
        } => {
            let problem = Problem::from(problem);
            load_config(problem, &common, None, sigma)
                .and_then(|config| drift(problem, config, common.quiet))
        }
        Commands::ExampleConfig { problem } => print_example_config(problem.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
