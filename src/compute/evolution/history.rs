//! Per-generation history export.
//!
//! The engine keeps no history of its own; `HistoryRecorder` collects the
//! records a run emits so they can be written out as CSV, one row per
//! generation, for plotting best/mean fitness against generation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::schema::GenerationRecord;

use super::genome::Genome;
use super::selection::selection_probabilities;

/// Accumulates generation records from a run callback.
#[derive(Debug, Default, Clone)]
pub struct HistoryRecorder {
    records: Vec<GenerationRecord>,
}

impl HistoryRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    pub fn record(&mut self, record: &GenerationRecord) {
        self.records.push(record.clone());
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the collected records as CSV to `path`.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P, variable_names: &[&str]) -> io::Result<()> {
        save_csv(path, &self.records, variable_names)
    }
}

/// Write records as CSV.
///
/// Columns: `generation,best_fitness,mean_fitness,best_<name>...,best_objective`.
/// Phenotype columns are named after `variable_names`, falling back to
/// `x<i>` for unnamed variables.
pub fn write_csv<W: Write>(
    mut writer: W,
    records: &[GenerationRecord],
    variable_names: &[&str],
) -> io::Result<()> {
    let width = records
        .iter()
        .map(|r| r.best_phenotype.len())
        .max()
        .unwrap_or(variable_names.len());

    let mut header = vec![
        "generation".to_string(),
        "best_fitness".to_string(),
        "mean_fitness".to_string(),
    ];
    header.extend((0..width).map(|i| match variable_names.get(i) {
        Some(name) => format!("best_{name}"),
        None => format!("best_x{i}"),
    }));
    header.push("best_objective".to_string());
    writeln!(writer, "{}", header.join(","))?;

    for record in records {
        let mut row = vec![
            record.generation.to_string(),
            record.best_fitness.to_string(),
            record.mean_fitness.to_string(),
        ];
        row.extend(record.best_phenotype.iter().map(f64::to_string));
        row.push(record.best_objective.to_string());
        writeln!(writer, "{}", row.join(","))?;
    }

    writer.flush()
}

/// Write records as CSV to a file, creating or truncating it.
pub fn save_csv<P: AsRef<Path>>(
    path: P,
    records: &[GenerationRecord],
    variable_names: &[&str],
) -> io::Result<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), records, variable_names)
}

/// Write a fixed-width table of a population, one row per individual.
///
/// Columns are the index, the decoded variables, fitness, objective and
/// the fitness-proportionate selection share. Unevaluated genomes show NaN.
pub fn write_population_summary<W: Write>(
    mut writer: W,
    population: &[Genome],
    variable_names: &[&str],
) -> io::Result<()> {
    let width = population
        .iter()
        .map(|g| g.phenotype().len())
        .max()
        .unwrap_or(variable_names.len());

    let mut header = format!("{:>4} |", "idx");
    for i in 0..width {
        match variable_names.get(i) {
            Some(name) => header.push_str(&format!(" {name:>12}")),
            None => header.push_str(&format!(" {:>12}", format!("x{i}"))),
        }
    }
    header.push_str(&format!(
        " | {:>14} | {:>14} | {:>10}",
        "fitness", "objective", "share"
    ));
    writeln!(writer, "{header}")?;
    writeln!(writer, "{}", "-".repeat(header.len()))?;

    if population.is_empty() {
        return writer.flush();
    }

    let fitness: Vec<f64> = population
        .iter()
        .map(|g| g.fitness().unwrap_or(f64::NAN))
        .collect();
    let shares = selection_probabilities(&fitness).map_err(io::Error::other)?;

    for (i, (genome, share)) in population.iter().zip(&shares).enumerate() {
        let mut row = format!("{i:>4} |");
        for value in genome.phenotype() {
            row.push_str(&format!(" {value:>12.4}"));
        }
        let (fit, objective) = genome
            .evaluation()
            .map_or((f64::NAN, f64::NAN), |e| (e.fitness, e.objective));
        row.push_str(&format!(" | {fit:>14.4} | {objective:>14.4} | {share:>10.4}"));
        writeln!(writer, "{row}")?;
    }

    writer.flush()
}
