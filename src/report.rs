//! Report generation for mutant generation runs
//!
//! This module formats and displays which site each mutant came from, and can
//! persist the same information as a JSON manifest next to the mutants.

use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::codegen::write_file;
use crate::driver::RenderedMutant;
use crate::error::{MutationError, Result};
use crate::operators::{NodeKind, OperatorKind};

/// Whether a planned site was mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutantStatus {
    /// The operator at the site was replaced
    Mutated,
    /// The site did not resolve; the mutant equals the source
    Unchanged,
}

/// One generated mutant
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub index: usize,
    pub family: String,
    /// Node kind the ordinal counts
    pub kind: NodeKind,
    pub ordinal: usize,
    pub status: MutantStatus,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub original: Option<OperatorKind>,
    pub replacement: Option<OperatorKind>,
    pub output: Option<PathBuf>,
}

impl ReportEntry {
    pub fn new(mutant: &RenderedMutant, output: Option<PathBuf>) -> Self {
        let mutation = mutant.mutation;
        Self {
            index: mutant.index,
            family: mutant.site.family.name().to_string(),
            kind: mutant.site.family.kind(),
            ordinal: mutant.site.ordinal,
            status: if mutation.is_some() {
                MutantStatus::Mutated
            } else {
                MutantStatus::Unchanged
            },
            line: mutation.map(|m| m.line),
            column: mutation.map(|m| m.column),
            original: mutation.map(|m| m.original),
            replacement: mutation.map(|m| m.replacement),
            output,
        }
    }
}

/// Summary of a generation run
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    pub source: PathBuf,
    pub seed: u64,
    pub mode: String,
    pub entries: Vec<ReportEntry>,
}

impl GenerationReport {
    pub fn new(source: &Path, seed: u64, mode: &str) -> Self {
        Self {
            source: source.to_path_buf(),
            seed,
            mode: mode.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Total number of mutants
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Mutants whose site was found and changed
    pub fn mutated(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == MutantStatus::Mutated)
            .count()
    }

    /// Mutants identical to the source because their site did not resolve
    pub fn unchanged(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == MutantStatus::Unchanged)
            .count()
    }

    /// Number of distinct tree nodes used.
    ///
    /// Families scanning the same node kind share ordinals, so `arithmetic #3`
    /// and `add #3` are one site.
    pub fn distinct_sites(&self) -> usize {
        let mut sites: Vec<(NodeKind, usize)> = self
            .entries
            .iter()
            .map(|e| (e.kind, e.ordinal))
            .collect();
        sites.sort_unstable();
        sites.dedup();
        sites.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as JSON
    pub fn save_manifest(&self, path: &Path) -> Result<()> {
        let json = self.to_json().map_err(|e| MutationError::WriteError {
            file: path.to_path_buf(),
            error: format!("cannot serialize manifest: {}", e),
        })?;
        write_file(path, &json)
    }

    /// Print the report to stdout
    pub fn print(&self) {
        println!();
        println!("{}", "Mutant Generation Report".bold());
        println!("{}", "=".repeat(60));
        println!(
            "{} (seed {}, {})",
            self.source.display(),
            self.seed,
            self.mode
        );
        println!();

        for entry in &self.entries {
            let status_str = match entry.status {
                MutantStatus::Mutated => "[MUTATED]".green().bold(),
                MutantStatus::Unchanged => "[UNCHANGED]".yellow().bold(),
            };

            let change = match (entry.original, entry.replacement) {
                (Some(original), Some(replacement)) => format!("{} -> {}", original, replacement),
                _ => "site not found".to_string(),
            };

            let location = match (entry.line, entry.column) {
                (Some(line), Some(column)) => format!("{}:{}:{}", self.source.display(), line, column),
                _ => self.source.display().to_string(),
            };

            println!(
                "{} {} {} #{} - {}",
                status_str,
                format!("{:>4}", entry.index).dimmed(),
                entry.family,
                entry.ordinal,
                change
            );
            match &entry.output {
                Some(output) => println!("        {} -> {}", location.dimmed(), output.display()),
                None => println!("        {}", location.dimmed()),
            }
        }

        println!();
        println!("{}", "Summary".bold());
        println!("{}", "-".repeat(40));
        println!("Total mutants:     {}", self.total());
        println!("Mutated:           {}", self.mutated());
        println!("Distinct sites:    {}", self.distinct_sites());
        if self.unchanged() > 0 {
            println!(
                "Unchanged:         {} {}",
                self.unchanged(),
                "(plan does not match the source tree)".dimmed()
            );
        }
    }
}
