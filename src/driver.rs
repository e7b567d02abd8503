//! Mutant generation from a selection plan
//!
//! Each plan entry is applied to its own copy of the original tree with its own
//! random stream, so mutants are independent of each other and of the order in
//! which they are consumed.

use std::path::Path;

use rayon::prelude::*;

use crate::codegen::render;
use crate::error::{MutationError, Result};
use crate::mutator::{apply, AppliedMutation, Mutant};
use crate::random::mutant_rng;
use crate::selector::{CandidateSite, SelectionPlan};

/// Lazily produce one mutant per plan entry, in plan order
pub fn generate<'a>(
    tree: &'a syn::File,
    plan: &'a SelectionPlan,
) -> impl Iterator<Item = Mutant> + 'a {
    plan.sites()
        .iter()
        .enumerate()
        .map(move |(index, site)| apply(tree, site, &mut mutant_rng(plan.seed(), index)))
}

/// A mutant already printed back to source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMutant {
    /// Position in the selection plan (0-based)
    pub index: usize,
    pub site: CandidateSite,
    pub source: String,
    pub mutation: Option<AppliedMutation>,
}

impl RenderedMutant {
    pub fn new(index: usize, mutant: Mutant) -> Self {
        Self {
            index,
            source: render(&mutant.tree),
            site: mutant.site,
            mutation: mutant.mutation,
        }
    }
}

/// Produce and render every mutant of the plan on the rayon thread pool.
///
/// Syntax trees cannot cross threads, so each worker parses `source` itself;
/// ordinals are a function of tree shape only, so every worker resolves the
/// plan's sites to the same nodes. Each rendered mutant is handed to `sink`
/// on the worker that built it and dropped afterwards; only the values `sink`
/// returns are collected, in plan order.
pub fn generate_parallel<T, F>(
    source: &str,
    file: &Path,
    plan: &SelectionPlan,
    sink: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(RenderedMutant) -> Result<T> + Sync,
{
    plan.sites()
        .par_iter()
        .enumerate()
        .map_init(
            || syn::parse_file(source),
            |parsed, (index, site)| {
                let tree = parsed.as_ref().map_err(|e| MutationError::ParseError {
                    file: file.to_path_buf(),
                    error: e.to_string(),
                })?;
                let mutant = apply(tree, site, &mut mutant_rng(plan.seed(), index));
                sink(RenderedMutant::new(index, mutant))
            },
        )
        .collect()
}
