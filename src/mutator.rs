//! Single-site mutation application
//!
//! Every mutant starts from a private clone of the original tree. The clone is
//! walked in the same order the indexer uses; when the counter for the family's
//! node kind reaches the site's ordinal, only that node's operator is replaced.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use syn::visit_mut::VisitMut;

use crate::catalog::MutationFamily;
use crate::error::MutationError;
use crate::operators::{NodeKind, OpSpans, OperatorKind};
use crate::selector::CandidateSite;

/// The operator change made at the mutated site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedMutation {
    pub original: OperatorKind,
    pub replacement: OperatorKind,
    /// Line of the operator (1-indexed)
    pub line: usize,
    /// Column of the operator (1-indexed)
    pub column: usize,
}

/// A full tree differing from its source at one operator at most
#[derive(Debug, Clone)]
pub struct Mutant {
    pub site: CandidateSite,
    pub tree: syn::File,
    /// `None` when the site could not be found and the tree was left unchanged
    pub mutation: Option<AppliedMutation>,
}

impl Mutant {
    pub fn is_mutated(&self) -> bool {
        self.mutation.is_some()
    }
}

/// Apply `site` to a fresh copy of `tree`, drawing the replacement from `rng`.
///
/// A site whose ordinal is out of range, or whose node the family does not
/// match, yields an unchanged copy and a warning: it means the plan was built
/// for a different tree.
pub fn apply<R: Rng + ?Sized>(tree: &syn::File, site: &CandidateSite, rng: &mut R) -> Mutant {
    let mut mutant = tree.clone();

    let mut applicator = MutationApplicator {
        family: &site.family,
        ordinal: site.ordinal,
        counter: 0,
        outcome: Outcome::Pending,
        rng,
    };
    applicator.visit_file_mut(&mut mutant);

    let mutation = match applicator.outcome {
        Outcome::Applied(mutation) => {
            log::debug!(
                "{}: '{}' -> '{}' at {}:{}",
                site.description(),
                mutation.original,
                mutation.replacement,
                mutation.line,
                mutation.column
            );
            Some(mutation)
        }
        Outcome::Mismatch(operator) => {
            log::warn!(
                "{}: node carries operator {:?} which family '{}' does not mutate; tree left unchanged",
                site.description(),
                operator.map(|op| op.symbol()),
                site.family.name()
            );
            None
        }
        Outcome::Pending => {
            let err = MutationError::OrdinalNotFound {
                family: site.family.name().to_string(),
                kind: site.family.kind(),
                ordinal: site.ordinal,
                occurrences: applicator.counter,
            };
            log::warn!("{}; tree left unchanged", err);
            None
        }
    };

    Mutant {
        site: site.clone(),
        tree: mutant,
        mutation,
    }
}

enum Outcome {
    Pending,
    Applied(AppliedMutation),
    Mismatch(Option<OperatorKind>),
}

struct MutationApplicator<'a, R: ?Sized> {
    family: &'a MutationFamily,
    ordinal: usize,
    counter: usize,
    outcome: Outcome,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> MutationApplicator<'_, R> {
    fn mutate(&mut self, node: &mut syn::ExprBinary) {
        let operator = OperatorKind::from_bin_op(&node.op);
        let original = match operator {
            Some(op) if self.family.matches(self.family.kind(), operator) => op,
            _ => {
                self.outcome = Outcome::Mismatch(operator);
                return;
            }
        };

        let Some(&replacement) = self.family.replacements(original).choose(&mut *self.rng) else {
            self.outcome = Outcome::Mismatch(operator);
            return;
        };

        let spans = OpSpans::of(&node.op);
        let (line, column) = spans.line_column();
        node.op = replacement.to_bin_op(spans);

        self.outcome = Outcome::Applied(AppliedMutation {
            original,
            replacement,
            line,
            column,
        });
    }
}

impl<R: Rng + ?Sized> VisitMut for MutationApplicator<'_, R> {
    fn visit_expr_binary_mut(&mut self, node: &mut syn::ExprBinary) {
        if !matches!(self.outcome, Outcome::Pending) {
            return; // Site already handled, nothing left to change
        }

        syn::visit_mut::visit_expr_binary_mut(self, node);
        if !matches!(self.outcome, Outcome::Pending) {
            return;
        }

        if NodeKind::of(&node.op) == Some(self.family.kind()) {
            self.counter += 1;
            if self.counter == self.ordinal {
                self.mutate(node);
            }
        }
    }
}
