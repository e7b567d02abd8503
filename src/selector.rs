//! Seeded selection of candidate sites
//!
//! Planning is the only step that consumes a shared random stream, so it runs
//! once, sequentially, before any mutant is built.

use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::catalog::{MutationFamily, OperatorCatalog};
use crate::collector::collect;
use crate::error::{MutationError, Result};
use crate::random::planning_rng;

/// A (family, ordinal) pair eligible for mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSite {
    /// 1-based rank among nodes of the family's kind
    pub ordinal: usize,
    pub family: Arc<MutationFamily>,
}

impl CandidateSite {
    pub fn description(&self) -> String {
        format!("{} #{}", self.family.name(), self.ordinal)
    }
}

/// Which families the plan draws from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every site comes from the named family
    SingleFamily(String),
    /// Cycle over every catalog family that has candidates
    RoundRobin,
}

/// Mode names as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeName {
    #[default]
    SingleFamily,
    RoundRobin,
}

/// Ordered list of sites, one per requested mutant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPlan {
    seed: u64,
    sites: Vec<CandidateSite>,
}

impl SelectionPlan {
    /// Seed the plan was drawn from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn sites(&self) -> &[CandidateSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Build a selection plan of exactly `requested` sites.
///
/// Each active family's candidates are shuffled with the seeded stream, then
/// drawn cyclically, so asking for more mutants than there are distinct sites
/// revisits sites instead of failing.
pub fn plan(
    tree: &syn::File,
    catalog: &OperatorCatalog,
    requested: usize,
    seed: u64,
    mode: &SelectionMode,
) -> Result<SelectionPlan> {
    let families: Vec<Arc<MutationFamily>> = match mode {
        SelectionMode::SingleFamily(name) => vec![catalog.get(name)?],
        SelectionMode::RoundRobin => catalog.families().to_vec(),
    };

    let mut rng = planning_rng(seed);
    let mut pools = Vec::with_capacity(families.len());
    for family in &families {
        let mut candidates = collect(tree, family);
        candidates.shuffle(&mut rng);
        log::debug!(
            "family '{}': {} candidate(s), shuffled order {:?}",
            family.name(),
            candidates.len(),
            candidates
        );
        if !candidates.is_empty() {
            pools.push((Arc::clone(family), candidates));
        }
    }

    if requested == 0 {
        return Ok(SelectionPlan {
            seed,
            sites: Vec::new(),
        });
    }

    if pools.is_empty() {
        return Err(MutationError::NoCandidates {
            families: families.iter().map(|f| f.name().to_string()).collect(),
            requested,
        });
    }

    let sites = (0..requested)
        .map(|i| {
            let (family, candidates) = &pools[i % pools.len()];
            let round = i / pools.len();
            CandidateSite {
                ordinal: candidates[round % candidates.len()],
                family: Arc::clone(family),
            }
        })
        .collect();

    Ok(SelectionPlan { seed, sites })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = r#"
fn mix(a: i32, b: i32) -> i32 {
    let x = a + b + 1;
    let y = x * 2 + a;
    if x < y || a == b {
        x + y
    } else {
        y - x
    }
}
"#;

    fn tree() -> syn::File {
        syn::parse_file(SOURCE).unwrap()
    }

    fn ordinals(plan: &SelectionPlan) -> Vec<usize> {
        plan.sites().iter().map(|s| s.ordinal).collect()
    }

    fn single(name: &str) -> SelectionMode {
        SelectionMode::SingleFamily(name.to_string())
    }

    #[test]
    fn test_plan_is_deterministic() {
        let catalog = OperatorCatalog::standard().unwrap();
        let first = plan(&tree(), &catalog, 6, 42, &SelectionMode::RoundRobin).unwrap();
        let second = plan(&tree(), &catalog, 6, 42, &SelectionMode::RoundRobin).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed(), 42);
    }

    #[test]
    fn test_plan_draws_only_candidates() {
        let catalog = OperatorCatalog::standard().unwrap();
        let add = catalog.get("add").unwrap();
        let expected = collect(&tree(), &add);

        let plan = plan(&tree(), &catalog, expected.len(), 9, &single("add")).unwrap();
        let mut drawn = ordinals(&plan);
        drawn.sort_unstable();
        assert_eq!(drawn, expected);
        assert!(plan.sites().iter().all(|s| s.family.name() == "add"));
    }

    #[test]
    fn test_plan_wraps_around() {
        let catalog = OperatorCatalog::standard().unwrap();
        let distinct = collect(&tree(), &catalog.get("add").unwrap()).len();
        let requested = distinct * 2 + 1;

        let plan = plan(&tree(), &catalog, requested, 5, &single("add")).unwrap();
        assert_eq!(plan.len(), requested);

        let drawn = ordinals(&plan);
        for (i, ordinal) in drawn.iter().enumerate() {
            assert_eq!(*ordinal, drawn[i % distinct]);
        }
    }

    #[test]
    fn test_round_robin_cycles_families() {
        let catalog = OperatorCatalog::standard().unwrap();
        let active: Vec<String> = catalog
            .families()
            .iter()
            .filter(|f| !collect(&tree(), f).is_empty())
            .map(|f| f.name().to_string())
            .collect();

        let plan = plan(&tree(), &catalog, active.len() * 2, 1, &SelectionMode::RoundRobin).unwrap();
        let names: Vec<&str> = plan.sites().iter().map(|s| s.family.name()).collect();
        for (i, name) in names.iter().enumerate() {
            assert_eq!(*name, active[i % active.len()]);
        }
        assert!(!names.contains(&"compound-assign"));
    }

    #[test]
    fn test_no_candidates() {
        let catalog = OperatorCatalog::standard().unwrap();
        let tree = syn::parse_file("fn f(a: i32) -> i32 { a + 1 }").unwrap();
        let result = plan(&tree, &catalog, 1, 3, &single("comparison"));
        assert!(matches!(
            result,
            Err(MutationError::NoCandidates { requested: 1, ref families }) if families == &["comparison"]
        ));
    }

    #[test]
    fn test_zero_requested_is_empty_plan() {
        let catalog = OperatorCatalog::standard().unwrap();
        let tree = syn::parse_file("fn f() {}").unwrap();
        let plan = plan(&tree, &catalog, 0, 3, &SelectionMode::RoundRobin).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_unknown_family() {
        let catalog = OperatorCatalog::standard().unwrap();
        let result = plan(&tree(), &catalog, 1, 3, &single("xor"));
        assert!(matches!(result, Err(MutationError::UnknownFamily { .. })));
    }
}
