//! Operator Mutant Generation for Rust
//!
//! This library generates mutants of a Rust source file: syntactically valid
//! variants that differ from the original by exactly one replaced operator.
//! Generation is reproducible: the same source, catalog, seed and count always
//! produce the same mutants.
//!
//! The pipeline is:
//!
//! 1. [`indexer::index`] numbers operator nodes in a fixed traversal order;
//! 2. [`collector::collect`] keeps the ordinals a [`MutationFamily`] can mutate;
//! 3. [`selector::plan`] shuffles the candidates with a seeded stream and draws
//!    one site per requested mutant, reusing sites cyclically when needed;
//! 4. [`mutator::apply`] replaces the operator at one site of a fresh tree copy;
//! 5. [`driver::generate`] yields the mutants of a plan lazily, in order.
//!
//! # Example Configuration
//!
//! ```yaml
//! version: "1.0"
//! settings:
//!   seed: 2873465893
//!   count: 10
//!   mode: single-family
//!   family: comparison
//! output:
//!   dir: mutants
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use operator_mutants::{codegen, generate, plan, OperatorCatalog, SelectionMode};
//! use std::path::Path;
//!
//! let tree = codegen::read_tree(Path::new("src/math.rs")).unwrap();
//! let catalog = OperatorCatalog::standard().unwrap();
//! let mode = SelectionMode::SingleFamily("add".to_string());
//! let plan = plan(&tree, &catalog, 5, 2873465893, &mode).unwrap();
//! for mutant in generate(&tree, &plan) {
//!     println!("{}", codegen::render(&mutant.tree));
//! }
//! ```

pub mod catalog;
pub mod codegen;
pub mod collector;
pub mod config;
pub mod driver;
pub mod error;
pub mod indexer;
pub mod mutator;
pub mod operators;
pub mod random;
pub mod report;
pub mod selector;

// Re-export main types at crate root
pub use catalog::{MutationFamily, OperatorCatalog};
pub use collector::collect;
pub use config::{Config, OutputSettings, Settings};
pub use driver::{generate, generate_parallel, RenderedMutant};
pub use error::{MutationError, Result};
pub use indexer::{index, IndexedNode, OrdinalMap};
pub use mutator::{apply, AppliedMutation, Mutant};
pub use operators::{NodeKind, OperatorKind};
pub use random::DEFAULT_SEED;
pub use report::GenerationReport;
pub use selector::{plan, CandidateSite, SelectionMode, SelectionPlan};
