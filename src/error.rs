//! Error types for mutant generation

use std::path::PathBuf;
use thiserror::Error;

use crate::operators::{NodeKind, OperatorKind};

/// Errors that can occur while building catalogs, planning or generating mutants
#[derive(Debug, Error)]
pub enum MutationError {
    /// Failed to read source file
    #[error("Failed to read file '{}': {error}", file.display())]
    FileReadError { file: PathBuf, error: String },

    /// Failed to parse source file as Rust
    #[error("Failed to parse '{}' as Rust: {error}", file.display())]
    ParseError { file: PathBuf, error: String },

    /// Failed to write a mutant or manifest
    #[error("Failed to write '{}': {error}", file.display())]
    WriteError { file: PathBuf, error: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Mutants were requested but no active family has a candidate site
    #[error("No candidate sites for {requested} requested mutant(s) in families: {}", families.join(", "))]
    NoCandidates {
        families: Vec<String>,
        requested: usize,
    },

    /// A family name that is not part of the catalog
    #[error("Unknown mutation family '{name}'\n  Available families: {}", available.join(", "))]
    UnknownFamily {
        name: String,
        available: Vec<String>,
    },

    /// A rule map entry without any replacement
    #[error("Family '{family}' has no replacement for operator '{operator}'")]
    EmptyRuleMapEntry {
        family: String,
        operator: OperatorKind,
    },

    /// A rule map entry that lists its own source operator
    #[error("Family '{family}' maps operator '{operator}' onto itself")]
    IdentityRule {
        family: String,
        operator: OperatorKind,
    },

    /// An operator used on a node kind it cannot appear on
    #[error("Family '{family}' scans {expected} nodes but uses operator '{operator}' of kind {found}")]
    KindMismatch {
        family: String,
        operator: OperatorKind,
        expected: NodeKind,
        found: NodeKind,
    },

    /// A family definition that is structurally unusable
    #[error("Invalid mutation family '{family}': {reason}")]
    InvalidFamily { family: String, reason: String },

    /// Two families registered under the same name
    #[error("Mutation family '{family}' is defined more than once")]
    DuplicateFamily { family: String },

    /// A planned site that no longer resolves to a matching node
    #[error("Ordinal {ordinal} of family '{family}' not found ({occurrences} {kind} node(s) in tree)")]
    OrdinalNotFound {
        family: String,
        kind: NodeKind,
        ordinal: usize,
        occurrences: usize,
    },
}

/// Result type for mutation operations
pub type Result<T> = std::result::Result<T, MutationError>;
