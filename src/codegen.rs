//! Source parsing, printing and mutant output
//!
//! This is the text boundary of the engine: `syn` turns source into a tree,
//! `prettyplease` turns a tree back into source, and mutants are written one
//! file per plan entry.

use std::path::{Path, PathBuf};

use crate::driver::RenderedMutant;
use crate::error::{MutationError, Result};

/// Parse Rust source into a tree
pub fn parse_source(source: &str, file: &Path) -> Result<syn::File> {
    syn::parse_file(source).map_err(|e| MutationError::ParseError {
        file: file.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read a file's text, keeping it for reuse by parallel workers
pub fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).map_err(|e| MutationError::FileReadError {
        file: file.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read and parse a source file
pub fn read_tree(file: &Path) -> Result<syn::File> {
    let source = read_source(file)?;
    parse_source(&source, file)
}

/// Generate source code from AST
pub fn render(tree: &syn::File) -> String {
    prettyplease::unparse(tree)
}

/// Where each mutant is written: `<dir>/<index>.<extension>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    pub dir: PathBuf,
    pub extension: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            extension: "rs".to_string(),
        }
    }
}

impl OutputNaming {
    pub fn new(dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Output path of the `index`-th mutant
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", index, self.extension))
    }

    /// Path of the generation manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join("manifest.json")
    }

    /// Create the output directory if needed
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| MutationError::WriteError {
            file: self.dir.clone(),
            error: e.to_string(),
        })
    }
}

/// Write one rendered mutant, returning the path it was written to
pub fn write_mutant(mutant: &RenderedMutant, naming: &OutputNaming) -> Result<PathBuf> {
    let path = naming.path_for(mutant.index);
    write_file(&path, &mutant.source)?;
    Ok(path)
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| MutationError::WriteError {
        file: path.to_path_buf(),
        error: e.to_string(),
    })
}
