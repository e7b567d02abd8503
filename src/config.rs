//! Configuration file parsing for mutant generation

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::catalog::OperatorCatalog;
use crate::codegen::OutputNaming;
use crate::error::MutationError;
use crate::random::DEFAULT_SEED;
use crate::selector::{ModeName, SelectionMode};

/// Top-level configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Selection settings
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Seed of the selection stream
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of mutants to generate
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub mode: ModeName,
    /// Family used in single-family mode
    #[serde(default = "default_family")]
    pub family: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            count: default_count(),
            mode: ModeName::default(),
            family: default_family(),
        }
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_count() -> usize {
    1
}

fn default_family() -> String {
    "arithmetic".to_string()
}

/// Where and how mutants are written
#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Also write `manifest.json`
    #[serde(default)]
    pub manifest: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extension: default_extension(),
            manifest: false,
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    "rs".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            settings: Settings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, MutationError> {
        let content = std::fs::read_to_string(path).map_err(|e| MutationError::ConfigError {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::from_yaml(&content).map_err(|e| MutationError::ConfigError {
            message: format!("Failed to parse config file '{}': {}", path.display(), e),
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Selection mode described by the settings
    pub fn selection_mode(&self) -> SelectionMode {
        match self.settings.mode {
            ModeName::SingleFamily => SelectionMode::SingleFamily(self.settings.family.clone()),
            ModeName::RoundRobin => SelectionMode::RoundRobin,
        }
    }

    pub fn output_naming(&self) -> OutputNaming {
        OutputNaming::new(&self.output.dir, &self.output.extension)
    }

    /// Validate the configuration against a catalog
    pub fn validate(&self, catalog: &OperatorCatalog) -> Result<(), Vec<MutationError>> {
        let mut errors = Vec::new();

        if self.settings.mode == ModeName::SingleFamily {
            if let Err(e) = catalog.get(&self.settings.family) {
                errors.push(e);
            }
        }

        if self.output.extension.trim_start_matches('.').is_empty() {
            errors.push(MutationError::ConfigError {
                message: "output extension must not be empty".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1.0"
settings:
  seed: 17
  count: 25
  mode: round-robin
output:
  dir: out/mutants
  extension: txt
  manifest: true
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.settings.seed, 17);
        assert_eq!(config.settings.count, 25);
        assert_eq!(config.selection_mode(), SelectionMode::RoundRobin);
        assert_eq!(
            config.output_naming().path_for(3),
            PathBuf::from("out/mutants/3.txt")
        );
        assert!(config.output.manifest);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("version: \"1.0\"\n").unwrap();
        assert_eq!(config.settings.seed, DEFAULT_SEED);
        assert_eq!(config.settings.count, 1);
        assert_eq!(
            config.selection_mode(),
            SelectionMode::SingleFamily("arithmetic".to_string())
        );
        assert_eq!(config.output_naming(), OutputNaming::default());
        assert!(!config.output.manifest);
    }

    #[test]
    fn test_validate_unknown_family() {
        let yaml = r#"
version: "1.0"
settings:
  family: exponent
output:
  extension: ""
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let catalog = OperatorCatalog::standard().unwrap();
        let errors = config.validate(&catalog).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], MutationError::UnknownFamily { .. }));
    }

    #[test]
    fn test_round_robin_ignores_family() {
        let yaml = r#"
version: "1.0"
settings:
  mode: round-robin
  family: exponent
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let catalog = OperatorCatalog::standard().unwrap();
        assert!(config.validate(&catalog).is_ok());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let yaml = r#"
version: "1.0"
settings:
  mode: everything
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }
}
