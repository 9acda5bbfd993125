use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{Environment, IdentifierKind, SortOrder};

pub const INPUT_DIR_CONFIG: &str = "config.yaml";
pub const DEFAULT_HGNC_FILE: &str = "hgnc_complete_set.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostProcessing {
    #[serde(default)]
    pub score_order: SortOrder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Phen2GeneToolSpecificConfigurations {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub phen2gene_python_executable: Option<PathBuf>,
    /// HGNC complete set; relative paths resolve against the input directory.
    #[serde(default)]
    pub hgnc_data: Option<PathBuf>,
    #[serde(default)]
    pub identifier: IdentifierKind,
    pub post_process: PostProcessing,
}

/// `config.yaml` found in the tool's input directory.
#[derive(Debug, Clone, Deserialize)]
pub struct InputDirConfig {
    pub tool: String,
    #[serde(default)]
    pub tool_version: String,
    pub tool_specific_configuration_options: Phen2GeneToolSpecificConfigurations,
}

impl InputDirConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: origin.display().to_string(),
            source,
        })
    }

    pub fn hgnc_data_path(&self, input_dir: &Path) -> PathBuf {
        match &self.tool_specific_configuration_options.hgnc_data {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => input_dir.join(path),
            None => input_dir.join(DEFAULT_HGNC_FILE),
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
