use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePlacementConfig {
    pub moiety: Option<Vec<usize>>,
    pub radius: Option<f64>,
    pub ligands: Option<usize>,
    pub count: Option<usize>,
    pub weighted: Option<bool>,
    pub tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRetryConfig {
    pub max_attempts: Option<usize>,
    pub timeout_secs: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileJobConfig {
    pub out_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub route: Option<String>,
    pub memory: Option<String>,
    pub nproc_shared: Option<u32>,
    pub charge: Option<i32>,
    pub multiplicity: Option<u32>,
    pub checkpoint: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub placement: Option<FilePlacementConfig>,
    pub retry: Option<FileRetryConfig>,
    pub job: Option<FileJobConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
