use crate::cli::ReportFormat;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilePathsConfig {
    pub root: Option<PathBuf>,
    pub index: Option<PathBuf>,
    #[serde(rename = "energy-lib")]
    pub energy_lib: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileChecksConfig {
    pub only: Option<Vec<String>>,
    pub skip: Option<Vec<String>>,
    #[serde(rename = "warnings-as-errors")]
    pub warnings_as_errors: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileGroupsConfig {
    #[serde(rename = "pseudo-groups")]
    pub pseudo_groups: Option<Vec<String>>,
    pub vocabulary: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileReportConfig {
    pub format: Option<ReportFormat>,
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub paths: Option<FilePathsConfig>,
    pub checks: Option<FileChecksConfig>,
    pub groups: Option<FileGroupsConfig>,
    pub report: Option<FileReportConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
