use super::violation::CheckKind;
use crate::core::utils::groups::{PSEUDO_GROUPS, vocabulary_sorted};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_RELATIVE_PATH: &str = "list/mon_lib_list.cif";
pub const ENERGY_LIB_RELATIVE_PATH: &str = "ener_lib.cif";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("No checks are enabled")]
    NoChecksEnabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryPaths {
    /// Directory holding the `?/` component buckets.
    pub root: PathBuf,
    pub index_path: PathBuf,
    pub energy_lib_path: PathBuf,
}

impl DictionaryPaths {
    /// The conventional monomer-library layout below `root`.
    pub fn conventional(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            index_path: root.join(INDEX_RELATIVE_PATH),
            energy_lib_path: root.join(ENERGY_LIB_RELATIVE_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    pub paths: DictionaryPaths,
    pub checks: BTreeSet<CheckKind>,
    /// Link/mod-only group qualifiers added to the known groups.
    pub pseudo_groups: Vec<String>,
    /// Groups a component may declare for itself.
    pub group_vocabulary: BTreeSet<String>,
    pub warnings_as_errors: bool,
}

impl ValidationConfig {
    pub fn is_enabled(&self, check: CheckKind) -> bool {
        self.checks.contains(&check)
    }

    pub fn needs_energy_catalog(&self) -> bool {
        self.is_enabled(CheckKind::EnergyTypes)
    }

    pub fn needs_library(&self) -> bool {
        self.is_enabled(CheckKind::MonomerCross)
    }
}

#[derive(Default)]
pub struct ValidationConfigBuilder {
    root: Option<PathBuf>,
    index_path: Option<PathBuf>,
    energy_lib_path: Option<PathBuf>,
    checks: Option<BTreeSet<CheckKind>>,
    skipped: BTreeSet<CheckKind>,
    pseudo_groups: Option<Vec<String>>,
    group_vocabulary: Option<BTreeSet<String>>,
    warnings_as_errors: bool,
}

impl ValidationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, path: PathBuf) -> Self {
        self.root = Some(path);
        self
    }
    pub fn index_path(mut self, path: PathBuf) -> Self {
        self.index_path = Some(path);
        self
    }
    pub fn energy_lib_path(mut self, path: PathBuf) -> Self {
        self.energy_lib_path = Some(path);
        self
    }
    /// Restricts the session to these checks. Defaults to all of them.
    pub fn only_checks(mut self, checks: impl IntoIterator<Item = CheckKind>) -> Self {
        self.checks = Some(checks.into_iter().collect());
        self
    }
    pub fn skip_check(mut self, check: CheckKind) -> Self {
        self.skipped.insert(check);
        self
    }
    pub fn pseudo_groups(mut self, groups: Vec<String>) -> Self {
        self.pseudo_groups = Some(groups);
        self
    }
    pub fn group_vocabulary(mut self, groups: impl IntoIterator<Item = String>) -> Self {
        self.group_vocabulary = Some(groups.into_iter().collect());
        self
    }
    pub fn warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    pub fn build(self) -> Result<ValidationConfig, ConfigError> {
        let root = self.root.ok_or(ConfigError::MissingParameter("root"))?;
        let conventional = DictionaryPaths::conventional(&root);
        let paths = DictionaryPaths {
            index_path: self.index_path.unwrap_or(conventional.index_path),
            energy_lib_path: self.energy_lib_path.unwrap_or(conventional.energy_lib_path),
            root,
        };

        let mut checks = self
            .checks
            .unwrap_or_else(|| CheckKind::ALL.into_iter().collect());
        checks.retain(|c| !self.skipped.contains(c));
        if checks.is_empty() {
            return Err(ConfigError::NoChecksEnabled);
        }

        Ok(ValidationConfig {
            paths,
            checks,
            pseudo_groups: self
                .pseudo_groups
                .unwrap_or_else(|| PSEUDO_GROUPS.iter().map(|g| g.to_string()).collect()),
            group_vocabulary: self.group_vocabulary.unwrap_or_else(|| {
                vocabulary_sorted().into_iter().map(str::to_string).collect()
            }),
            warnings_as_errors: self.warnings_as_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fills_conventional_paths_and_defaults() {
        let config = ValidationConfigBuilder::new()
            .root(PathBuf::from("/monlib"))
            .build()
            .unwrap();
        assert_eq!(
            config.paths.index_path,
            PathBuf::from("/monlib/list/mon_lib_list.cif")
        );
        assert_eq!(config.paths.energy_lib_path, PathBuf::from("/monlib/ener_lib.cif"));
        assert_eq!(config.checks.len(), CheckKind::ALL.len());
        assert_eq!(config.pseudo_groups, vec!["DNA/RNA", "pept"]);
        assert_eq!(config.group_vocabulary.len(), 9);
        assert!(!config.warnings_as_errors);
    }

    #[test]
    fn build_requires_root() {
        assert_eq!(
            ValidationConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("root"))
        );
    }

    #[test]
    fn explicit_paths_override_conventional_layout() {
        let config = ValidationConfigBuilder::new()
            .root(PathBuf::from("/monlib"))
            .energy_lib_path(PathBuf::from("/elsewhere/ener_lib.cif"))
            .build()
            .unwrap();
        assert_eq!(
            config.paths.energy_lib_path,
            PathBuf::from("/elsewhere/ener_lib.cif")
        );
    }

    #[test]
    fn only_and_skip_combine() {
        let config = ValidationConfigBuilder::new()
            .root(PathBuf::from("/monlib"))
            .only_checks([CheckKind::EnergyTypes, CheckKind::MonomerCross])
            .skip_check(CheckKind::MonomerCross)
            .build()
            .unwrap();
        assert!(config.is_enabled(CheckKind::EnergyTypes));
        assert!(!config.is_enabled(CheckKind::MonomerCross));
        assert!(config.needs_energy_catalog());
        assert!(!config.needs_library());
    }

    #[test]
    fn skipping_everything_is_rejected() {
        let mut builder = ValidationConfigBuilder::new().root(PathBuf::from("/monlib"));
        for check in CheckKind::ALL {
            builder = builder.skip_check(check);
        }
        assert_eq!(builder.build(), Err(ConfigError::NoChecksEnabled));
    }
}
