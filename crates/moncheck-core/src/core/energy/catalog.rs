use crate::core::io::cif::{CifError, CifFile};
use crate::core::io::document::{Document, TableError};
use crate::core::io::traits::StructuredFile;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

const ENERGY_BLOCK: &str = "energy";
const ENERGY_CATEGORY: &str = "_lib_atom.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnergyTypeCatalog {
    types: BTreeSet<String>,
}

impl EnergyTypeCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let doc = CifFile::read_from_path(path).map_err(|e| CatalogLoadError::Cif {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_document(&doc).map_err(|e| e.with_path(path))
    }

    pub fn from_document(doc: &Document) -> Result<Self, CatalogLoadError> {
        let block = doc
            .find_block(ENERGY_BLOCK)
            .ok_or(CatalogLoadError::MissingBlock {
                path: String::new(),
                block: ENERGY_BLOCK,
            })?;
        let table = block
            .find(ENERGY_CATEGORY, &["type"])
            .map_err(|e| CatalogLoadError::Table {
                path: String::new(),
                source: e,
            })?;
        let types = table
            .rows()
            .map(|row| row.string("type"))
            .filter(|t| !t.is_empty())
            .collect();
        Ok(Self { types })
    }

    pub fn contains(&self, energy_type: &str) -> bool {
        self.types.contains(energy_type)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EnergyTypeCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("CIF error for '{path}': {source}")]
    Cif { path: String, source: CifError },
    #[error("Energy-type catalog '{path}' has no '{block}' block")]
    MissingBlock { path: String, block: &'static str },
    #[error("Energy-type table error for '{path}': {source}")]
    Table { path: String, source: TableError },
}

impl CatalogLoadError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_string_lossy().to_string();
        match self {
            CatalogLoadError::Cif { source, .. } => CatalogLoadError::Cif { path, source },
            CatalogLoadError::MissingBlock { block, .. } => {
                CatalogLoadError::MissingBlock { path, block }
            }
            CatalogLoadError::Table { source, .. } => CatalogLoadError::Table { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("ener_lib.cif");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_reads_all_energy_types() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(
            &dir,
            "\
data_energy
loop_
_lib_atom.type
_lib_atom.weight
_lib_atom.hb_type
CH1 13.019 N
NH1 15.015 D
OH1 17.007 B
",
        );
        let catalog = EnergyTypeCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("NH1"));
        assert!(!catalog.contains("NH4"));
    }

    #[test]
    fn load_fails_without_energy_block() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(&dir, "data_other\n_x.y 1\n");
        let err = EnergyTypeCatalog::load(&path).unwrap_err();
        match err {
            CatalogLoadError::MissingBlock { path: p, block } => {
                assert_eq!(block, "energy");
                assert!(p.ends_with("ener_lib.cif"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reports_syntax_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(&dir, "data_energy\nloop_\n");
        assert!(matches!(
            EnergyTypeCatalog::load(&path),
            Err(CatalogLoadError::Cif { .. })
        ));
    }

    #[test]
    fn catalog_can_be_collected_from_tokens() {
        let catalog: EnergyTypeCatalog = ["C", "CH2"].into_iter().collect();
        assert!(catalog.contains("CH2"));
        assert!(!catalog.is_empty());
    }
}
