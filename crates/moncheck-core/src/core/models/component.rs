use super::restraint::Restraint;
use crate::core::io::document::{Row, TableError};
use crate::core::io::traits::Record;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A component id and its group, as listed in either the master index or a
/// component's own file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRecord {
    pub id: String,
    pub group: String,
}

impl Record for ComponentRecord {
    const CATEGORY: &'static str = "_chem_comp.";
    const COLUMNS: &'static [&'static str] = &["id", "group"];

    fn from_row(row: &Row<'_>) -> Result<Self, TableError> {
        Ok(Self {
            id: row.string("id"),
            group: row.string("group"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRecord {
    pub atom_id: String,
    /// Empty when the file leaves the energy type null or undeclared.
    pub energy_type: String,
}

impl Record for AtomRecord {
    const CATEGORY: &'static str = "_chem_comp_atom.";
    const COLUMNS: &'static [&'static str] = &["atom_id", "?type_energy"];

    fn from_row(row: &Row<'_>) -> Result<Self, TableError> {
        Ok(Self {
            atom_id: row.string("atom_id"),
            energy_type: row.string("type_energy"),
        })
    }
}

/// A component definition as read from its own file.
#[derive(Debug, Clone, PartialEq)]
pub struct ChemComp {
    pub id: String,
    pub group: String,
    pub source: PathBuf,
    pub atoms: Vec<AtomRecord>,
    pub restraints: Vec<Restraint>,
}

impl ChemComp {
    pub fn atom_ids(&self) -> HashSet<&str> {
        self.atoms.iter().map(|a| a.atom_id.as_str()).collect()
    }

    /// Name of the data block holding the atoms and restraints.
    pub fn block_name(id: &str) -> String {
        format!("comp_{}", id)
    }

    /// Conventional location of a component file: `<root>/<first char, lowercase>/<id>.cif`.
    pub fn conventional_path(root: &Path, id: &str) -> Option<PathBuf> {
        let bucket = id.chars().next()?.to_ascii_lowercase();
        Some(root.join(bucket.to_string()).join(format!("{}.cif", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::cif::CifFile;

    #[test]
    fn atom_records_tolerate_missing_energy_type_column() {
        let doc = CifFile::read_str(
            "data_comp_ZN\nloop_\n_chem_comp_atom.comp_id\n_chem_comp_atom.atom_id\nZN ZN\n",
        )
        .unwrap();
        let atoms: Vec<AtomRecord> = doc.blocks[0].records().unwrap();
        assert_eq!(
            atoms,
            vec![AtomRecord {
                atom_id: "ZN".to_string(),
                energy_type: String::new()
            }]
        );
    }

    #[test]
    fn conventional_path_buckets_by_lowercase_first_character() {
        let root = Path::new("/monlib");
        assert_eq!(
            ChemComp::conventional_path(root, "ALA"),
            Some(PathBuf::from("/monlib/a/ALA.cif"))
        );
        assert_eq!(ChemComp::conventional_path(root, ""), None);
    }

    #[test]
    fn atom_ids_collects_declared_names() {
        let comp = ChemComp {
            id: "GLY".to_string(),
            group: "peptide".to_string(),
            source: PathBuf::from("g/GLY.cif"),
            atoms: ["N", "CA", "C", "O"]
                .iter()
                .map(|n| AtomRecord {
                    atom_id: n.to_string(),
                    energy_type: "C".to_string(),
                })
                .collect(),
            restraints: Vec::new(),
        };
        let ids = comp.atom_ids();
        assert_eq!(ids.len(), 4);
        assert!(ids.contains("CA"));
        assert!(!ids.contains("CB"));
    }
}
