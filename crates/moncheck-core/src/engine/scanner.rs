use super::error::LoadError;
use super::loader::{path_string, read_document, table_error};
use super::progress::{Progress, ProgressReporter};
use crate::core::io::document::Block;
use crate::core::models::component::{AtomRecord, ChemComp, ComponentRecord};
use crate::core::models::restraint::{Flavor, read_restraints};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const COMPONENT_LIST_BLOCK: &str = "comp_list";

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path_string(path),
        source,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn is_bucket_dir(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.chars().count() == 1 && !n.starts_with('.'))
}

fn is_component_file(path: &Path) -> bool {
    path.is_file() && !is_hidden(path) && path.extension().is_some_and(|e| e == "cif")
}

/// Lists `<root>/?/*.cif` in lexicographic path order.
pub fn discover_component_files(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| io_error(root, e))? {
        let bucket = entry.map_err(|e| io_error(root, e))?.path();
        if !is_bucket_dir(&bucket) {
            continue;
        }
        for file in fs::read_dir(&bucket).map_err(|e| io_error(&bucket, e))? {
            let path = file.map_err(|e| io_error(&bucket, e))?.path();
            if is_component_file(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn malformed(path: &Path, reason: impl Into<String>) -> LoadError {
    LoadError::MalformedComponent {
        path: path_string(path),
        reason: reason.into(),
    }
}

fn read_definition(path: &Path, block: &Block, record: ComponentRecord) -> Result<ChemComp, LoadError> {
    let atoms = block
        .records::<AtomRecord>()
        .map_err(|e| table_error(path, block, e))?;
    let restraints =
        read_restraints(block, Flavor::Component).map_err(|e| table_error(path, block, e))?;
    Ok(ChemComp {
        id: record.id,
        group: record.group,
        source: path.to_path_buf(),
        atoms,
        restraints,
    })
}

/// Reads every component declared by one component file.
///
/// # Errors
///
/// Returns [`LoadError::MalformedComponent`] when the `comp_list` block, its
/// `_chem_comp` entry, or the matching `comp_<id>` block is missing.
pub fn read_component_file(path: &Path) -> Result<Vec<ChemComp>, LoadError> {
    let doc = read_document(path)?;
    let list = doc
        .find_block(COMPONENT_LIST_BLOCK)
        .ok_or_else(|| malformed(path, "no 'comp_list' block"))?;
    let records = list
        .records::<ComponentRecord>()
        .map_err(|e| table_error(path, list, e))?;
    if records.is_empty() {
        return Err(malformed(path, "'comp_list' declares no _chem_comp entry"));
    }

    records
        .into_iter()
        .map(|record| {
            let block_name = ChemComp::block_name(&record.id);
            let block = doc
                .find_block(&block_name)
                .ok_or_else(|| malformed(path, format!("no '{}' block", block_name)))?;
            read_definition(path, block, record)
        })
        .collect()
}

pub struct ComponentScanner<'a> {
    root: &'a Path,
    reporter: &'a ProgressReporter<'a>,
}

impl<'a> ComponentScanner<'a> {
    pub fn new(root: &'a Path, reporter: &'a ProgressReporter<'a>) -> Self {
        Self { root, reporter }
    }

    /// Reads every component file below the root, in path order.
    #[instrument(skip_all, name = "component_scanner")]
    pub fn scan(&self) -> Result<Vec<ChemComp>, LoadError> {
        let files = discover_component_files(self.root)?;
        info!(
            files = files.len(),
            root = %self.root.display(),
            "Scanning component files."
        );

        self.reporter.report(Progress::TaskStart {
            total_steps: files.len() as u64,
        });
        let mut components = Vec::with_capacity(files.len());
        for path in &files {
            debug!(file = %path.display(), "Reading component file.");
            components.extend(read_component_file(path)?);
            self.reporter.report(Progress::TaskIncrement);
        }
        self.reporter.report(Progress::TaskFinish);

        info!(components = components.len(), "Component scan complete.");
        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn component_cif(id: &str, group: &str) -> String {
        format!(
            "\
data_comp_list
loop_
_chem_comp.id
_chem_comp.three_letter_code
_chem_comp.name
_chem_comp.group
{id} {id} '{id}' {group}
data_comp_{id}
loop_
_chem_comp_atom.comp_id
_chem_comp_atom.atom_id
_chem_comp_atom.type_symbol
_chem_comp_atom.type_energy
{id} N N NH1
{id} CA C CH1
loop_
_chem_comp_bond.comp_id
_chem_comp_bond.atom_id_1
_chem_comp_bond.atom_id_2
{id} N CA
"
        )
    }

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discover_only_matches_single_character_buckets() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "g/GLY.cif", "");
        write(dir.path(), "a/ALA.cif", "");
        write(dir.path(), "a/notes.txt", "");
        write(dir.path(), "a/.hidden.cif", "");
        write(dir.path(), "list/mon_lib_list.cif", "");
        write(dir.path(), "ener_lib.cif", "");

        let files = discover_component_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("a/ALA.cif"), PathBuf::from("g/GLY.cif")]);
    }

    #[test]
    fn read_component_file_extracts_group_atoms_and_restraints() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "a/ALA.cif", &component_cif("ALA", "peptide"));
        let comps = read_component_file(&path).unwrap();
        assert_eq!(comps.len(), 1);
        let ala = &comps[0];
        assert_eq!(ala.id, "ALA");
        assert_eq!(ala.group, "peptide");
        assert_eq!(ala.atoms.len(), 2);
        assert_eq!(ala.atoms[1].energy_type, "CH1");
        assert_eq!(ala.restraints.len(), 1);
        assert_eq!(ala.source, path);
    }

    #[test]
    fn missing_definition_block_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "z/ZN.cif",
            "data_comp_list\n_chem_comp.id ZN\n_chem_comp.group NON-POLYMER\n",
        );
        match read_component_file(&path) {
            Err(LoadError::MalformedComponent { reason, .. }) => {
                assert_eq!(reason, "no 'comp_ZN' block")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_comp_list_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "z/ZN.cif", "data_comp_ZN\n_chem_comp.id ZN\n");
        assert!(matches!(
            read_component_file(&path),
            Err(LoadError::MalformedComponent { .. })
        ));
    }

    #[test]
    fn scan_reads_components_in_path_order_and_reports_progress() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "g/GLY.cif", &component_cif("GLY", "peptide"));
        write(dir.path(), "a/ALA.cif", &component_cif("ALA", "peptide"));

        let steps = std::sync::Arc::new(std::sync::Mutex::new(0u64));
        let counter = steps.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            if let Progress::TaskIncrement = p {
                *counter.lock().unwrap() += 1;
            }
        }));

        let comps = ComponentScanner::new(dir.path(), &reporter).scan().unwrap();
        let ids: Vec<_> = comps.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["ALA", "GLY"]);
        assert_eq!(*steps.lock().unwrap(), 2);
    }
}
