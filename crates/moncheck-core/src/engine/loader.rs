use super::error::LoadError;
use crate::core::io::cif::{CifError, CifFile};
use crate::core::io::document::{Block, Document, TableError};
use crate::core::io::traits::{Record, StructuredFile};
use crate::core::models::component::{ChemComp, ComponentRecord};
use crate::core::models::library::MonomerLibrary;
use crate::core::models::link::{ChemLink, LinkRecord};
use crate::core::models::modification::{AtomModificationOp, ChemMod, ModificationRecord};
use crate::core::models::restraint::{Flavor, read_restraints};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

pub const COMPONENT_INDEX_BLOCK: &str = "comp_list";
pub const LINK_INDEX_BLOCK: &str = "link_list";
pub const MODIFICATION_INDEX_BLOCK: &str = "mod_list";

/// The three authoritative tables of the master list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterIndex {
    pub components: Vec<ComponentRecord>,
    pub links: Vec<LinkRecord>,
    pub modifications: Vec<ModificationRecord>,
}

impl MasterIndex {
    /// `id -> group` for every indexed component.
    pub fn component_groups(&self) -> BTreeMap<&str, &str> {
        self.components
            .iter()
            .map(|c| (c.id.as_str(), c.group.as_str()))
            .collect()
    }
}

pub(crate) fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

pub(crate) fn read_document(path: &Path) -> Result<Document, LoadError> {
    let io_error = |source: io::Error| LoadError::Io {
        path: path_string(path),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_error)?;
    if metadata.is_dir() {
        return Err(io_error(io::Error::new(
            io::ErrorKind::IsADirectory,
            "expected a CIF file but found a directory",
        )));
    }
    CifFile::read_from_path(path).map_err(|e| match e {
        CifError::Io(source) => io_error(source),
        source => LoadError::Cif {
            path: path_string(path),
            source,
        },
    })
}

pub(crate) fn table_error(path: &Path, block: &Block, source: TableError) -> LoadError {
    LoadError::Table {
        path: path_string(path),
        block: block.name.clone(),
        source,
    }
}

fn required_block<'a>(doc: &'a Document, path: &Path, name: &str) -> Result<&'a Block, LoadError> {
    doc.find_block(name).ok_or_else(|| LoadError::MissingBlock {
        path: path_string(path),
        block: name.to_string(),
    })
}

fn read_records<R: Record>(block: &Block, path: &Path) -> Result<Vec<R>, LoadError> {
    block.records().map_err(|e| table_error(path, block, e))
}

/// Reads the component, link and modification index tables from the master document.
///
/// # Errors
///
/// Returns [`LoadError::MissingBlock`] if any of `comp_list`, `link_list` or
/// `mod_list` is absent, and a table error if a declared table lacks a column.
#[instrument(skip_all, name = "index_loader")]
pub fn load_index(doc: &Document, path: &Path) -> Result<MasterIndex, LoadError> {
    let comp_block = required_block(doc, path, COMPONENT_INDEX_BLOCK)?;
    let link_block = required_block(doc, path, LINK_INDEX_BLOCK)?;
    let mod_block = required_block(doc, path, MODIFICATION_INDEX_BLOCK)?;

    let index = MasterIndex {
        components: read_records(comp_block, path)?,
        links: read_records(link_block, path)?,
        modifications: read_records(mod_block, path)?,
    };

    info!(
        library = doc.global_value("_lib_name").unwrap_or("unnamed"),
        version = doc.global_value("_lib_version").unwrap_or("unknown"),
        components = index.components.len(),
        links = index.links.len(),
        modifications = index.modifications.len(),
        "Master index loaded."
    );
    Ok(index)
}

/// Assembles the library object from the master document and the scanned components.
///
/// Link and modification restraints are read from the `link_<id>` / `mod_<id>`
/// blocks of the master document; an absent block means an empty restraint set.
#[instrument(skip_all, name = "library_builder")]
pub fn build_library(
    doc: &Document,
    path: &Path,
    index: &MasterIndex,
    components: &[ChemComp],
) -> Result<MonomerLibrary, LoadError> {
    let mut library = MonomerLibrary::default();

    for comp in components {
        if library.components.contains_key(&comp.id) {
            warn!(
                comp_id = %comp.id,
                file = %comp.source.display(),
                "Component defined more than once; keeping the first definition."
            );
            continue;
        }
        library.components.insert(comp.id.clone(), comp.clone());
    }

    for record in &index.links {
        let restraints = match doc.find_block(&ChemLink::block_name(&record.id)) {
            Some(block) => {
                read_restraints(block, Flavor::Link).map_err(|e| table_error(path, block, e))?
            }
            None => {
                debug!(link_id = %record.id, "No definition block for link.");
                Vec::new()
            }
        };
        library
            .links
            .insert(record.id.clone(), ChemLink::from_record(record, restraints));
    }

    for record in &index.modifications {
        let (atom_mods, restraints) = match doc.find_block(&ChemMod::block_name(&record.id)) {
            Some(block) => (
                read_records::<AtomModificationOp>(block, path)?,
                read_restraints(block, Flavor::Modification)
                    .map_err(|e| table_error(path, block, e))?,
            ),
            None => {
                debug!(mod_id = %record.id, "No definition block for modification.");
                (Vec::new(), Vec::new())
            }
        };
        library.modifications.insert(
            record.id.clone(),
            ChemMod::from_record(record, atom_mods, restraints),
        );
    }

    info!(
        components = library.components.len(),
        links = library.links.len(),
        modifications = library.modifications.len(),
        "Monomer library assembled."
    );
    Ok(library)
}
