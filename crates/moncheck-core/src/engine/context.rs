use super::loader::MasterIndex;
use crate::core::energy::catalog::EnergyTypeCatalog;
use crate::core::models::component::ChemComp;
use crate::core::models::library::MonomerLibrary;
use crate::core::utils::groups::KnownGroupSet;

/// Everything a session loads before the checks run.
///
/// The catalog and the library are only loaded when a check that needs them
/// is enabled.
#[derive(Debug, Clone, Default)]
pub struct LoadedDictionary {
    pub index: MasterIndex,
    pub components: Vec<ChemComp>,
    pub catalog: Option<EnergyTypeCatalog>,
    pub library: Option<MonomerLibrary>,
}

impl LoadedDictionary {
    /// Index component groups plus the given link/mod-only qualifiers.
    pub fn known_groups(&self, pseudo_groups: &[String]) -> KnownGroupSet {
        KnownGroupSet::new(
            self.index.components.iter().map(|c| c.group.as_str()),
            pseudo_groups.iter().map(String::as_str),
        )
    }
}
