use super::component::ChemComp;
use super::link::ChemLink;
use super::modification::ChemMod;
use std::collections::BTreeMap;

/// A fully materialized monomer library, keyed by id.
///
/// Components come from their own files, links and modifications from the
/// master list document. Ordered maps keep iteration, and therefore reports,
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct MonomerLibrary {
    pub components: BTreeMap<String, ChemComp>,
    pub links: BTreeMap<String, ChemLink>,
    pub modifications: BTreeMap<String, ChemMod>,
}

impl MonomerLibrary {
    pub fn component(&self, id: &str) -> Option<&ChemComp> {
        self.components.get(id)
    }

    pub fn link(&self, id: &str) -> Option<&ChemLink> {
        self.links.get(id)
    }

    pub fn modification(&self, id: &str) -> Option<&ChemMod> {
        self.modifications.get(id)
    }
}
