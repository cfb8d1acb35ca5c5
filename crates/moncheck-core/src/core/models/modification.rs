use super::restraint::{ModFunction, Restraint};
use crate::core::io::document::{Row, TableError};
use crate::core::io::traits::Record;
use std::collections::HashSet;

/// A row of the master modification index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModificationRecord {
    pub id: String,
    pub comp_id: String,
    pub group_id: String,
}

impl Record for ModificationRecord {
    const CATEGORY: &'static str = "_chem_mod.";
    const COLUMNS: &'static [&'static str] = &["id", "comp_id", "group_id"];

    fn from_row(row: &Row<'_>) -> Result<Self, TableError> {
        Ok(Self {
            id: row.string("id"),
            comp_id: row.string("comp_id"),
            group_id: row.string("group_id"),
        })
    }
}

/// An entry of `_chem_mod_atom`: adds, deletes or changes one atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomModificationOp {
    pub function: ModFunction,
    pub old_id: String,
    pub new_id: String,
}

impl Record for AtomModificationOp {
    const CATEGORY: &'static str = "_chem_mod_atom.";
    const COLUMNS: &'static [&'static str] = &["function", "atom_id", "new_atom_id"];

    fn from_row(row: &Row<'_>) -> Result<Self, TableError> {
        let function = ModFunction::parse(row.str("function"))
            .ok_or_else(|| row.invalid("function", "add, delete or change"))?;
        Ok(Self {
            function,
            old_id: row.string("atom_id"),
            new_id: row.string("new_atom_id"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChemMod {
    pub id: String,
    pub comp_id: String,
    pub group_id: String,
    pub atom_mods: Vec<AtomModificationOp>,
    pub restraints: Vec<Restraint>,
}

impl ChemMod {
    pub fn from_record(
        record: &ModificationRecord,
        atom_mods: Vec<AtomModificationOp>,
        restraints: Vec<Restraint>,
    ) -> Self {
        Self {
            id: record.id.clone(),
            comp_id: record.comp_id.clone(),
            group_id: record.group_id.clone(),
            atom_mods,
            restraints,
        }
    }

    pub fn block_name(id: &str) -> String {
        format!("mod_{}", id)
    }

    pub fn is_bound(&self) -> bool {
        !self.comp_id.is_empty()
    }

    /// New atom ids introduced by `add` ops; empty ids are skipped.
    pub fn added_atoms(&self) -> HashSet<&str> {
        self.atom_mods
            .iter()
            .filter(|op| op.function == ModFunction::Add && !op.new_id.is_empty())
            .map(|op| op.new_id.as_str())
            .collect()
    }

    pub fn deleted_atoms(&self) -> HashSet<&str> {
        self.atom_mods
            .iter()
            .filter(|op| op.function == ModFunction::Delete && !op.old_id.is_empty())
            .map(|op| op.old_id.as_str())
            .collect()
    }

    /// `(base ∪ added) − deleted`.
    pub fn effective_atoms<'a>(&'a self, base: impl IntoIterator<Item = &'a str>) -> HashSet<&'a str> {
        let deleted = self.deleted_atoms();
        base.into_iter()
            .chain(self.added_atoms())
            .filter(|id| !deleted.contains(id))
            .collect()
    }
}
