//! The individual consistency checks.
//!
//! Each task takes the immutable tables produced by loading and returns the
//! violations it found, in discovery order. Tasks never fail and never stop at
//! the first finding; deciding whether a session passed is left to the report.

pub mod energy_types;
pub mod group_consistency;
pub mod group_vocabulary;
pub mod monomer_cross;
pub mod referential;
pub mod restraint_atoms;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::models::component::{AtomRecord, ChemComp, ComponentRecord};
    use crate::core::models::restraint::Restraint;
    use std::path::PathBuf;

    pub fn record(id: &str, group: &str) -> ComponentRecord {
        ComponentRecord {
            id: id.to_string(),
            group: group.to_string(),
        }
    }

    pub fn comp(id: &str, group: &str, atoms: &[(&str, &str)], restraints: Vec<Restraint>) -> ChemComp {
        ChemComp {
            id: id.to_string(),
            group: group.to_string(),
            source: PathBuf::from(format!("{}/{}.cif", id.chars().next().unwrap().to_ascii_lowercase(), id)),
            atoms: atoms
                .iter()
                .map(|(atom_id, energy_type)| AtomRecord {
                    atom_id: atom_id.to_string(),
                    energy_type: energy_type.to_string(),
                })
                .collect(),
            restraints,
        }
    }
}
