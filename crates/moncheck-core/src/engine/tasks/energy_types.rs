use crate::core::energy::catalog::EnergyTypeCatalog;
use crate::core::models::component::ChemComp;
use crate::engine::violation::{CheckKind, Violation, ViolationKind};
use tracing::{info, instrument};

/// Flags every atom whose non-empty energy type is missing from `catalog`.
#[instrument(skip_all, name = "energy_types_task")]
pub fn run(scanned: &[ChemComp], catalog: &EnergyTypeCatalog) -> Vec<Violation> {
    info!(
        components = scanned.len(),
        catalog = catalog.len(),
        "Checking atom energy types."
    );

    let violations: Vec<_> = scanned
        .iter()
        .flat_map(|comp| {
            comp.atoms
                .iter()
                .filter(|atom| !atom.energy_type.is_empty() && !catalog.contains(&atom.energy_type))
                .map(move |atom| {
                    Violation::new(
                        CheckKind::EnergyTypes,
                        ViolationKind::UnknownEnergyType {
                            comp_id: comp.id.clone(),
                            atom_id: atom.atom_id.clone(),
                            energy_type: atom.energy_type.clone(),
                            file: comp.source.clone(),
                        },
                    )
                })
        })
        .collect();

    info!(violations = violations.len(), "Energy type check complete.");
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tasks::fixtures::comp;

    fn catalog() -> EnergyTypeCatalog {
        ["NH1", "CH1", "C", "O"].into_iter().collect()
    }

    #[test]
    fn known_and_empty_types_pass() {
        let ala = comp(
            "ALA",
            "peptide",
            &[("N", "NH1"), ("CA", "CH1"), ("C", "C"), ("ZN", "")],
            Vec::new(),
        );
        assert!(run(&[ala], &catalog()).is_empty());
    }

    #[test]
    fn unknown_type_names_component_atom_and_type() {
        let ala = comp("ALA", "peptide", &[("N", "NH1"), ("OXT", "OC")], Vec::new());
        let violations = run(&[ala], &catalog());
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "[energy-types] error: atom OXT of ALA has unknown energy type 'OC' (a/ALA.cif)"
        );
    }
}
