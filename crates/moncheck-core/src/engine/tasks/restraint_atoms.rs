use crate::core::models::component::ChemComp;
use crate::engine::violation::{CheckKind, Violation, ViolationKind};
use tracing::{info, instrument};

/// Flags component restraints naming atoms the component does not declare.
///
/// Empty names are skipped, which covers a chirality record with no centre.
#[instrument(skip_all, name = "restraint_atoms_task")]
pub fn run(scanned: &[ChemComp]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for comp in scanned {
        let declared = comp.atom_ids();
        for restraint in &comp.restraints {
            for (slot, atom) in restraint.slots() {
                if atom.atom_id.is_empty() || declared.contains(atom.atom_id.as_str()) {
                    continue;
                }
                violations.push(Violation::new(
                    CheckKind::RestraintAtoms,
                    ViolationKind::UnknownRestraintAtom {
                        comp_id: comp.id.clone(),
                        file: comp.source.clone(),
                        restraint: restraint.kind(),
                        slot,
                        atom_id: atom.atom_id.clone(),
                    },
                ));
            }
        }
    }

    info!(
        components = scanned.len(),
        violations = violations.len(),
        "Restraint atom check complete."
    );
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::restraint::{AtomRef, Restraint, RestraintKind};
    use crate::engine::tasks::fixtures::comp;
    use crate::engine::violation::Severity;

    fn bond(a: &str, b: &str) -> Restraint {
        Restraint::Bond([AtomRef::local(a), AtomRef::local(b)])
    }

    #[test]
    fn declared_atoms_pass() {
        let ala = comp(
            "ALA",
            "peptide",
            &[("N", "NH1"), ("CA", "CH1")],
            vec![bond("N", "CA")],
        );
        assert!(run(&[ala]).is_empty());
    }

    #[test]
    fn undeclared_atom_is_an_advisory_finding_naming_the_slot() {
        let ala = comp(
            "ALA",
            "peptide",
            &[("N", "NH1"), ("CA", "CH1")],
            vec![bond("N", "CA"), bond("CA", "CB")],
        );
        let violations = run(&[ala]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(
            violations[0].kind,
            ViolationKind::UnknownRestraintAtom {
                comp_id: "ALA".to_string(),
                file: "a/ALA.cif".into(),
                restraint: RestraintKind::Bond,
                slot: "atom_id_2",
                atom_id: "CB".to_string(),
            }
        );
    }

    #[test]
    fn empty_chirality_centre_is_allowed() {
        let zn = comp(
            "ZN",
            "NON-POLYMER",
            &[("ZN", ""), ("N1", ""), ("N2", ""), ("N3", "")],
            vec![Restraint::Chirality {
                centre: AtomRef::local(""),
                atoms: [AtomRef::local("N1"), AtomRef::local("N2"), AtomRef::local("N3")],
            }],
        );
        assert!(run(&[zn]).is_empty());
    }

    #[test]
    fn plane_and_torsion_slots_are_checked() {
        let c = comp(
            "PHE",
            "peptide",
            &[("CA", ""), ("CB", ""), ("CG", "")],
            vec![
                Restraint::Torsion([
                    AtomRef::local("CA"),
                    AtomRef::local("CB"),
                    AtomRef::local("CG"),
                    AtomRef::local("CD1"),
                ]),
                Restraint::Plane {
                    plane_id: "plan-1".to_string(),
                    atom: AtomRef::local("CZ"),
                },
            ],
        );
        let slots: Vec<_> = run(&[c])
            .into_iter()
            .map(|v| match v.kind {
                ViolationKind::UnknownRestraintAtom { slot, atom_id, .. } => (slot, atom_id),
                other => panic!("unexpected violation: {other}"),
            })
            .collect();
        assert_eq!(
            slots,
            vec![
                ("atom_id_4", "CD1".to_string()),
                ("atom_id", "CZ".to_string())
            ]
        );
    }
}
