use crate::core::models::library::MonomerLibrary;
use crate::core::models::link::ChemLink;
use crate::core::models::modification::ChemMod;
use crate::core::models::restraint::{ModFunction, Owner, Side};
use crate::engine::violation::{CheckKind, Violation, ViolationKind};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

fn violation(kind: ViolationKind) -> Violation {
    Violation::new(CheckKind::MonomerCross, kind)
}

fn referenced_on_side(link: &ChemLink, side: Side) -> BTreeSet<&str> {
    link.restraints
        .iter()
        .flat_map(|r| r.atoms())
        .filter(|a| a.owner == Owner::Side(side) && !a.atom_id.is_empty())
        .map(|a| a.atom_id.as_str())
        .collect()
}

fn check_link(library: &MonomerLibrary, link: &ChemLink, violations: &mut Vec<Violation>) {
    if link.is_generic() {
        return;
    }
    for side in Side::BOTH {
        let participant = link.side(side);
        if !participant.is_bound() {
            continue;
        }
        let Some(comp) = library.component(&participant.comp_id) else {
            debug!(link_id = %link.id, comp_id = %participant.comp_id, "Linked component is not in the library.");
            continue;
        };
        let atoms = comp.atom_ids();
        let unknown: Vec<String> = referenced_on_side(link, side)
            .into_iter()
            .filter(|id| !atoms.contains(id))
            .map(str::to_string)
            .collect();
        if !unknown.is_empty() {
            violations.push(violation(ViolationKind::UnknownAtomInLink {
                link_id: link.id.clone(),
                side,
                comp_id: participant.comp_id.clone(),
                atom_ids: unknown,
            }));
        }
    }
}

fn check_modification(library: &MonomerLibrary, modification: &ChemMod, violations: &mut Vec<Violation>) {
    if modification.is_bound() {
        match library.component(&modification.comp_id) {
            Some(comp) => {
                let effective =
                    modification.effective_atoms(comp.atoms.iter().map(|a| a.atom_id.as_str()));
                let unknown: BTreeSet<&str> = modification
                    .restraints
                    .iter()
                    .flat_map(|r| r.atoms())
                    .filter(|a| a.owner != Owner::Function(ModFunction::Delete))
                    .map(|a| a.atom_id.as_str())
                    .filter(|id| !id.is_empty() && !effective.contains(id))
                    .collect();
                if !unknown.is_empty() {
                    violations.push(violation(ViolationKind::UnknownAtomInMod {
                        mod_id: modification.id.clone(),
                        comp_id: modification.comp_id.clone(),
                        atom_ids: unknown.into_iter().map(str::to_string).collect(),
                    }));
                }
            }
            None => {
                debug!(mod_id = %modification.id, comp_id = %modification.comp_id, "Modified component is not in the library.");
            }
        }
    }

    for op in &modification.atom_mods {
        if op.function == ModFunction::Add && op.new_id.is_empty() {
            violations.push(violation(ViolationKind::MissingNewAtomId {
                mod_id: modification.id.clone(),
                old_id: op.old_id.clone(),
            }));
        }
    }
}

/// Resolves link and modification restraint atoms against the atoms of the
/// components they are bound to.
#[instrument(skip_all, name = "monomer_cross_task")]
pub fn run(library: &MonomerLibrary) -> Vec<Violation> {
    info!(
        links = library.links.len(),
        modifications = library.modifications.len(),
        "Cross-checking link and modification restraints."
    );

    let mut violations = Vec::new();
    for link in library.links.values() {
        check_link(library, link, &mut violations);
    }
    for modification in library.modifications.values() {
        check_modification(library, modification, &mut violations);
    }

    info!(violations = violations.len(), "Monomer cross check complete.");
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::link::LinkSide;
    use crate::core::models::modification::AtomModificationOp;
    use crate::core::models::restraint::{AtomRef, Restraint};
    use crate::engine::tasks::fixtures::comp;

    fn library_with_ala() -> MonomerLibrary {
        let mut library = MonomerLibrary::default();
        library.components.insert(
            "ALA".to_string(),
            comp(
                "ALA",
                "peptide",
                &[("N", "NH1"), ("CA", "CH1"), ("C", "C"), ("O", "O"), ("H", "HNH1")],
                Vec::new(),
            ),
        );
        library
    }

    fn side(comp_id: &str) -> LinkSide {
        LinkSide {
            comp_id: comp_id.to_string(),
            mod_id: String::new(),
            group: "peptide".to_string(),
        }
    }

    fn link_bond(a: &str, b: &str) -> Restraint {
        Restraint::Bond([AtomRef::on_side(Side::First, a), AtomRef::on_side(Side::Second, b)])
    }

    fn mod_bond(function: ModFunction, a: &str, b: &str) -> Restraint {
        Restraint::Bond([
            AtomRef::with_function(function, a),
            AtomRef::with_function(function, b),
        ])
    }

    fn op(function: ModFunction, old_id: &str, new_id: &str) -> AtomModificationOp {
        AtomModificationOp {
            function,
            old_id: old_id.to_string(),
            new_id: new_id.to_string(),
        }
    }

    fn add_mod(library: &mut MonomerLibrary, atom_mods: Vec<AtomModificationOp>, restraints: Vec<Restraint>) {
        library.modifications.insert(
            "M".to_string(),
            ChemMod {
                id: "M".to_string(),
                comp_id: "ALA".to_string(),
                group_id: "peptide".to_string(),
                atom_mods,
                restraints,
            },
        );
    }

    #[test]
    fn generic_links_are_skipped() {
        let mut library = library_with_ala();
        library.links.insert(
            "TRANS".to_string(),
            ChemLink {
                id: "TRANS".to_string(),
                sides: [side(""), side("")],
                restraints: vec![link_bond("C", "NOPE")],
            },
        );
        assert!(run(&library).is_empty());
    }

    #[test]
    fn bound_side_reports_sorted_unknown_atoms_once() {
        let mut library = library_with_ala();
        library.links.insert(
            "L".to_string(),
            ChemLink {
                id: "L".to_string(),
                sides: [side("ALA"), side("")],
                restraints: vec![
                    link_bond("CX", "N"),
                    link_bond("CB", "ZZ"),
                    link_bond("C", "N"),
                ],
            },
        );
        let violations = run(&library);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].kind,
            ViolationKind::UnknownAtomInLink {
                link_id: "L".to_string(),
                side: Side::First,
                comp_id: "ALA".to_string(),
                atom_ids: vec!["CB".to_string(), "CX".to_string()],
            }
        );
    }

    #[test]
    fn each_side_resolves_against_its_own_component() {
        let mut library = library_with_ala();
        library.components.insert(
            "GLY".to_string(),
            comp("GLY", "peptide", &[("N", "NH1"), ("CA", "CH2"), ("C", "C"), ("O", "O")], Vec::new()),
        );
        library.links.insert(
            "ALA-GLY".to_string(),
            ChemLink {
                id: "ALA-GLY".to_string(),
                sides: [side("ALA"), side("GLY")],
                restraints: vec![link_bond("C", "N"), link_bond("CA", "H")],
            },
        );
        let violations = run(&library);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].kind,
            ViolationKind::UnknownAtomInLink {
                link_id: "ALA-GLY".to_string(),
                side: Side::Second,
                comp_id: "GLY".to_string(),
                atom_ids: vec!["H".to_string()],
            }
        );
    }

    #[test]
    fn atoms_added_by_a_modification_resolve() {
        let mut library = library_with_ala();
        add_mod(
            &mut library,
            vec![op(ModFunction::Add, "", "OXT")],
            vec![mod_bond(ModFunction::Add, "C", "OXT")],
        );
        assert!(run(&library).is_empty());
    }

    #[test]
    fn add_op_without_new_id_is_reported() {
        let mut library = library_with_ala();
        add_mod(&mut library, vec![op(ModFunction::Add, "", "")], Vec::new());
        let violations = run(&library);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "[monomer-cross] error: missing new atom id on add op in mod M"
        );
    }

    #[test]
    fn deleted_atoms_leave_the_effective_set_but_delete_rows_are_ignored() {
        let mut library = library_with_ala();
        add_mod(
            &mut library,
            vec![op(ModFunction::Delete, "H", "")],
            vec![
                mod_bond(ModFunction::Delete, "N", "H"),
                mod_bond(ModFunction::Change, "CA", "H"),
            ],
        );
        let violations = run(&library);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].kind,
            ViolationKind::UnknownAtomInMod {
                mod_id: "M".to_string(),
                comp_id: "ALA".to_string(),
                atom_ids: vec!["H".to_string()],
            }
        );
    }

    #[test]
    fn components_missing_from_the_library_are_skipped() {
        let mut library = MonomerLibrary::default();
        library.links.insert(
            "L".to_string(),
            ChemLink {
                id: "L".to_string(),
                sides: [side("XYZ"), side("")],
                restraints: vec![link_bond("C", "N")],
            },
        );
        add_mod(&mut library, vec![op(ModFunction::Add, "", "")], Vec::new());
        let codes: Vec<_> = run(&library).iter().map(|v| v.kind.code()).collect();
        assert_eq!(codes, vec!["missing-new-atom-id"]);
    }
}
