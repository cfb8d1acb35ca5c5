use crate::core::models::restraint::Side;
use crate::core::utils::groups::KnownGroupSet;
use crate::engine::loader::MasterIndex;
use crate::engine::violation::{CheckKind, Violation, ViolationKind};
use std::collections::BTreeMap;
use tracing::{info, instrument};

fn violation(kind: ViolationKind) -> Violation {
    Violation::new(CheckKind::ReferentialIntegrity, kind)
}

/// Resolves the group and component references of every link and
/// modification in the index.
///
/// Each rule family runs over the full tables before the next one starts, so a
/// single bad record can show up under several of them.
#[instrument(skip_all, name = "referential_integrity_task")]
pub fn run(index: &MasterIndex, known: &KnownGroupSet) -> Vec<Violation> {
    let groups: BTreeMap<&str, &str> = index.component_groups();
    info!(
        links = index.links.len(),
        modifications = index.modifications.len(),
        known_groups = known.iter().count(),
        "Checking link and modification references."
    );

    let mut violations = Vec::new();

    for link in &index.links {
        for side in Side::BOTH {
            let group = link.side(side).group;
            if !group.is_empty() && !known.contains(&group) {
                violations.push(violation(ViolationKind::UndefinedGroupInLink {
                    link_id: link.id.clone(),
                    side,
                    group,
                }));
            }
        }
    }

    for modification in &index.modifications {
        let group = &modification.group_id;
        if !group.is_empty() && !known.contains(group) {
            violations.push(violation(ViolationKind::UndefinedGroupInMod {
                mod_id: modification.id.clone(),
                group: group.clone(),
            }));
        }
    }

    for link in &index.links {
        for side in Side::BOTH {
            let comp_id = link.side(side).comp_id;
            if !comp_id.is_empty() && !groups.contains_key(comp_id.as_str()) {
                violations.push(violation(ViolationKind::UndefinedComponentInLink {
                    link_id: link.id.clone(),
                    side,
                    comp_id,
                }));
            }
        }
    }

    for modification in &index.modifications {
        let comp_id = &modification.comp_id;
        if !comp_id.is_empty() && !groups.contains_key(comp_id.as_str()) {
            violations.push(violation(ViolationKind::UndefinedComponentInMod {
                mod_id: modification.id.clone(),
                comp_id: comp_id.clone(),
            }));
        }
    }

    for link in &index.links {
        for side in Side::BOTH {
            let recorded = link.side(side);
            if let Some(&comp_group) = groups.get(recorded.comp_id.as_str()) {
                if recorded.group != comp_group {
                    violations.push(violation(ViolationKind::GroupMismatchInLink {
                        link_id: link.id.clone(),
                        side,
                        comp_id: recorded.comp_id,
                        link_group: recorded.group,
                        comp_group: comp_group.to_string(),
                    }));
                }
            }
        }
    }

    for modification in &index.modifications {
        if let Some(&comp_group) = groups.get(modification.comp_id.as_str()) {
            if modification.group_id != comp_group {
                violations.push(violation(ViolationKind::GroupMismatchInMod {
                    mod_id: modification.id.clone(),
                    comp_id: modification.comp_id.clone(),
                    mod_group: modification.group_id.clone(),
                    comp_group: comp_group.to_string(),
                }));
            }
        }
    }

    info!(violations = violations.len(), "Referential integrity check complete.");
    violations
}
