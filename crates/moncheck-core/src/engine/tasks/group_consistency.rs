use crate::core::models::component::{ChemComp, ComponentRecord};
use crate::engine::violation::{CheckKind, Violation, ViolationKind};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Compares the index groups against the groups the component files declare,
/// and the two id sets against each other.
///
/// Mismatches come first, in scan order, followed by ids defined only in files
/// and then ids only present in the index.
#[instrument(skip_all, name = "group_consistency_task")]
pub fn run(index: &[ComponentRecord], scanned: &[ChemComp], root: &Path) -> Vec<Violation> {
    let mut indexed: BTreeMap<&str, &str> = BTreeMap::new();
    for record in index {
        indexed
            .entry(record.id.as_str())
            .or_insert(record.group.as_str());
    }
    info!(
        indexed = indexed.len(),
        scanned = scanned.len(),
        "Checking component group consistency."
    );

    let mut violations = Vec::new();

    for comp in scanned {
        if let Some(&index_group) = indexed.get(comp.id.as_str()) {
            if index_group != comp.group {
                debug!(comp_id = %comp.id, index_group, file_group = %comp.group, "Group mismatch.");
                violations.push(Violation::new(
                    CheckKind::GroupConsistency,
                    ViolationKind::GroupMismatch {
                        comp_id: comp.id.clone(),
                        index_group: index_group.to_string(),
                        file_group: comp.group.clone(),
                        file: comp.source.clone(),
                    },
                ));
            }
        }
    }

    let mut reported = HashSet::new();
    for comp in scanned {
        if !indexed.contains_key(comp.id.as_str()) && reported.insert(comp.id.as_str()) {
            violations.push(Violation::new(
                CheckKind::GroupConsistency,
                ViolationKind::NotIndexed {
                    comp_id: comp.id.clone(),
                    file: comp.source.clone(),
                },
            ));
        }
    }

    let in_files: HashSet<&str> = scanned.iter().map(|c| c.id.as_str()).collect();
    for &comp_id in indexed.keys() {
        if !in_files.contains(comp_id) {
            violations.push(Violation::new(
                CheckKind::GroupConsistency,
                ViolationKind::MissingFile {
                    comp_id: comp_id.to_string(),
                    expected: ChemComp::conventional_path(root, comp_id),
                },
            ));
        }
    }

    info!(violations = violations.len(), "Group consistency check complete.");
    violations
}
