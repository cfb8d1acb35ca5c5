use crate::core::models::component::ComponentRecord;
use crate::engine::violation::{CheckKind, Violation, ViolationKind};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument};

/// One violation per distinct index group outside `vocabulary`, in group order.
#[instrument(skip_all, name = "group_vocabulary_task")]
pub fn run(index: &[ComponentRecord], vocabulary: &BTreeSet<String>) -> Vec<Violation> {
    let mut offenders: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for record in index {
        if !vocabulary.contains(&record.group) {
            offenders
                .entry(record.group.as_str())
                .or_default()
                .push(record.id.clone());
        }
    }

    let violations: Vec<_> = offenders
        .into_iter()
        .map(|(group, comp_ids)| {
            Violation::new(
                CheckKind::GroupVocabulary,
                ViolationKind::GroupOutsideVocabulary {
                    group: group.to_string(),
                    comp_ids,
                },
            )
        })
        .collect();

    info!(
        vocabulary = vocabulary.len(),
        violations = violations.len(),
        "Group vocabulary check complete."
    );
    violations
}
