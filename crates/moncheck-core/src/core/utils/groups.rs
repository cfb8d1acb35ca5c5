use phf::{Set, phf_set};
use std::collections::BTreeSet;

/// The groups a component may declare for itself.
pub static GROUP_VOCABULARY: Set<&'static str> = phf_set! {
    "peptide", "P-peptide", "M-peptide",
    "DNA", "RNA",
    "pyranose", "ketopyranose", "furanose",
    "NON-POLYMER",
};

/// Group qualifiers valid on links and modifications only.
pub const PSEUDO_GROUPS: [&str; 2] = ["DNA/RNA", "pept"];

/// The vocabulary in sorted order, for defaults and display.
pub fn vocabulary_sorted() -> Vec<&'static str> {
    let mut groups: Vec<&'static str> = GROUP_VOCABULARY.iter().copied().collect();
    groups.sort_unstable();
    groups
}

/// Groups that a link or modification may name: every group used by the
/// component index plus the pseudo-groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownGroupSet {
    groups: BTreeSet<String>,
}

impl KnownGroupSet {
    pub fn new<'a, I, P>(component_groups: I, pseudo_groups: P) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        P: IntoIterator<Item = &'a str>,
    {
        let groups = component_groups
            .into_iter()
            .chain(pseudo_groups)
            .map(str::to_string)
            .collect();
        Self { groups }
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }
}
