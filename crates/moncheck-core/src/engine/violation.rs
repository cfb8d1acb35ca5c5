use crate::core::models::restraint::{RestraintKind, Side};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// The independent checks a session can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    GroupConsistency,
    GroupVocabulary,
    EnergyTypes,
    RestraintAtoms,
    ReferentialIntegrity,
    MonomerCross,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        CheckKind::GroupConsistency,
        CheckKind::GroupVocabulary,
        CheckKind::EnergyTypes,
        CheckKind::RestraintAtoms,
        CheckKind::ReferentialIntegrity,
        CheckKind::MonomerCross,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CheckKind::GroupConsistency => "group-consistency",
            CheckKind::GroupVocabulary => "group-vocabulary",
            CheckKind::EnergyTypes => "energy-types",
            CheckKind::RestraintAtoms => "restraint-atoms",
            CheckKind::ReferentialIntegrity => "referential-integrity",
            CheckKind::MonomerCross => "monomer-cross",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CheckKind::GroupConsistency => {
                "Component groups agree between the master index and the component files"
            }
            CheckKind::GroupVocabulary => "Indexed component groups belong to the group vocabulary",
            CheckKind::EnergyTypes => "Atom energy types are present in the energy-type catalog",
            CheckKind::RestraintAtoms => "Component restraints only reference declared atoms",
            CheckKind::ReferentialIntegrity => {
                "Links and modifications reference known components and groups"
            }
            CheckKind::MonomerCross => {
                "Link and modification restraints resolve against component atoms"
            }
        }
    }

    /// Severity of every finding of this check.
    pub fn severity(self) -> Severity {
        match self {
            CheckKind::RestraintAtoms => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown check '{0}'")]
pub struct UnknownCheckError(pub String);

impl FromStr for CheckKind {
    type Err = UnknownCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckKind::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCheckError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    GroupMismatch {
        comp_id: String,
        index_group: String,
        file_group: String,
        file: PathBuf,
    },
    NotIndexed {
        comp_id: String,
        file: PathBuf,
    },
    MissingFile {
        comp_id: String,
        expected: Option<PathBuf>,
    },
    GroupOutsideVocabulary {
        group: String,
        comp_ids: Vec<String>,
    },
    UnknownEnergyType {
        comp_id: String,
        atom_id: String,
        energy_type: String,
        file: PathBuf,
    },
    UnknownRestraintAtom {
        comp_id: String,
        file: PathBuf,
        restraint: RestraintKind,
        slot: &'static str,
        atom_id: String,
    },
    UndefinedGroupInLink {
        link_id: String,
        side: Side,
        group: String,
    },
    UndefinedGroupInMod {
        mod_id: String,
        group: String,
    },
    UndefinedComponentInLink {
        link_id: String,
        side: Side,
        comp_id: String,
    },
    UndefinedComponentInMod {
        mod_id: String,
        comp_id: String,
    },
    GroupMismatchInLink {
        link_id: String,
        side: Side,
        comp_id: String,
        link_group: String,
        comp_group: String,
    },
    GroupMismatchInMod {
        mod_id: String,
        comp_id: String,
        mod_group: String,
        comp_group: String,
    },
    UnknownAtomInLink {
        link_id: String,
        side: Side,
        comp_id: String,
        atom_ids: Vec<String>,
    },
    UnknownAtomInMod {
        mod_id: String,
        comp_id: String,
        atom_ids: Vec<String>,
    },
    MissingNewAtomId {
        mod_id: String,
        old_id: String,
    },
}

impl ViolationKind {
    /// Stable machine-readable identifier of the violation class.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::GroupMismatch { .. } => "group-mismatch",
            ViolationKind::NotIndexed { .. } => "only-in-files",
            ViolationKind::MissingFile { .. } => "only-in-index",
            ViolationKind::GroupOutsideVocabulary { .. } => "group-outside-vocabulary",
            ViolationKind::UnknownEnergyType { .. } => "unknown-energy-type",
            ViolationKind::UnknownRestraintAtom { .. } => "unknown-restraint-atom",
            ViolationKind::UndefinedGroupInLink { .. } => "undefined-group-in-link",
            ViolationKind::UndefinedGroupInMod { .. } => "undefined-group-in-mod",
            ViolationKind::UndefinedComponentInLink { .. } => "undefined-component-in-link",
            ViolationKind::UndefinedComponentInMod { .. } => "undefined-component-in-mod",
            ViolationKind::GroupMismatchInLink { .. } => "group-mismatch-in-link",
            ViolationKind::GroupMismatchInMod { .. } => "group-mismatch-in-mod",
            ViolationKind::UnknownAtomInLink { .. } => "unknown-atom-in-link",
            ViolationKind::UnknownAtomInMod { .. } => "unknown-atom-in-mod",
            ViolationKind::MissingNewAtomId { .. } => "missing-new-atom-id",
        }
    }

    /// The id of the record the violation is about.
    pub fn subject(&self) -> &str {
        match self {
            ViolationKind::GroupMismatch { comp_id, .. }
            | ViolationKind::NotIndexed { comp_id, .. }
            | ViolationKind::MissingFile { comp_id, .. }
            | ViolationKind::UnknownEnergyType { comp_id, .. }
            | ViolationKind::UnknownRestraintAtom { comp_id, .. } => comp_id,
            ViolationKind::GroupOutsideVocabulary { group, .. } => group,
            ViolationKind::UndefinedGroupInLink { link_id, .. }
            | ViolationKind::UndefinedComponentInLink { link_id, .. }
            | ViolationKind::GroupMismatchInLink { link_id, .. }
            | ViolationKind::UnknownAtomInLink { link_id, .. } => link_id,
            ViolationKind::UndefinedGroupInMod { mod_id, .. }
            | ViolationKind::UndefinedComponentInMod { mod_id, .. }
            | ViolationKind::GroupMismatchInMod { mod_id, .. }
            | ViolationKind::UnknownAtomInMod { mod_id, .. }
            | ViolationKind::MissingNewAtomId { mod_id, .. } => mod_id,
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::GroupMismatch {
                comp_id,
                index_group,
                file_group,
                file,
            } => write!(
                f,
                "group of {} is '{}' in the index but '{}' in {}",
                comp_id,
                index_group,
                file_group,
                file.display()
            ),
            ViolationKind::NotIndexed { comp_id, file } => write!(
                f,
                "{} is defined in {} but not indexed",
                comp_id,
                file.display()
            ),
            ViolationKind::MissingFile { comp_id, expected } => match expected {
                Some(path) => write!(
                    f,
                    "{} is indexed but has no component file (expected {})",
                    comp_id,
                    path.display()
                ),
                None => write!(f, "{} is indexed but has no component file", comp_id),
            },
            ViolationKind::GroupOutsideVocabulary { group, comp_ids } => write!(
                f,
                "group '{}' is not in the group vocabulary (used by {})",
                group,
                comp_ids.join(", ")
            ),
            ViolationKind::UnknownEnergyType {
                comp_id,
                atom_id,
                energy_type,
                file,
            } => write!(
                f,
                "atom {} of {} has unknown energy type '{}' ({})",
                atom_id,
                comp_id,
                energy_type,
                file.display()
            ),
            ViolationKind::UnknownRestraintAtom {
                comp_id,
                file,
                restraint,
                slot,
                atom_id,
            } => write!(
                f,
                "{} restraint of {} references undeclared atom '{}' in {} ({})",
                restraint,
                comp_id,
                atom_id,
                slot,
                file.display()
            ),
            ViolationKind::UndefinedGroupInLink {
                link_id,
                side,
                group,
            } => write!(
                f,
                "undefined group '{}' in link {} (group_comp_{})",
                group, link_id, side
            ),
            ViolationKind::UndefinedGroupInMod { mod_id, group } => {
                write!(f, "undefined group '{}' in mod {}", group, mod_id)
            }
            ViolationKind::UndefinedComponentInLink {
                link_id,
                side,
                comp_id,
            } => write!(
                f,
                "undefined component '{}' in link {} (comp_id_{})",
                comp_id, link_id, side
            ),
            ViolationKind::UndefinedComponentInMod { mod_id, comp_id } => {
                write!(f, "undefined component '{}' in mod {}", comp_id, mod_id)
            }
            ViolationKind::GroupMismatchInLink {
                link_id,
                side,
                comp_id,
                link_group,
                comp_group,
            } => write!(
                f,
                "group mismatch for {} in link {}: group_comp_{} is '{}' but the component is '{}'",
                comp_id, link_id, side, link_group, comp_group
            ),
            ViolationKind::GroupMismatchInMod {
                mod_id,
                comp_id,
                mod_group,
                comp_group,
            } => write!(
                f,
                "group mismatch for {} in mod {}: group_id is '{}' but the component is '{}'",
                comp_id, mod_id, mod_group, comp_group
            ),
            ViolationKind::UnknownAtomInLink {
                link_id,
                side,
                comp_id,
                atom_ids,
            } => write!(
                f,
                "unknown atom(s) {} of {} in link {} (side {})",
                atom_ids.join(", "),
                comp_id,
                link_id,
                side
            ),
            ViolationKind::UnknownAtomInMod {
                mod_id,
                comp_id,
                atom_ids,
            } => write!(
                f,
                "unknown atom(s) {} of {} in mod {}",
                atom_ids.join(", "),
                comp_id,
                mod_id
            ),
            ViolationKind::MissingNewAtomId { mod_id, old_id } => {
                if old_id.is_empty() {
                    write!(f, "missing new atom id on add op in mod {}", mod_id)
                } else {
                    write!(
                        f,
                        "missing new atom id on add op in mod {} (atom_id '{}')",
                        mod_id, old_id
                    )
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub check: CheckKind,
    pub severity: Severity,
    pub kind: ViolationKind,
}

impl Violation {
    /// A violation with the check's own severity.
    pub fn new(check: CheckKind, kind: ViolationKind) -> Self {
        Self {
            check,
            severity: check.severity(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.check, self.severity, self.kind)
    }
}
