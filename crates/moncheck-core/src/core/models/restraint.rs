use crate::core::io::document::{Block, Row, TableError};
use std::fmt;

/// One of the two participants of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "1" => Some(Side::First),
            "2" => Some(Side::Second),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Side::First => 1,
            Side::Second => 2,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The function tag carried by modification rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModFunction {
    Add,
    Delete,
    Change,
}

impl ModFunction {
    /// Recognizes the function by its first letter, so `add`, `a` and `ADD` agree.
    pub fn parse(value: &str) -> Option<Self> {
        match value.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('a') => Some(ModFunction::Add),
            Some('d') => Some(ModFunction::Delete),
            Some('c') => Some(ModFunction::Change),
            _ => None,
        }
    }
}

impl fmt::Display for ModFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModFunction::Add => "add",
            ModFunction::Delete => "delete",
            ModFunction::Change => "change",
        };
        f.write_str(name)
    }
}

/// What an atom reference inside a restraint is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Owner {
    /// A restraint of a component's own definition.
    #[default]
    Local,
    /// A link restraint atom on side 1 or 2.
    Side(Side),
    /// A modification restraint, tagged with the row's function.
    Function(ModFunction),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtomRef {
    pub owner: Owner,
    pub atom_id: String,
}

impl AtomRef {
    pub fn local(atom_id: impl Into<String>) -> Self {
        Self {
            owner: Owner::Local,
            atom_id: atom_id.into(),
        }
    }

    pub fn on_side(side: Side, atom_id: impl Into<String>) -> Self {
        Self {
            owner: Owner::Side(side),
            atom_id: atom_id.into(),
        }
    }

    pub fn with_function(function: ModFunction, atom_id: impl Into<String>) -> Self {
        Self {
            owner: Owner::Function(function),
            atom_id: atom_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestraintKind {
    Bond,
    Angle,
    Torsion,
    Chirality,
    Plane,
}

/// Which dictionary section a restraint table belongs to; each spells its
/// categories and atom columns differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Component,
    Link,
    Modification,
}

impl RestraintKind {
    pub const ALL: [RestraintKind; 5] = [
        RestraintKind::Bond,
        RestraintKind::Angle,
        RestraintKind::Torsion,
        RestraintKind::Chirality,
        RestraintKind::Plane,
    ];

    /// Atom column names in slot order.
    pub fn slot_names(self) -> &'static [&'static str] {
        match self {
            RestraintKind::Bond => &["atom_id_1", "atom_id_2"],
            RestraintKind::Angle => &["atom_id_1", "atom_id_2", "atom_id_3"],
            RestraintKind::Torsion => &["atom_id_1", "atom_id_2", "atom_id_3", "atom_id_4"],
            RestraintKind::Chirality => &["atom_id_centre", "atom_id_1", "atom_id_2", "atom_id_3"],
            RestraintKind::Plane => &["atom_id"],
        }
    }

    pub fn category(self, flavor: Flavor) -> &'static str {
        match (flavor, self) {
            (Flavor::Component, RestraintKind::Bond) => "_chem_comp_bond.",
            (Flavor::Component, RestraintKind::Angle) => "_chem_comp_angle.",
            (Flavor::Component, RestraintKind::Torsion) => "_chem_comp_tor.",
            (Flavor::Component, RestraintKind::Chirality) => "_chem_comp_chir.",
            (Flavor::Component, RestraintKind::Plane) => "_chem_comp_plane_atom.",
            (Flavor::Link, RestraintKind::Bond) => "_chem_link_bond.",
            (Flavor::Link, RestraintKind::Angle) => "_chem_link_angle.",
            (Flavor::Link, RestraintKind::Torsion) => "_chem_link_tor.",
            (Flavor::Link, RestraintKind::Chirality) => "_chem_link_chir.",
            (Flavor::Link, RestraintKind::Plane) => "_chem_link_plane.",
            (Flavor::Modification, RestraintKind::Bond) => "_chem_mod_bond.",
            (Flavor::Modification, RestraintKind::Angle) => "_chem_mod_angle.",
            (Flavor::Modification, RestraintKind::Torsion) => "_chem_mod_tor.",
            (Flavor::Modification, RestraintKind::Chirality) => "_chem_mod_chir.",
            (Flavor::Modification, RestraintKind::Plane) => "_chem_mod_plane_atom.",
        }
    }
}

impl fmt::Display for RestraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RestraintKind::Bond => "bond",
            RestraintKind::Angle => "angle",
            RestraintKind::Torsion => "torsion",
            RestraintKind::Chirality => "chirality",
            RestraintKind::Plane => "plane",
        };
        f.write_str(name)
    }
}

/// `atom_id_1` -> `atom_1_comp_id`, `atom_id_centre` -> `atom_centre_comp_id`,
/// `atom_id` -> `atom_comp_id`.
fn side_column(slot: &str) -> String {
    let suffix = slot.strip_prefix("atom_id").unwrap_or(slot);
    format!("atom{}_comp_id", suffix)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restraint {
    Bond([AtomRef; 2]),
    Angle([AtomRef; 3]),
    Torsion([AtomRef; 4]),
    Chirality { centre: AtomRef, atoms: [AtomRef; 3] },
    Plane { plane_id: String, atom: AtomRef },
}

fn take<const N: usize>(refs: &mut impl Iterator<Item = AtomRef>) -> [AtomRef; N] {
    std::array::from_fn(|_| refs.next().unwrap_or_default())
}

impl Restraint {
    pub fn kind(&self) -> RestraintKind {
        match self {
            Restraint::Bond(_) => RestraintKind::Bond,
            Restraint::Angle(_) => RestraintKind::Angle,
            Restraint::Torsion(_) => RestraintKind::Torsion,
            Restraint::Chirality { .. } => RestraintKind::Chirality,
            Restraint::Plane { .. } => RestraintKind::Plane,
        }
    }

    /// Atom references in slot order.
    pub fn atoms(&self) -> Vec<&AtomRef> {
        match self {
            Restraint::Bond(a) => a.iter().collect(),
            Restraint::Angle(a) => a.iter().collect(),
            Restraint::Torsion(a) => a.iter().collect(),
            Restraint::Chirality { centre, atoms } => {
                std::iter::once(centre).chain(atoms.iter()).collect()
            }
            Restraint::Plane { atom, .. } => vec![atom],
        }
    }

    /// Atom references paired with the column name of their slot.
    pub fn slots(&self) -> impl Iterator<Item = (&'static str, &AtomRef)> {
        self.kind().slot_names().iter().copied().zip(self.atoms())
    }

    fn from_refs(kind: RestraintKind, refs: Vec<AtomRef>, plane_id: String) -> Self {
        let mut refs = refs.into_iter();
        match kind {
            RestraintKind::Bond => Restraint::Bond(take(&mut refs)),
            RestraintKind::Angle => Restraint::Angle(take(&mut refs)),
            RestraintKind::Torsion => Restraint::Torsion(take(&mut refs)),
            RestraintKind::Chirality => {
                let [centre] = take::<1>(&mut refs);
                Restraint::Chirality {
                    centre,
                    atoms: take(&mut refs),
                }
            }
            RestraintKind::Plane => {
                let [atom] = take::<1>(&mut refs);
                Restraint::Plane { plane_id, atom }
            }
        }
    }
}

fn read_owner(row: &Row<'_>, flavor: Flavor, slot: &str) -> Result<Owner, TableError> {
    match flavor {
        Flavor::Component => Ok(Owner::Local),
        Flavor::Link => {
            let column = side_column(slot);
            Side::parse(row.str(&column))
                .map(Owner::Side)
                .ok_or_else(|| row.invalid(&column, "side 1 or 2"))
        }
        Flavor::Modification => ModFunction::parse(row.str("function"))
            .map(Owner::Function)
            .ok_or_else(|| row.invalid("function", "add, delete or change")),
    }
}

/// Reads all five restraint tables of one block, bonds first.
pub fn read_restraints(block: &Block, flavor: Flavor) -> Result<Vec<Restraint>, TableError> {
    let mut restraints = Vec::new();
    for kind in RestraintKind::ALL {
        let mut columns: Vec<String> = Vec::new();
        if flavor == Flavor::Modification {
            columns.push("function".to_string());
        }
        if kind == RestraintKind::Plane {
            columns.push("?plane_id".to_string());
        }
        for slot in kind.slot_names() {
            if flavor == Flavor::Link {
                columns.push(side_column(slot));
            }
            columns.push(slot.to_string());
        }
        let column_refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        let table = block.find(kind.category(flavor), &column_refs)?;

        for row in table.rows() {
            let mut refs = Vec::with_capacity(kind.slot_names().len());
            for slot in kind.slot_names() {
                refs.push(AtomRef {
                    owner: read_owner(&row, flavor, slot)?,
                    atom_id: row.string(slot),
                });
            }
            restraints.push(Restraint::from_refs(kind, refs, row.string("plane_id")));
        }
    }
    Ok(restraints)
}
