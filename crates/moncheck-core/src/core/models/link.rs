use super::restraint::{Restraint, Side};
use crate::core::io::document::{Row, TableError};
use crate::core::io::traits::Record;

/// A row of the master link index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: String,
    pub comp_id_1: String,
    pub mod_id_1: String,
    pub group_comp_1: String,
    pub comp_id_2: String,
    pub mod_id_2: String,
    pub group_comp_2: String,
}

impl Record for LinkRecord {
    const CATEGORY: &'static str = "_chem_link.";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "comp_id_1",
        "mod_id_1",
        "group_comp_1",
        "comp_id_2",
        "mod_id_2",
        "group_comp_2",
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, TableError> {
        Ok(Self {
            id: row.string("id"),
            comp_id_1: row.string("comp_id_1"),
            mod_id_1: row.string("mod_id_1"),
            group_comp_1: row.string("group_comp_1"),
            comp_id_2: row.string("comp_id_2"),
            mod_id_2: row.string("mod_id_2"),
            group_comp_2: row.string("group_comp_2"),
        })
    }
}

impl LinkRecord {
    pub fn side(&self, side: Side) -> LinkSide {
        match side {
            Side::First => LinkSide {
                comp_id: self.comp_id_1.clone(),
                mod_id: self.mod_id_1.clone(),
                group: self.group_comp_1.clone(),
            },
            Side::Second => LinkSide {
                comp_id: self.comp_id_2.clone(),
                mod_id: self.mod_id_2.clone(),
                group: self.group_comp_2.clone(),
            },
        }
    }
}

/// One participant of a link; unbound when `comp_id` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkSide {
    pub comp_id: String,
    pub mod_id: String,
    pub group: String,
}

impl LinkSide {
    pub fn is_bound(&self) -> bool {
        !self.comp_id.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChemLink {
    pub id: String,
    pub sides: [LinkSide; 2],
    pub restraints: Vec<Restraint>,
}

impl ChemLink {
    pub fn from_record(record: &LinkRecord, restraints: Vec<Restraint>) -> Self {
        Self {
            id: record.id.clone(),
            sides: [record.side(Side::First), record.side(Side::Second)],
            restraints,
        }
    }

    pub fn side(&self, side: Side) -> &LinkSide {
        match side {
            Side::First => &self.sides[0],
            Side::Second => &self.sides[1],
        }
    }

    pub fn block_name(id: &str) -> String {
        format!("link_{}", id)
    }

    pub fn is_generic(&self) -> bool {
        self.sides.iter().all(|s| !s.is_bound())
    }
}
