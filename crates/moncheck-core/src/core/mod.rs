//! # Core Module
//!
//! Fundamental building blocks shared by every check: the structured-document
//! accessor, the typed dictionary records, the energy-type catalog and the static
//! vocabularies a monomer library is validated against.
//!
//! ## Architecture
//!
//! - **Document Access** ([`io`]) - CIF reading with named-block and named-column table access
//! - **Dictionary Records** ([`models`]) - Components, atoms, restraints, links and modifications
//! - **Energy Types** ([`energy`]) - The catalog of recognized atom energy types
//! - **Vocabularies** ([`utils`]) - Group tokens and pseudo-groups

pub mod energy;
pub mod io;
pub mod models;
pub mod utils;
