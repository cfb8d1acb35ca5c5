//! # Dictionary Models
//!
//! Typed, read-only records for the contents of a monomer library.
//!
//! - [`component`] - Component index rows, atoms and full component definitions
//! - [`restraint`] - Bond, angle, torsion, chirality and plane restraints with tagged atom references
//! - [`link`] - Link index rows and link definitions with their two sides
//! - [`modification`] - Modification index rows, atom modification ops and definitions
//! - [`library`] - The assembled library giving id-keyed access to all of the above

pub mod component;
pub mod library;
pub mod link;
pub mod modification;
pub mod restraint;
