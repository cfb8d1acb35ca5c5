//! # Energy Module
//!
//! The catalog of atom energy types recognized by the force-field parameter
//! library (`ener_lib.cif`). Every `type_energy` a component assigns to an atom
//! must be one of these tokens.

pub mod catalog;
