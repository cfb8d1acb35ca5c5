//! Provides read access to structured CIF documents.
//!
//! The reader in [`cif`] turns text into a [`document::Document`]: a list of named
//! blocks, each holding tag/value pairs and `loop_` tables. Tables are addressed by
//! category and column name; typed records implement [`traits::Record`] so callers
//! never index columns by position.

pub mod cif;
pub mod document;
pub mod traits;
