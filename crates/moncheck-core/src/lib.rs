//! # moncheck Core Library
//!
//! A referential-integrity checker for CIF monomer libraries: the master list of
//! chemical components, links and modifications, the per-component definition
//! files, and the energy-type catalog that parameterizes their atoms.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Read-only data models (`ComponentRecord`, `ChemLink`,
//!   `MonomerLibrary`), the CIF table accessor that produces them, the energy-type
//!   catalog and the static group vocabulary.
//!
//! - **[`engine`]: The Logic Core.** Loading (`IndexLoader`, `ComponentScanner`), the
//!   individual consistency checks, the violation and report types, and the session
//!   configuration.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into a single
//!   validation session that loads the dictionary once, runs every enabled check and
//!   returns a `SessionReport`.

pub mod core;
pub mod engine;
pub mod workflows;
