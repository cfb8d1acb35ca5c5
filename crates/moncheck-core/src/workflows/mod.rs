//! # Workflows Module
//!
//! High-level entry points that run a complete validation session over a
//! monomer library.
//!
//! ## Overview
//!
//! A session loads the master index, the component files and, when needed,
//! the energy-type catalog and the assembled library. It then runs every enabled
//! check and returns a [`SessionReport`](crate::engine::report::SessionReport)
//! holding one outcome per check.
//!
//! ## Architecture
//!
//! - **Validation Workflow** ([`validate`]) - Load once, run the enabled checks, aggregate verdicts

pub mod validate;
