//! # Engine Module
//!
//! Loading and checking logic for one validation session over a monomer
//! library.
//!
//! ## Overview
//!
//! The engine reads the master index and the component files once, hands the
//! resulting immutable tables to each enabled check, and collects what every
//! check finds into a report. Checks are independent of each other; a finding
//! never stops a scan, while a load failure aborts the session.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Dictionary paths, enabled checks, group vocabularies
//! - **Loading** ([`loader`], [`scanner`]) - Master index, component files, library assembly
//! - **Checks** (`tasks`) - One module per consistency rule family
//! - **Findings** ([`violation`], [`report`]) - Violations, severities and per-check verdicts
//! - **Progress Monitoring** ([`progress`]) - Callback-based session events
//! - **Error Handling** ([`error`]) - Load and configuration failures

pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod progress;
pub mod report;
pub mod scanner;
pub(crate) mod tasks;
pub mod violation;
