//! Session configuration assembled from built-in defaults, an optional TOML
//! file and command-line flags, in increasing order of precedence.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
