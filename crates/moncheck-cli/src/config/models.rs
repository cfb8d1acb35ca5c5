use crate::cli::ReportFormat;
use moncheck::engine::config::ValidationConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub core_config: ValidationConfig,
    pub format: ReportFormat,
    /// `None` writes the report to standard output.
    pub output: Option<PathBuf>,
}
