use crate::cli::ReportFormat;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub root: PathBuf,
    pub format: ReportFormat,
    pub warnings_as_errors: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            format: ReportFormat::Text,
            warnings_as_errors: false,
        }
    }
}
