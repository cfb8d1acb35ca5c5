use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use moncheck::engine::config::ValidationConfigBuilder;
use moncheck::engine::violation::CheckKind;

pub fn build_config(args: &CheckArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let paths_file = file_config.paths.unwrap_or_default();
    let checks_file = file_config.checks.unwrap_or_default();
    let groups_file = file_config.groups.unwrap_or_default();
    let report_file = file_config.report.unwrap_or_default();

    let root = args
        .root
        .clone()
        .or(paths_file.root)
        .unwrap_or(defaults.root);
    let mut builder = ValidationConfigBuilder::new().root(root);

    if let Some(index) = args.index.clone().or(paths_file.index) {
        builder = builder.index_path(index);
    }
    if let Some(energy_lib) = args.energy_lib.clone().or(paths_file.energy_lib) {
        builder = builder.energy_lib_path(energy_lib);
    }

    let only = merge_checks(&args.only, checks_file.only.as_deref(), "checks.only")?;
    if !only.is_empty() {
        builder = builder.only_checks(only);
    }
    for check in merge_checks(&args.skip, checks_file.skip.as_deref(), "checks.skip")? {
        builder = builder.skip_check(check);
    }

    if !args.pseudo_groups.is_empty() {
        builder = builder.pseudo_groups(args.pseudo_groups.clone());
    } else if let Some(pseudo_groups) = groups_file.pseudo_groups {
        builder = builder.pseudo_groups(pseudo_groups);
    }
    if let Some(vocabulary) = groups_file.vocabulary {
        builder = builder.group_vocabulary(vocabulary);
    }

    let warnings_as_errors = args.warnings_as_errors
        || checks_file
            .warnings_as_errors
            .unwrap_or(defaults.warnings_as_errors);

    let core_config = builder
        .warnings_as_errors(warnings_as_errors)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        core_config,
        format: args
            .format
            .or(report_file.format)
            .unwrap_or(defaults.format),
        output: args.output.clone().or(report_file.output),
    })
}

/// Command-line check lists replace the file's list rather than extending it.
fn merge_checks(cli: &[CheckKind], file: Option<&[String]>, key: &str) -> Result<Vec<CheckKind>> {
    if !cli.is_empty() {
        return Ok(cli.to_vec());
    }
    file.unwrap_or_default()
        .iter()
        .map(|name| {
            name.parse::<CheckKind>()
                .map_err(|e| CliError::Config(format!("Invalid value in `{}`: {}", key, e)))
        })
        .collect()
}
