use crate::cli::{CheckArgs, ReportFormat};
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use moncheck::engine::progress::ProgressReporter;
use moncheck::engine::report::{ReportError, SessionReport};
use moncheck::engine::violation::Severity;
use moncheck::workflows;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Runs one validation session; `Ok(false)` means the library failed a check.
pub fn run(args: CheckArgs) -> Result<bool> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_config(&args)?;
    let core_config = &app.core_config;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Validating monomer library at {}...",
        core_config.paths.root.display()
    );
    info!(checks = core_config.checks.len(), "Invoking the core validation workflow...");
    let report = workflows::validate::run(core_config, &reporter)?;

    write_report(&report, app.format, app.output.as_deref())?;

    let errors = report.count(Severity::Error);
    let warnings = report.count(Severity::Warning);
    if report.passed() {
        println!(
            "✓ Library passed all {} check(s) ({} warning(s)).",
            report.outcomes.len(),
            warnings
        );
    } else {
        let failed: Vec<_> = report.failed_checks().iter().map(|c| c.name()).collect();
        println!(
            "✗ Library failed {} check(s): {} ({} error(s), {} warning(s)).",
            failed.len(),
            failed.join(", "),
            errors,
            warnings
        );
    }
    Ok(report.passed())
}

fn render(report: &SessionReport, format: ReportFormat, writer: &mut impl Write) -> std::result::Result<(), ReportError> {
    match format {
        ReportFormat::Text => report.write_text(writer),
        ReportFormat::Csv => report.write_csv(writer),
    }
}

fn write_report(report: &SessionReport, format: ReportFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            render(report, format, &mut writer)?;
            writer.flush()?;
            info!("Report written to {:?}", path);
        }
        None => {
            let stdout = io::stdout();
            render(report, format, &mut stdout.lock())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn monlib(root: &Path, file_group: &str) {
        write(
            root,
            "list/mon_lib_list.cif",
            "data_comp_list\nloop_\n_chem_comp.id\n_chem_comp.group\nGLY peptide\n\
             data_link_list\nloop_\n_chem_link.id\n_chem_link.comp_id_1\n_chem_link.mod_id_1\n\
             _chem_link.group_comp_1\n_chem_link.comp_id_2\n_chem_link.mod_id_2\n_chem_link.group_comp_2\n\
             TRANS . . peptide . . peptide\n\
             data_mod_list\nloop_\n_chem_mod.id\n_chem_mod.comp_id\n_chem_mod.group_id\n",
        );
        write(root, "ener_lib.cif", "data_energy\nloop_\n_lib_atom.type\nCH2\nNH1\n");
        write(
            root,
            "g/GLY.cif",
            &format!(
                "data_comp_list\n_chem_comp.id GLY\n_chem_comp.group {}\n\
                 data_comp_GLY\nloop_\n_chem_comp_atom.atom_id\n_chem_comp_atom.type_energy\n\
                 N NH1\nCA CH2\n",
                file_group
            ),
        );
    }

    fn args(root: &Path, output: &Path, format: ReportFormat) -> CheckArgs {
        CheckArgs {
            root: Some(root.to_path_buf()),
            format: Some(format),
            output: Some(output.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn consistent_library_passes_and_writes_summary() {
        let dir = tempdir().unwrap();
        monlib(dir.path(), "peptide");
        let report_path = dir.path().join("report.txt");

        let passed = run(args(dir.path(), &report_path, ReportFormat::Text)).unwrap();
        assert!(passed);
        let text = fs::read_to_string(report_path).unwrap();
        assert!(text.contains("Session PASSED: 0 error(s), 0 warning(s)."));
    }

    #[test]
    fn group_mismatch_fails_the_session_and_lands_in_the_csv() {
        let dir = tempdir().unwrap();
        monlib(dir.path(), "DNA");
        let report_path = dir.path().join("report.csv");

        let passed = run(args(dir.path(), &report_path, ReportFormat::Csv)).unwrap();
        assert!(!passed);
        let csv = fs::read_to_string(report_path).unwrap();
        assert!(csv.lines().any(|l| l.starts_with("group-consistency,error,group-mismatch,GLY,")));
    }

    #[test]
    fn missing_library_is_an_error() {
        let dir = tempdir().unwrap();
        let report_path = dir.path().join("report.txt");
        assert!(run(args(&dir.path().join("absent"), &report_path, ReportFormat::Text)).is_err());
    }
}
