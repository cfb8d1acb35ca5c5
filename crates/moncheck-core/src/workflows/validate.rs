use crate::core::energy::catalog::EnergyTypeCatalog;
use crate::engine::config::ValidationConfig;
use crate::engine::context::LoadedDictionary;
use crate::engine::error::{EngineError, LoadError};
use crate::engine::loader::{build_library, load_index, read_document};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::{CheckOutcome, SessionReport};
use crate::engine::scanner::ComponentScanner;
use crate::engine::tasks;
use crate::engine::violation::{CheckKind, Severity, Violation};
use tracing::{info, instrument, warn};

/// Reads the master index, the component files and whatever else the
/// enabled checks need.
///
/// # Errors
///
/// Any [`LoadError`] aborts the session.
#[instrument(skip_all, name = "dictionary_loader")]
pub fn load(config: &ValidationConfig, reporter: &ProgressReporter) -> Result<LoadedDictionary, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Loading" });
    let paths = &config.paths;
    info!(
        root = %paths.root.display(),
        index = %paths.index_path.display(),
        "Loading monomer library."
    );

    let master = read_document(&paths.index_path)?;
    let index = load_index(&master, &paths.index_path)?;
    let components = ComponentScanner::new(&paths.root, reporter).scan()?;

    let catalog = if config.needs_energy_catalog() {
        let catalog = EnergyTypeCatalog::load(&paths.energy_lib_path).map_err(LoadError::from)?;
        info!(types = catalog.len(), "Energy-type catalog loaded.");
        Some(catalog)
    } else {
        None
    };

    let library = if config.needs_library() {
        Some(build_library(&master, &paths.index_path, &index, &components)?)
    } else {
        None
    };

    reporter.report(Progress::PhaseFinish);
    Ok(LoadedDictionary {
        index,
        components,
        catalog,
        library,
    })
}

fn run_check(dictionary: &LoadedDictionary, config: &ValidationConfig, check: CheckKind) -> Vec<Violation> {
    match check {
        CheckKind::GroupConsistency => {
            tasks::group_consistency::run(&dictionary.index.components, &dictionary.components, &config.paths.root)
        }
        CheckKind::GroupVocabulary => {
            tasks::group_vocabulary::run(&dictionary.index.components, &config.group_vocabulary)
        }
        CheckKind::EnergyTypes => match &dictionary.catalog {
            Some(catalog) => tasks::energy_types::run(&dictionary.components, catalog),
            None => {
                warn!("No energy-type catalog loaded; skipping the energy type check.");
                Vec::new()
            }
        },
        CheckKind::RestraintAtoms => tasks::restraint_atoms::run(&dictionary.components),
        CheckKind::ReferentialIntegrity => {
            let known = dictionary.known_groups(&config.pseudo_groups);
            tasks::referential::run(&dictionary.index, &known)
        }
        CheckKind::MonomerCross => match &dictionary.library {
            Some(library) => tasks::monomer_cross::run(library),
            None => {
                warn!("No library assembled; skipping the monomer cross check.");
                Vec::new()
            }
        },
    }
}

/// Runs every enabled check over an already loaded dictionary.
#[instrument(skip_all, name = "check_runner")]
pub fn run_checks(
    dictionary: &LoadedDictionary,
    config: &ValidationConfig,
    reporter: &ProgressReporter,
) -> SessionReport {
    reporter.report(Progress::PhaseStart { name: "Checking" });
    reporter.report(Progress::TaskStart {
        total_steps: config.checks.len() as u64,
    });

    let mut outcomes = Vec::with_capacity(config.checks.len());
    for &check in &config.checks {
        let outcome = CheckOutcome::new(check, run_check(dictionary, config, check));
        let errors = outcome.count(Severity::Error);
        let warnings = outcome.count(Severity::Warning);
        info!(check = %check, errors, warnings, "Check finished.");
        reporter.report(Progress::CheckFinished {
            check,
            errors,
            warnings,
        });
        reporter.report(Progress::TaskIncrement);
        outcomes.push(outcome);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    SessionReport::new(outcomes, config.warnings_as_errors)
}

/// Loads the dictionary once and runs every enabled check over it.
#[instrument(skip_all, name = "validation_workflow")]
pub fn run(config: &ValidationConfig, reporter: &ProgressReporter) -> Result<SessionReport, EngineError> {
    let dictionary = load(config, reporter)?;
    let report = run_checks(&dictionary, config, reporter);
    info!(
        passed = report.passed(),
        errors = report.count(Severity::Error),
        warnings = report.count(Severity::Warning),
        "Validation session complete."
    );
    Ok(report)
}
