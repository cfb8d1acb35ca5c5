use super::violation::{CheckKind, Severity, Violation};
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    PassedWithWarnings,
    Failed,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Passed => "passed",
            Verdict::PassedWithWarnings => "passed with warnings",
            Verdict::Failed => "FAILED",
        }
    }
}

/// Everything one check found, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub check: CheckKind,
    pub violations: Vec<Violation>,
}

impl CheckOutcome {
    pub fn new(check: CheckKind, violations: Vec<Violation>) -> Self {
        Self { check, violations }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    pub fn verdict(&self, warnings_as_errors: bool) -> Verdict {
        let errors = self.count(Severity::Error);
        let warnings = self.count(Severity::Warning);
        if errors > 0 || (warnings_as_errors && warnings > 0) {
            Verdict::Failed
        } else if warnings > 0 {
            Verdict::PassedWithWarnings
        } else {
            Verdict::Passed
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error while writing report: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error while writing report: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct ViolationRow<'a> {
    check: CheckKind,
    severity: Severity,
    code: &'static str,
    subject: &'a str,
    message: String,
}

/// Per-check outcomes of one validation session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub outcomes: Vec<CheckOutcome>,
    pub warnings_as_errors: bool,
}

impl SessionReport {
    pub fn new(outcomes: Vec<CheckOutcome>, warnings_as_errors: bool) -> Self {
        Self {
            outcomes,
            warnings_as_errors,
        }
    }

    pub fn outcome(&self, check: CheckKind) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.check == check)
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.outcomes.iter().flat_map(|o| o.violations.iter())
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.outcomes.iter().map(|o| o.count(severity)).sum()
    }

    pub fn failed_checks(&self) -> Vec<CheckKind> {
        self.outcomes
            .iter()
            .filter(|o| o.verdict(self.warnings_as_errors) == Verdict::Failed)
            .map(|o| o.check)
            .collect()
    }

    pub fn passed(&self) -> bool {
        self.failed_checks().is_empty()
    }

    /// Writes the itemized report followed by a per-check summary.
    pub fn write_text(&self, writer: &mut impl Write) -> Result<(), ReportError> {
        for outcome in &self.outcomes {
            if outcome.violations.is_empty() {
                continue;
            }
            writeln!(
                writer,
                "== {} ({} finding(s))",
                outcome.check,
                outcome.violations.len()
            )?;
            for violation in &outcome.violations {
                writeln!(writer, "  {}: {}", violation.severity, violation.kind)?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "Summary:")?;
        for outcome in &self.outcomes {
            writeln!(
                writer,
                "  {:<24} {:<22} errors: {:>4}  warnings: {:>4}",
                outcome.check.name(),
                outcome.verdict(self.warnings_as_errors).label(),
                outcome.count(Severity::Error),
                outcome.count(Severity::Warning)
            )?;
        }
        let verdict = if self.passed() { "PASSED" } else { "FAILED" };
        writeln!(
            writer,
            "Session {}: {} error(s), {} warning(s).",
            verdict,
            self.count(Severity::Error),
            self.count(Severity::Warning)
        )?;
        Ok(())
    }

    /// Writes one CSV row per violation with a header line.
    pub fn write_csv(&self, writer: impl Write) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for violation in self.violations() {
            csv_writer.serialize(ViolationRow {
                check: violation.check,
                severity: violation.severity,
                code: violation.kind.code(),
                subject: violation.kind.subject(),
                message: violation.kind.to_string(),
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
