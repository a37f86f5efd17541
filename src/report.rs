//! End-of-run summary formatting.
//!
//! Kept separate from the pipeline logic so the library can be driven
//! without printing side effects. Failures are summarized explicitly
//! instead of being buried in the log stream, and the caller turns a
//! non-empty failure list into a non-zero exit code.

use std::path::PathBuf;

use colored::Colorize;

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// One file that could not be processed, with the reason.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a `convert` run.
#[derive(Debug, Default)]
pub struct MigrationSummary {
    /// Usage-site files whose content changed.
    pub rewritten: usize,
    /// Usage-site files left untouched.
    pub unchanged: usize,
    /// Holder files successfully transformed.
    pub holders_transformed: usize,
    pub failures: Vec<Failure>,
}

impl MigrationSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Outcome of a `setup` run.
#[derive(Debug, Default)]
pub struct SetupSummary {
    /// Absolute paths of the generated settings files.
    pub generated: Vec<PathBuf>,
    /// Settings files that already existed and were not overwritten.
    pub skipped_existing: usize,
    pub archived: bool,
    pub failures: Vec<Failure>,
}

impl SetupSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

fn print_failures(failures: &[Failure]) {
    for failure in failures {
        eprintln!(
            "{}: {}: {}",
            "error".bold().red(),
            failure.path.display(),
            failure.reason
        );
    }
}

pub fn print_migration_summary(summary: &MigrationSummary) {
    print_failures(&summary.failures);
    let mark = if summary.has_failures() {
        FAILURE_MARK.red()
    } else {
        SUCCESS_MARK.green()
    };
    eprintln!(
        "{} {} rewritten, {} unchanged, {} holders transformed, {} failed",
        mark,
        summary.rewritten,
        summary.unchanged,
        summary.holders_transformed,
        summary.failures.len()
    );
}

pub fn print_setup_summary(summary: &SetupSummary) {
    print_failures(&summary.failures);
    let mark = if summary.has_failures() {
        FAILURE_MARK.red()
    } else {
        SUCCESS_MARK.green()
    };
    eprintln!(
        "{} {} settings files generated, {} already present, archive {}, {} failed",
        mark,
        summary.generated.len(),
        summary.skipped_existing,
        if summary.archived { "written" } else { "skipped" },
        summary.failures.len()
    );
}
