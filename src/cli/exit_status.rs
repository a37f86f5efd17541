use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for batch
/// rewrite tools.
///
/// - `Success` (0): Run completed, every file processed cleanly
/// - `Failure` (1): Run completed but some files were skipped or failed
/// - `Error` (2): Run aborted due to internal error (bad arguments, batch timeout, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed, every file processed cleanly.
    Success,
    /// Run completed but some files were skipped or failed.
    Failure,
    /// Run aborted due to internal error (bad arguments, batch timeout, etc.).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }
}
