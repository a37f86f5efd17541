use anyhow::Result;

use crate::commands;
use crate::report;

mod args;
mod exit_status;

pub use args::{Arguments, Command, CommonArgs, ConvertArgs, SetupArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    match args.command {
        Command::Convert(cmd) => {
            let summary = commands::convert::run(&cmd)?;
            report::print_migration_summary(&summary);
            Ok(if summary.has_failures() {
                ExitStatus::Failure
            } else {
                ExitStatus::Success
            })
        }
        Command::Setup(cmd) => {
            let summary = commands::setup::run(&cmd)?;
            report::print_setup_summary(&summary);
            Ok(if summary.has_failures() {
                ExitStatus::Failure
            } else {
                ExitStatus::Success
            })
        }
    }
}
