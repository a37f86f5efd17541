//! The `setup` pipeline: find migrated accessor classes, render one JInto
//! preferences file per project, list the generated paths on stdout and
//! bundle them into a gzipped tarball.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;

use crate::archive::create_tarball;
use crate::cli::SetupArgs;
use crate::prefs::{extract_accessor, render_settings, write_settings_file};
use crate::report::{Failure, SetupSummary};
use crate::search::files_matching_pattern;

/// Detects migrated accessor classes by their resolver-field declaration.
static RESOLVER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("static.*final.*IMessageResolver.*MSG.*=").unwrap());

const SOURCE_EXTENSION: &str = "java";

pub fn run(args: &SetupArgs) -> Result<SetupSummary> {
    let verbose = args.common.verbose;
    let parent_directory = fs::canonicalize(&args.parent_directory).with_context(|| {
        format!(
            "invalid parent directory {}",
            args.parent_directory.display()
        )
    })?;

    let mut summary = SetupSummary::default();
    let mut relative_paths: Vec<PathBuf> = Vec::new();
    for module_path in &args.common.module_paths {
        let Ok(module_path) = fs::canonicalize(module_path) else {
            eprintln!(
                "{} not a directory: {}",
                "warning:".bold().yellow(),
                module_path.display()
            );
            continue;
        };
        if !module_path.is_dir() {
            eprintln!(
                "{} not a directory: {}",
                "warning:".bold().yellow(),
                module_path.display()
            );
            continue;
        }

        let accessor_files =
            files_matching_pattern(&module_path, &RESOLVER_PATTERN, SOURCE_EXTENSION, verbose);
        let mut properties = Vec::new();
        for path in &accessor_files {
            match extract_accessor(path) {
                Ok(property) => properties.push(property),
                Err(err) => summary.failures.push(Failure {
                    path: path.clone(),
                    reason: err.to_string(),
                }),
            }
        }
        if properties.is_empty() {
            continue;
        }

        let data = render_settings(&properties);
        match write_settings_file(&module_path, &data)? {
            Some(settings_path) => {
                match settings_path.strip_prefix(&parent_directory) {
                    Ok(relative) => relative_paths.push(relative.to_path_buf()),
                    Err(_) => eprintln!(
                        "{} {} is outside the parent directory, leaving it out of the archive",
                        "warning:".bold().yellow(),
                        settings_path.display()
                    ),
                }
                summary.generated.push(settings_path);
            }
            None => summary.skipped_existing += 1,
        }
    }

    // The generated files, one absolute path per line, for consumption by
    // whatever drives this tool.
    for path in &summary.generated {
        println!("{}", path.display());
    }

    if !relative_paths.is_empty() {
        let relatives: Vec<&std::path::Path> =
            relative_paths.iter().map(PathBuf::as_path).collect();
        match create_tarball(&args.target_tarball, &parent_directory, &relatives) {
            Ok(()) => summary.archived = true,
            Err(err) => eprintln!(
                "{} could not create {}: {:#}",
                "warning:".bold().yellow(),
                args.target_tarball.display(),
                err
            ),
        }
    }

    Ok(summary)
}
