//! The `convert` pipeline: extract facts from every holder file, build the
//! rule table, rewrite all usage sites in parallel, then transform the
//! holder files themselves.
//!
//! The ordering between the two rewrite phases is a program invariant: the
//! holder transformation consumes the declaration lines captured before any
//! rewriting, and usage rewriting never touches holder files, so running
//! all usage rewrites first is safe without any locking.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use regex::Regex;

use crate::cli::ConvertArgs;
use crate::extract::{declared_package, declared_variable_lines, variable_name_from_line};
use crate::holder::transform_holder_file;
use crate::report::{Failure, MigrationSummary};
use crate::rewrite::CompiledRules;
use crate::rewriter::rewrite_all;
use crate::rules::build_rules;
use crate::search::{files_matching_pattern, files_with_extension};

/// Detects message-holder files: a class declaration extending the NLS
/// marker type.
static HOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("class.*extends.*NLS").unwrap());

const SOURCE_EXTENSION: &str = "java";

pub fn run(args: &ConvertArgs) -> Result<MigrationSummary> {
    let verbose = args.common.verbose;
    // Absolute paths so every collaborator interprets them the same way.
    let module_paths: Vec<PathBuf> = args
        .common
        .module_paths
        .iter()
        .map(|path| {
            fs::canonicalize(path).with_context(|| format!("invalid module path {}", path.display()))
        })
        .collect::<Result<_>>()?;

    let mut holder_files: Vec<PathBuf> = Vec::new();
    for module_path in &module_paths {
        holder_files.extend(files_matching_pattern(
            module_path,
            &HOLDER_PATTERN,
            SOURCE_EXTENSION,
            verbose,
        ));
    }

    let mut summary = MigrationSummary::default();
    let mut files_and_lines: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
    let mut files_and_packages: BTreeMap<PathBuf, String> = BTreeMap::new();
    for path in &holder_files {
        let lines = declared_variable_lines(path);
        // A holder whose package or declarations cannot be parsed is
        // reported and left out; the rest of the batch proceeds.
        let facts = declared_package(path).and_then(|package| {
            for line in &lines {
                variable_name_from_line(line)?;
            }
            Ok(package)
        });
        match facts {
            Ok(package) => {
                files_and_lines.insert(path.clone(), lines);
                files_and_packages.insert(path.clone(), package);
            }
            Err(err) => summary.failures.push(Failure {
                path: path.clone(),
                reason: err.to_string(),
            }),
        }
    }

    let rules = build_rules(&files_and_lines, &files_and_packages)?;
    if verbose >= 1 {
        eprintln!(
            "built {} replacement rules from {} holder files",
            rules.len(),
            files_and_lines.len()
        );
    }
    let compiled = Arc::new(CompiledRules::compile(rules));

    // Every source file under the roots except the holder files themselves.
    let holders: HashSet<&PathBuf> = holder_files.iter().collect();
    let mut targets: Vec<PathBuf> = Vec::new();
    for module_path in &module_paths {
        targets.extend(
            files_with_extension(module_path, SOURCE_EXTENSION, verbose)
                .into_iter()
                .filter(|path| !holders.contains(path)),
        );
    }

    let outcomes = rewrite_all(targets, compiled, args.single_process, verbose)?;
    for outcome in outcomes {
        match outcome.result {
            Ok(true) => summary.rewritten += 1,
            Ok(false) => summary.unchanged += 1,
            Err(err) => summary.failures.push(Failure {
                path: outcome.path,
                reason: format!("{:#}", err),
            }),
        }
    }

    // Holder transformation is deliberately sequential and last.
    for (path, lines) in &files_and_lines {
        match transform_holder_file(path, lines, verbose) {
            Ok(changed) => {
                if changed {
                    summary.holders_transformed += 1;
                }
            }
            Err(err) => summary.failures.push(Failure {
                path: path.clone(),
                reason: format!("{:#}", err),
            }),
        }
    }

    Ok(summary)
}
