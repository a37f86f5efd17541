//! Per-file rewriting and parallel dispatch over the whole file set.
//!
//! Every target file is rewritten independently: the rule table is
//! immutable and shared read-only, and the replaced-symbol set lives inside
//! a single [`crate::rewrite::rewrite`] call, so no cross-file coordination
//! is needed. Files are partitioned round-robin into disjoint sub-lists and
//! processed on the rayon pool; `--single-process` walks the same
//! sub-lists sequentially for deterministic debugging.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;

use crate::rewrite::{CompiledRules, rewrite};

/// Hard timeout for collecting all worker results. All-or-nothing: on
/// expiry the whole batch is aborted, not individual files.
pub const BATCH_TIMEOUT: Duration = Duration::from_secs(900);

/// The result of rewriting one file: changed, unchanged, or failed.
/// Failures are carried per file instead of aborting the batch.
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<bool>,
}

/// Rewrites one file in place, writing back only if the content changed.
///
/// The file is read and written byte-for-byte apart from the rewrites; no
/// newline translation happens, so original line endings survive for
/// downstream diffing tools.
pub fn rewrite_file(path: &Path, rules: &CompiledRules) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rewritten = rewrite(&content, rules);
    let changed = rewritten != content;
    if changed {
        fs::write(path, rewritten)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(changed)
}

/// Distributes `items` round-robin over `buckets` sub-lists: item `i` goes
/// to bucket `i % buckets`, keeping relative order within each bucket.
pub fn partition<T>(items: Vec<T>, buckets: usize) -> Vec<Vec<T>> {
    let buckets = buckets.max(1);
    let mut lists: Vec<Vec<T>> = (0..buckets).map(|_| Vec::new()).collect();
    for (index, item) in items.into_iter().enumerate() {
        lists[index % buckets].push(item);
    }
    lists
}

fn rewrite_sublist(files: &[PathBuf], rules: &CompiledRules, verbose: u8) -> Vec<FileOutcome> {
    files
        .iter()
        .map(|path| {
            if verbose >= 2 {
                eprintln!("rewriting message references in {}", path.display());
            }
            FileOutcome {
                path: path.clone(),
                result: rewrite_file(path, rules),
            }
        })
        .collect()
}

/// Rewrites the full file set, collecting one outcome per file.
///
/// In parallel mode the batch runs on a spawned thread feeding a channel,
/// so result collection can be bounded by [`BATCH_TIMEOUT`]; a timeout is
/// fatal to the run. The sub-list count is three times the pool size so
/// stragglers do not serialize the tail of the batch.
pub fn rewrite_all(
    files: Vec<PathBuf>,
    rules: Arc<CompiledRules>,
    single_process: bool,
    verbose: u8,
) -> Result<Vec<FileOutcome>> {
    let buckets = 3 * rayon::current_num_threads();
    let sublists = partition(files, buckets);

    if single_process {
        return Ok(sublists
            .iter()
            .flat_map(|sublist| rewrite_sublist(sublist, &rules, verbose))
            .collect());
    }

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let outcomes: Vec<FileOutcome> = sublists
            .par_iter()
            .map(|sublist| rewrite_sublist(sublist, &rules, verbose))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();
        let _ = sender.send(outcomes);
    });
    receiver
        .recv_timeout(BATCH_TIMEOUT)
        .map_err(|_| anyhow!("rewrite batch did not finish within {}s", BATCH_TIMEOUT.as_secs()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::rules::ReplacementRule;

    fn rules() -> Arc<CompiledRules> {
        Arc::new(CompiledRules::compile(vec![ReplacementRule::new(
            "Bah", "FOO_a", "foo",
        )]))
    }

    #[test]
    fn test_partition_round_robin() {
        let lists = partition(vec![0, 1, 2, 3, 4, 5, 6], 3);
        assert_eq!(lists, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn test_partition_zero_buckets_degrades_to_one() {
        let lists = partition(vec![1, 2], 0);
        assert_eq!(lists, vec![vec![1, 2]]);
    }

    #[test]
    fn test_rewrite_file_writes_back_only_when_changed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "x = Bah.FOO_a;\n").unwrap();

        assert!(rewrite_file(file.path(), &rules()).unwrap());
        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "x = Bah.getString(\"FOO_a\");\n");

        // Second run finds nothing to do.
        assert!(!rewrite_file(file.path(), &rules()).unwrap());
    }

    #[test]
    fn test_rewrite_all_reports_per_file_failures() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "x = Bah.FOO_a;\n").unwrap();
        let files = vec![
            file.path().to_path_buf(),
            PathBuf::from("/nonexistent/Missing.java"),
        ];

        let outcomes = rewrite_all(files, rules(), true, 0).unwrap();
        assert_eq!(outcomes.len(), 2);
        let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].path.ends_with("Missing.java"));
    }

    #[test]
    fn test_rewrite_all_parallel_matches_sequential() {
        let mut files = Vec::new();
        let mut handles = Vec::new();
        for _ in 0..7 {
            let mut file = NamedTempFile::new().unwrap();
            write!(file, "import static foo.Bah.*;\nx = FOO_a;\n").unwrap();
            files.push(file.path().to_path_buf());
            handles.push(file);
        }

        let outcomes = rewrite_all(files.clone(), rules(), false, 0).unwrap();
        assert_eq!(outcomes.len(), 7);
        assert!(outcomes.iter().all(|o| *o.result.as_ref().unwrap()));
        for path in &files {
            let content = fs::read_to_string(path).unwrap();
            assert_eq!(content, "import foo.Bah;\nx = Bah.getString(\"FOO_a\");\n");
        }
    }
}
