//! File enumeration: the "text search over files" collaborator.
//!
//! Replaces the original external search tool with an in-process walk. The
//! contract stays the same: given roots, an extension filter and optionally
//! a content pattern, return matching file paths; "no matches" and
//! unreadable entries are an empty result, never a failure.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use regex::Regex;
use walkdir::WalkDir;

/// Returns all files under `root` whose extension matches `extension`
/// (case-insensitive) and whose content matches `pattern`.
///
/// Results are sorted so runs are deterministic regardless of directory
/// iteration order.
pub fn files_matching_pattern(
    root: &Path,
    pattern: &Regex,
    extension: &str,
    verbose: u8,
) -> Vec<PathBuf> {
    let mut matches: Vec<PathBuf> = files_with_extension(root, extension, verbose)
        .into_iter()
        .filter(|path| {
            fs::read_to_string(path).is_ok_and(|content| pattern.is_match(&content))
        })
        .collect();
    matches.sort();
    matches
}

/// Returns all files under `root` with the given extension
/// (case-insensitive), sorted.
pub fn files_with_extension(root: &Path, extension: &str, verbose: u8) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if verbose >= 1 {
                    eprintln!("{} cannot access path: {}", "warning:".bold().yellow(), err);
                }
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && has_extension(path, extension) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_files_with_extension_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        File::create(dir.path().join("A.java")).unwrap();
        File::create(sub.join("B.JAVA")).unwrap();
        File::create(sub.join("C.txt")).unwrap();

        let files = files_with_extension(dir.path(), "java", 0);
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("A.java"));
        assert!(files[1].ends_with("B.JAVA"));
    }

    #[test]
    fn test_files_matching_pattern() {
        let dir = tempdir().unwrap();
        let mut holder = File::create(dir.path().join("Messages.java")).unwrap();
        write!(holder, "public class Messages extends NLS {{}}\n").unwrap();
        let mut plain = File::create(dir.path().join("Plain.java")).unwrap();
        write!(plain, "public class Plain {{}}\n").unwrap();

        let pattern = Regex::new("class.*extends.*NLS").unwrap();
        let files = files_matching_pattern(dir.path(), &pattern, "java", 0);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Messages.java"));
    }

    #[test]
    fn test_missing_root_yields_empty_result() {
        let files = files_with_extension(Path::new("/nonexistent/root"), "java", 0);
        assert!(files.is_empty());
    }
}
