//! Transformation of the message-holder files themselves.
//!
//! After all usage sites have been rewritten, each holder class is turned
//! from an NLS constant holder into a ResourceBundle accessor: the field
//! declarations go away, the static initializer becomes a resolver field,
//! the resolver imports are injected, a `getString` method is appended,
//! blank-line runs are collapsed and the ` extends NLS` marker is dropped.
//! All steps run in memory on one read; the file is written once, only if
//! something changed, so a structural failure never leaves a partial edit.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

/// The field replacing the static initializer block.
pub const RESOLVER_FIELD: &str =
    "private static final IMessageResolver MSG = new ResourceBundleMessageResolver(BUNDLE_NAME);";

/// All holder files carry this import; the resolver imports go right
/// before it.
pub const NLS_IMPORT: &str = "import org.eclipse.osgi.util.NLS";

const ADDITIONAL_IMPORTS: &str = "import net.disy.commons.core.locale.IMessageResolver;\n\
     import net.disy.commons.core.locale.ResourceBundleMessageResolver;\n\
     import java.util.MissingResourceException;\n\n";

/// The accessor method appended before the final closing brace.
pub const GETSTRING_METHOD: &str = "\n  public static String getString(String key) {\n    return MSG.getString(key);\n  }";

const MARKER_SUFFIX: &str = " extends NLS";

#[derive(Debug, Error)]
pub enum HolderError {
    #[error("no static initializer block found")]
    NoStaticBlock,
    #[error("no NLS import line found")]
    NoNlsImport,
    #[error("no closing brace found")]
    NoClosingBrace,
}

/// Removes every captured declaration line by exact full-line match.
pub fn remove_declared_lines(content: &str, lines: &[String]) -> String {
    let to_remove: HashSet<&str> = lines.iter().map(String::as_str).collect();
    content
        .split_inclusive('\n')
        .filter(|line| !to_remove.contains(line))
        .collect()
}

/// Replaces the first `static {` block, closed at the first `}` inside it,
/// with the resolver-field declaration.
pub fn replace_static_block(content: &str) -> Result<String, HolderError> {
    const OPENING: &str = "static {";
    let start = content.find(OPENING).ok_or(HolderError::NoStaticBlock)?;
    let body = &content[start + OPENING.len()..];
    let close = body.find('}').ok_or(HolderError::NoStaticBlock)?;
    Ok(format!(
        "{}{}{}",
        &content[..start],
        RESOLVER_FIELD,
        &body[close + 1..]
    ))
}

/// Inserts the resolver imports immediately before the NLS import line,
/// leaving everything around the insertion point untouched.
pub fn insert_resolver_imports(content: &str) -> Result<String, HolderError> {
    let at = content.find(NLS_IMPORT).ok_or(HolderError::NoNlsImport)?;
    Ok(format!(
        "{}{}{}",
        &content[..at],
        ADDITIONAL_IMPORTS,
        &content[at..]
    ))
}

/// Inserts `block` just before the last `\n}` of the file, i.e. at the end
/// of the outermost class body.
pub fn append_before_final_brace(content: &str, block: &str) -> Result<String, HolderError> {
    let at = content.rfind("\n}").ok_or(HolderError::NoClosingBrace)?;
    Ok(format!("{}{}{}", &content[..at], block, &content[at..]))
}

/// Collapses runs of three or more consecutive blank lines to two and
/// drops a doubled blank line at end-of-file; a single trailing blank line
/// stays as-is.
pub fn collapse_blank_lines(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len() - 1;
    let blank = |line: Option<&str>| line.is_some_and(|l| l.trim().is_empty());

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut prev: Option<&str> = None;
    let mut prev_prev: Option<&str> = None;
    for (index, &line) in lines.iter().enumerate() {
        let third_blank = blank(prev_prev) && blank(prev) && line.trim().is_empty();
        let trailing_blank = index == last && blank(prev) && line.trim().is_empty();
        if !third_blank && !trailing_blank {
            kept.push(line);
        }
        prev_prev = prev;
        prev = Some(line);
    }
    kept.join("\n")
}

/// Strips the ` extends NLS` marker from the class declaration.
pub fn remove_marker_supertype(content: &str) -> String {
    content.replace(MARKER_SUFFIX, "")
}

/// Runs the full holder transformation on one file.
///
/// `declaration_lines` are the lines captured by
/// [`crate::extract::declared_variable_lines`] before any usage rewriting.
/// Returns whether the file was changed. A missing structural element
/// (static block, NLS import, closing brace) is an error for this file
/// only; the caller reports it and moves on.
pub fn transform_holder_file(
    path: &Path,
    declaration_lines: &[String],
    verbose: u8,
) -> Result<bool> {
    if verbose >= 1 {
        eprintln!("rewriting message holder {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut rewritten = remove_declared_lines(&content, declaration_lines);
    rewritten = replace_static_block(&rewritten)
        .with_context(|| format!("cannot transform {}", path.display()))?;
    rewritten = insert_resolver_imports(&rewritten)
        .with_context(|| format!("cannot transform {}", path.display()))?;
    rewritten = append_before_final_brace(&rewritten, GETSTRING_METHOD)
        .with_context(|| format!("cannot transform {}", path.display()))?;
    rewritten = collapse_blank_lines(&rewritten);
    rewritten = remove_marker_supertype(&rewritten);

    let changed = rewritten != content;
    if changed {
        fs::write(path, rewritten)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(changed)
}
