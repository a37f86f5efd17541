//! Structural fact extraction from NLS message-holder files.
//!
//! Holder files follow a narrow convention (a class extending `NLS`, public
//! static `String` fields, one static initializer block), so line-level
//! pattern matching is enough here and a real Java parser is deliberately
//! not used. The functions in this module are the only place that knows
//! those line heuristics; everything downstream consumes structured facts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Matches `public ... static ... String` as whole-word tokens in that order.
static DECLARATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpublic\b.*\bstatic\b.*\bString\b").unwrap());

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0} has no package declaration")]
    MissingPackage(PathBuf),
    #[error("declaration line has no String type token: {0:?}")]
    MalformedDeclaration(String),
}

/// Returns the raw declaration lines of a holder file, in file order.
///
/// A declaration line contains `public`, `static` and `String` in that
/// relative order and no `(` (which would make it a method). Lines keep
/// their original terminators so they can later be removed from the file
/// by exact match. An unreadable file yields an empty list: the absence of
/// NLS markers means "not a holder file", not an error.
pub fn declared_variable_lines(path: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .split_inclusive('\n')
        .filter(|line| DECLARATION_REGEX.is_match(line) && !line.contains('('))
        .map(str::to_owned)
        .collect()
}

/// Returns the package a holder file declares.
///
/// The package name is required to build qualified replacement patterns,
/// so its absence is fatal for this file.
pub fn declared_package(path: &Path) -> Result<String, ExtractError> {
    let content =
        fs::read_to_string(path).map_err(|_| ExtractError::MissingPackage(path.to_path_buf()))?;
    content
        .lines()
        .find_map(|line| line.strip_prefix("package "))
        .map(|rest| rest.replace(';', "").trim().to_owned())
        .ok_or_else(|| ExtractError::MissingPackage(path.to_path_buf()))
}

/// Extracts the variable name from a declaration line.
///
/// A Java identifier cannot contain whitespace, so splitting the line into
/// tokens and taking the one after `String` is sufficient. A trailing
/// semicolon is stripped.
pub fn variable_name_from_line(line: &str) -> Result<String, ExtractError> {
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "String" {
            return tokens
                .next()
                .map(|variable| variable.replace(';', ""))
                .ok_or_else(|| ExtractError::MalformedDeclaration(line.to_owned()));
        }
    }
    Err(ExtractError::MalformedDeclaration(line.to_owned()))
}

/// Derives the holder class name from its file name (the stem).
pub fn class_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
}
