//! nlsmig - Eclipse NLS to ResourceBundle migration
//!
//! A one-time source-code migration utility: it rewrites a Java codebase
//! from Eclipse's NLS (`org.eclipse.osgi.util.NLS`) message-constant
//! pattern to a ResourceBundle-based accessor pattern, plus a companion
//! tool generating JInto IDE-completion settings for the migrated accessor
//! classes. Structural facts are extracted by line/pattern matching, not a
//! real Java parser; the codebase being migrated follows a narrow enough
//! convention that this is sufficient and keeps the rewrites reviewable.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument surface, exit codes)
//! - `commands`: The `convert` and `setup` pipelines
//! - `extract`: Structural fact extraction from holder files
//! - `rules`: Replacement-rule construction and ordering
//! - `rewrite`: The pattern-based rewrite engine
//! - `rewriter`: Per-file rewriting and parallel dispatch
//! - `holder`: Transformation of the message-holder files
//! - `prefs`: JInto settings extraction and rendering
//! - `search`: File enumeration (the "text search" collaborator)
//! - `archive`: Tarball creation (the "archiver" collaborator)
//! - `report`: End-of-run summaries

pub mod archive;
pub mod cli;
pub mod commands;
pub mod extract;
pub mod holder;
pub mod prefs;
pub mod report;
pub mod rewrite;
pub mod rewriter;
pub mod rules;
pub mod search;
