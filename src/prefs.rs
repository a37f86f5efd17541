//! JInto completion-settings generation for migrated accessor classes.
//!
//! Each migrated accessor class declares the resolver field and a
//! `BUNDLE_NAME` constant; this module extracts (accessor class, bundle
//! name) pairs from such files and renders them into the fixed JInto
//! preferences format: a properties file whose value is backslash-escaped
//! XML (`\=` and literal `\n` sequences are part of the format, not of
//! this program's line handling).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use thiserror::Error;

/// Settings directory recognized by Eclipse inside a project.
pub const SETTINGS_DIR: &str = ".settings";
/// Fixed name of the JInto preferences file.
pub const SETTINGS_FILENAME: &str = "de.guhsoft.jinto.core.prefs";

const BUNDLE_DECLARATION: &str = "private static final String BUNDLE_NAME";
const CLASS_DECLARATION: &str = "public class ";

const REFERENCE_TEMPLATE_HEAD: &str = r#"<resourceBundleReference resourceBundleName\="#;
const PREFS_KEY: &str = "de.guhsoft.jinto.core.accessorConfiguration";

/// One accessor class and the resource bundle it resolves against, both
/// fully qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorProperty {
    pub accessor: String,
    pub bundle: String,
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("cannot read {0}")]
    Unreadable(PathBuf),
    #[error("{0} misses its package identifier")]
    MissingPackage(PathBuf),
    #[error("{0} misses its bundle-name declaration")]
    MissingBundle(PathBuf),
    #[error("{0} misses its class declaration")]
    MissingClass(PathBuf),
}

/// Extracts the (accessor, bundle) pair from a migrated accessor file.
///
/// A single forward scan captures the first package line, the first
/// bundle-name declaration (everything after a `/` is comment-stripped)
/// and the first class declaration, stopping as soon as all three are
/// found.
pub fn extract_accessor(path: &Path) -> Result<AccessorProperty, PrefsError> {
    let content = fs::read_to_string(path)
        .map_err(|_| PrefsError::Unreadable(path.to_path_buf()))?;

    let mut package: Option<String> = None;
    let mut bundle: Option<String> = None;
    let mut class_name: Option<String> = None;
    for line in content.lines() {
        if package.is_none() && line.trim_start().starts_with("package") {
            package = Some(line.replace(';', "").replace("package", "").trim().to_owned());
        }
        if bundle.is_none() && line.contains(BUNDLE_DECLARATION) {
            let mut value = line
                .replace(BUNDLE_DECLARATION, "")
                .replace(['"', '=', ';'], "")
                .trim()
                .to_owned();
            if let Some(comment) = value.find('/') {
                value = value[..comment].trim().to_owned();
            }
            bundle = Some(value);
        }
        if class_name.is_none() && line.contains(CLASS_DECLARATION) {
            class_name = Some(line.replace(CLASS_DECLARATION, "").replace('{', "").trim().to_owned());
        }
        if package.is_some() && bundle.is_some() && class_name.is_some() {
            break;
        }
    }

    let package = package.ok_or_else(|| PrefsError::MissingPackage(path.to_path_buf()))?;
    let bundle = bundle.ok_or_else(|| PrefsError::MissingBundle(path.to_path_buf()))?;
    let class_name = class_name.ok_or_else(|| PrefsError::MissingClass(path.to_path_buf()))?;
    Ok(AccessorProperty {
        accessor: format!("{}.{}", package, class_name),
        bundle,
    })
}

fn render_reference(property: &AccessorProperty) -> String {
    format!(
        r#"{head}"{bundle}">\n<accessor typeName\="{accessor}">\n<methodReference methodName\="getString">\n<parameter index\="0" isSelected\="true" parameterName\="key" parameterType\="java.lang.String"/>\n</methodReference>\n</accessor>\n</resourceBundleReference>"#,
        head = REFERENCE_TEMPLATE_HEAD,
        bundle = property.bundle,
        accessor = property.accessor,
    )
}

/// Renders the full preferences-file content for one project.
pub fn render_settings(properties: &[AccessorProperty]) -> String {
    let references = properties
        .iter()
        .map(render_reference)
        .collect::<Vec<_>>()
        .join(r"\n");
    format!(
        "{key}=<?xml version\\=\"1.0\" encoding\\=\"UTF-8\"?>\\n<root>\\n{references}\\n</root>\n\
         eclipse.preferences.version=1\n",
        key = PREFS_KEY,
        references = references,
    )
}

/// Writes the preferences file under `<project>/.settings/`, creating the
/// directory as needed. An existing file is never overwritten: the
/// conflict is reported loudly and `None` is returned.
pub fn write_settings_file(project_dir: &Path, data: &str) -> Result<Option<PathBuf>> {
    let settings_dir = project_dir.join(SETTINGS_DIR);
    fs::create_dir_all(&settings_dir)
        .with_context(|| format!("failed to create {}", settings_dir.display()))?;
    let settings_path = settings_dir.join(SETTINGS_FILENAME);
    if settings_path.exists() {
        eprintln!(
            "{} not writing {}: file already exists. What would have been written:\n{}",
            "error:".bold().red(),
            settings_path.display(),
            data
        );
        return Ok(None);
    }
    fs::write(&settings_path, data)
        .with_context(|| format!("failed to write {}", settings_path.display()))?;
    Ok(Some(settings_path))
}
