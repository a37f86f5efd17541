//! End-to-end tests for the `setup` pipeline.

use std::fs::{self, File};
use std::path::Path;

use anyhow::Result;
use flate2::read::GzDecoder;
use tempfile::TempDir;

use nlsmig::cli::{CommonArgs, SetupArgs};
use nlsmig::commands::setup;

const ACCESSOR: &str = r#"package net.disy.x;

import net.disy.commons.core.locale.IMessageResolver;
import net.disy.commons.core.locale.ResourceBundleMessageResolver;

public class Messages {
  private static final String BUNDLE_NAME = "net.disy.x.messages"; //$NON-NLS-1$

  private static final IMessageResolver MSG = new ResourceBundleMessageResolver(BUNDLE_NAME);

  public static String getString(String key) {
    return MSG.getString(key);
  }
}
"#;

fn write(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(path, content)?;
    Ok(())
}

fn setup_args(parent: &Path, projects: &[&Path]) -> SetupArgs {
    SetupArgs {
        common: CommonArgs {
            module_paths: projects.iter().map(|p| p.to_path_buf()).collect(),
            verbose: 0,
        },
        parent_directory: parent.to_path_buf(),
        target_tarball: parent.join("jinto-init.tar.gz"),
    }
}

#[test]
fn test_settings_generation_and_archive() -> Result<()> {
    let dir = TempDir::new()?;
    let parent = dir.path();
    let project = parent.join("proj");
    write(parent, "proj/src/net/disy/x/Messages.java", ACCESSOR)?;

    let summary = setup::run(&setup_args(parent, &[&project]))?;
    assert!(!summary.has_failures());
    assert_eq!(summary.generated.len(), 1);
    assert!(summary.archived);

    let settings = fs::read_to_string(project.join(".settings/de.guhsoft.jinto.core.prefs"))?;
    assert_eq!(
        settings
            .matches(r#"<resourceBundleReference resourceBundleName\="net.disy.x.messages">"#)
            .count(),
        1
    );
    assert!(settings.contains(r#"<accessor typeName\="net.disy.x.Messages">"#));
    assert!(settings.ends_with("eclipse.preferences.version=1\n"));

    let tarball = parent.join("jinto-init.tar.gz");
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(&tarball)?));
    let names: Vec<String> = archive
        .entries()?
        .map(|entry| {
            entry
                .unwrap()
                .path()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, vec!["proj/.settings/de.guhsoft.jinto.core.prefs"]);
    Ok(())
}

#[test]
fn test_existing_settings_file_is_not_overwritten() -> Result<()> {
    let dir = TempDir::new()?;
    let parent = dir.path();
    let project = parent.join("proj");
    write(parent, "proj/src/net/disy/x/Messages.java", ACCESSOR)?;

    setup::run(&setup_args(parent, &[&project]))?;
    let settings_path = project.join(".settings/de.guhsoft.jinto.core.prefs");
    let first = fs::read_to_string(&settings_path)?;

    let summary = setup::run(&setup_args(parent, &[&project]))?;
    assert_eq!(summary.generated.len(), 0);
    assert_eq!(summary.skipped_existing, 1);
    assert!(!summary.archived);
    assert_eq!(fs::read_to_string(&settings_path)?, first);
    Ok(())
}

#[test]
fn test_missing_module_is_skipped() -> Result<()> {
    let dir = TempDir::new()?;
    let parent = dir.path();
    let missing = parent.join("does-not-exist");

    let summary = setup::run(&setup_args(parent, &[&missing]))?;
    assert!(!summary.has_failures());
    assert!(summary.generated.is_empty());
    assert!(!summary.archived);
    Ok(())
}

#[test]
fn test_accessor_without_class_declaration_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    let parent = dir.path();
    let project = parent.join("proj");
    write(
        parent,
        "proj/src/Broken.java",
        "package net.disy.x;\n\
         interface Broken {\n\
         \x20 static final IMessageResolver MSG = null; // not a class\n\
         \x20 String BUNDLE_NAME_HINT = \"\";\n\
         }\n",
    )?;

    let summary = setup::run(&setup_args(parent, &[&project]))?;
    assert!(summary.has_failures());
    assert!(summary.failures[0].path.ends_with("Broken.java"));
    assert!(summary.generated.is_empty());
    Ok(())
}
