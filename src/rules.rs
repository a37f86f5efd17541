//! Replacement-rule construction and ordering.
//!
//! One rule is emitted per declared message variable, mapping the qualified
//! reference `Class.VARIABLE` to the accessor call
//! `Class.getString("VARIABLE")`. The global rule order is a correctness
//! requirement: longest variable names first, so a short name can never
//! match inside a longer one that has not been handled yet.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::extract::{class_name_from_path, variable_name_from_line};

/// A single textual rewrite rule for one message variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    /// Qualified reference, `Class.VARIABLE`.
    pub from: String,
    /// Accessor call, `Class.getString("VARIABLE")`.
    pub to: String,
    pub class_name: String,
    pub variable_name: String,
    pub package: String,
}

impl ReplacementRule {
    pub fn new(class_name: &str, variable_name: &str, package: &str) -> Self {
        Self {
            from: format!("{}.{}", class_name, variable_name),
            to: format!("{}.getString(\"{}\")", class_name, variable_name),
            class_name: class_name.to_owned(),
            variable_name: variable_name.to_owned(),
            package: package.to_owned(),
        }
    }

    /// The plain class import that replaces every rewritten import form.
    pub fn class_import(&self) -> String {
        format!("import {}.{}", self.package, self.class_name)
    }

    /// `import static <pkg>.<class>.<variable>` — the most specific form.
    pub fn static_variable_import(&self) -> String {
        format!("import static {}.{}", self.package, self.from)
    }

    /// `import static <pkg>.<class>.*` — the detection signal for
    /// unqualified variable usage.
    pub fn static_star_import(&self) -> String {
        format!("import static {}.{}.*", self.package, self.class_name)
    }
}

/// Builds the ordered rule list from the holder files' declaration lines
/// and packages.
///
/// Holder files are visited in path order so the output is deterministic.
/// Sorting ascending by (variable length, variable, class-name length,
/// from-pattern) and reversing puts the longest variable names first;
/// applying a short-named rule before a longer one containing it as a
/// substring would corrupt the longer reference.
pub fn build_rules(
    files_and_lines: &BTreeMap<PathBuf, Vec<String>>,
    files_and_packages: &BTreeMap<PathBuf, String>,
) -> Result<Vec<ReplacementRule>> {
    let mut rules = Vec::new();
    for (path, lines) in files_and_lines {
        let class_name = class_name_from_path(path)
            .with_context(|| format!("no class name derivable from {}", path.display()))?;
        let package = files_and_packages
            .get(path)
            .with_context(|| format!("no package recorded for {}", path.display()))?;
        for line in lines {
            let variable_name = variable_name_from_line(line)?;
            rules.push(ReplacementRule::new(&class_name, &variable_name, package));
        }
    }
    rules.sort_by_key(|rule| {
        Reverse((
            rule.variable_name.len(),
            rule.variable_name.clone(),
            rule.class_name.len(),
            rule.from.clone(),
        ))
    });
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(
        entries: &[(&str, &str, &[&str])],
    ) -> (BTreeMap<PathBuf, Vec<String>>, BTreeMap<PathBuf, String>) {
        let mut lines = BTreeMap::new();
        let mut packages = BTreeMap::new();
        for (path, package, declarations) in entries {
            lines.insert(
                PathBuf::from(path),
                declarations.iter().map(|l| l.to_string()).collect(),
            );
            packages.insert(PathBuf::from(path), package.to_string());
        }
        (lines, packages)
    }

    #[test]
    fn test_single_rule() {
        let (lines, packages) = holder(&[(
            "foo/Bah.java",
            "foo",
            &["   public static String FOO_thing;\n"],
        )]);

        let rules = build_rules(&lines, &packages).unwrap();
        assert_eq!(
            rules,
            vec![ReplacementRule {
                from: "Bah.FOO_thing".to_owned(),
                to: "Bah.getString(\"FOO_thing\")".to_owned(),
                class_name: "Bah".to_owned(),
                variable_name: "FOO_thing".to_owned(),
                package: "foo".to_owned(),
            }]
        );
    }

    #[test]
    fn test_longer_variable_names_sort_first() {
        let (lines, packages) = holder(&[(
            "foo/Bah.java",
            "foo",
            &[
                "  public static String FOO_a;\n",
                "  public static String FOO_aa;\n",
            ],
        )]);

        let rules = build_rules(&lines, &packages).unwrap();
        assert_eq!(rules[0].variable_name, "FOO_aa");
        assert_eq!(rules[1].variable_name, "FOO_a");
    }

    #[test]
    fn test_equal_length_breaks_ties_by_descending_variable_name() {
        let (lines, packages) = holder(&[(
            "foo/Baz.java",
            "foo",
            &[
                "  public static String FOO_ging;\n",
                "  public static String FOO_ling;\n",
            ],
        )]);

        let rules = build_rules(&lines, &packages).unwrap();
        assert_eq!(rules[0].variable_name, "FOO_ling");
        assert_eq!(rules[1].variable_name, "FOO_ging");
    }

    #[test]
    fn test_same_variable_in_different_classes_tracked_independently() {
        let (lines, packages) = holder(&[
            (
                "foo/0Bah.java",
                "foo",
                &["  public static String FOO_aing;\n"],
            ),
            (
                "foo/Bah.java",
                "foo",
                &["  public static String FOO_aing;\n"],
            ),
        ]);

        let rules = build_rules(&lines, &packages).unwrap();
        assert_eq!(rules.len(), 2);
        // Same variable name: the longer class name sorts first.
        assert_eq!(rules[0].from, "0Bah.FOO_aing");
        assert_eq!(rules[1].from, "Bah.FOO_aing");
    }

    #[test]
    fn test_import_forms() {
        let rule = ReplacementRule::new("Messages", "Editor_Title", "net.disy.x");
        assert_eq!(rule.class_import(), "import net.disy.x.Messages");
        assert_eq!(
            rule.static_variable_import(),
            "import static net.disy.x.Messages.Editor_Title"
        );
        assert_eq!(
            rule.static_star_import(),
            "import static net.disy.x.Messages.*"
        );
    }
}
