//! The pattern-based rewrite engine.
//!
//! Given one file's content and the ordered rule list, rewrites every NLS
//! message reference to its accessor-call form. Four usage shapes are
//! covered: the bare qualified reference (`Class.VARIABLE`), a static
//! import of the specific variable, a static-star import, and a direct
//! class import (which needs no rewrite beyond the qualified references).
//!
//! A per-call [`HashSet`] of already-replaced symbols guarantees each
//! distinct symbol is substituted at most once per file, no matter how many
//! candidate occurrences the content has.

use std::collections::HashSet;

use regex::Regex;

use crate::rules::ReplacementRule;

/// One rule plus everything precomputed for matching it.
///
/// The import literals and the substitution pattern depend only on the rule,
/// so they are built once per run and shared read-only across workers.
pub struct CompiledRule {
    pub rule: ReplacementRule,
    class_import: String,
    static_variable_import: String,
    static_star_import: String,
    variable_pattern: Regex,
}

/// The ordered, immutable rule table shared by all rewrite workers.
pub struct CompiledRules(Vec<CompiledRule>);

impl CompiledRules {
    /// Compiles the ordered rule list. The order of `rules` is preserved;
    /// see [`crate::rules::build_rules`] for why it matters.
    pub fn compile(rules: Vec<ReplacementRule>) -> Self {
        let compiled = rules
            .into_iter()
            .map(|rule| {
                let variable_pattern = Regex::new(&format!(
                    "([^.\"]){}([^\"])",
                    regex::escape(&rule.variable_name)
                ))
                .expect("escaped identifier is a valid pattern");
                CompiledRule {
                    class_import: rule.class_import(),
                    static_variable_import: rule.static_variable_import(),
                    static_star_import: rule.static_star_import(),
                    variable_pattern,
                    rule,
                }
            })
            .collect();
        Self(compiled)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.0.iter()
    }
}

/// Rewrites all NLS usages in `content` according to the rule table.
///
/// For each rule in order: a static import of the specific variable is
/// turned into a plain class import and the now-unqualified variable
/// occurrences become accessor calls; a static-star import triggers the
/// same variable substitution; a verbatim qualified reference is replaced
/// directly. The star-import line itself is only rewritten in a second
/// pass over the rule list, because its presence is the detection signal
/// for unqualified usage of every variable of that class and must remain
/// findable until all rules have been processed once.
pub fn rewrite(content: &str, rules: &CompiledRules) -> String {
    let mut replaced: HashSet<&str> = HashSet::new();
    let mut content = content.to_owned();

    for compiled in rules.iter() {
        let rule = &compiled.rule;
        if !replaced.contains(compiled.static_variable_import.as_str())
            && content.contains(&compiled.static_variable_import)
        {
            replaced.insert(&compiled.static_variable_import);
            content = content.replace(&compiled.static_variable_import, &compiled.class_import);
            if !replaced.contains(rule.variable_name.as_str()) {
                replaced.insert(&rule.variable_name);
                content = substitute_variable(
                    &content,
                    &compiled.variable_pattern,
                    &rule.variable_name,
                    &rule.to,
                );
            }
        }
        if content.contains(&compiled.static_star_import)
            && !replaced.contains(rule.variable_name.as_str())
        {
            replaced.insert(&rule.variable_name);
            content = substitute_variable(
                &content,
                &compiled.variable_pattern,
                &rule.variable_name,
                &rule.to,
            );
        }
        if !replaced.contains(rule.from.as_str()) && content.contains(&rule.from) {
            replaced.insert(&rule.from);
            content = content.replace(&rule.from, &rule.to);
        }
    }

    // Deferred star-import rewrite; see the function doc.
    for compiled in rules.iter() {
        if content.contains(&compiled.static_star_import)
            && !replaced.contains(compiled.static_star_import.as_str())
        {
            replaced.insert(&compiled.static_star_import);
            content = content.replace(&compiled.static_star_import, &compiled.class_import);
        }
    }

    content
}

/// Replaces stand-alone occurrences of `variable` with `to` without
/// touching qualified accesses or already-quoted keys.
///
/// `pattern` captures one context character before the variable (anything
/// but `.` and `"`) and one after (anything but `"`); both are preserved.
/// The scan keeps two explicit cursors, a search position and a copy
/// position in the original text, and emits into a fresh output buffer, so
/// inserted text is never rescanned. A variable name directly followed by
/// another identifier character still matches; the descending-length rule
/// ordering is what keeps that from mis-targeting a longer variable.
///
/// A match at absolute position 0 cannot carry a leading context character,
/// so it is handled separately after the scan: if the output starts with
/// the variable and the next character is not `"`, the prefix becomes the
/// accessor call.
pub fn substitute_variable(content: &str, pattern: &Regex, variable: &str, to: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut copy_from = 0;
    let mut search_from = 0;
    while let Some(captures) = pattern.captures_at(content, search_from) {
        let before = captures.get(1).expect("pattern has a leading group");
        let after = captures.get(2).expect("pattern has a trailing group");
        out.push_str(&content[copy_from..before.end()]);
        out.push_str(to);
        copy_from = after.start();
        search_from = after.start();
    }
    out.push_str(&content[copy_from..]);

    if out.starts_with(variable) && !out[variable.len()..].starts_with('"') {
        out = format!("{}{}", to, &out[variable.len()..]);
    }
    out
}
