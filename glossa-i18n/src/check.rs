//! Key checking across languages.
//!
//! Tooling that runs before release, never on the translation path: every
//! key that resolves to a template in any language should resolve to a
//! template in all of them, with the same placeholder indices.
//!
//! Keys are full resolvable paths, so a root `default` namespace is reported
//! as `default.title` rather than the enumerated `title`.

use crate::catalog::Node;
use crate::template::placeholders;
use crate::{I18nError, LanguageSet, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A key whose placeholder indices differ from the reference language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatch {
    pub key: String,
    /// Indices used by the reference language
    pub expected: BTreeSet<usize>,
    /// Indices used by this language
    pub found: BTreeSet<usize>,
}

/// Problems found in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageIssues {
    /// Keys defined by another language but absent here
    pub missing: Vec<String>,
    /// Keys that are templates elsewhere but a sub-tree here
    pub shape_conflicts: Vec<String>,
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
}

impl LanguageIssues {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
            && self.shape_conflicts.is_empty()
            && self.placeholder_mismatches.is_empty()
    }

    pub fn count(&self) -> usize {
        self.missing.len() + self.shape_conflicts.len() + self.placeholder_mismatches.len()
    }
}

/// Result of [`check`].
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    reference: Option<String>,
    total_keys: usize,
    languages: BTreeMap<String, LanguageIssues>,
}

impl CheckReport {
    /// Language placeholder indices were compared against.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Number of distinct template keys across all languages.
    pub fn total_keys(&self) -> usize {
        self.total_keys
    }

    pub fn issues(&self, language: &str) -> Option<&LanguageIssues> {
        self.languages.get(language)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageIssues)> {
        self.languages.iter().map(|(id, issues)| (id.as_str(), issues))
    }

    pub fn is_clean(&self) -> bool {
        self.languages.values().all(LanguageIssues::is_empty)
    }

    /// Share of keys this language defines as templates, in `[0, 1]`.
    pub fn coverage(&self, language: &str) -> Option<f64> {
        let issues = self.languages.get(language)?;
        if self.total_keys == 0 {
            return Some(1.0);
        }
        let absent = issues.missing.len() + issues.shape_conflicts.len();
        Some((self.total_keys - absent) as f64 / self.total_keys as f64)
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} keys across {} languages",
            self.total_keys,
            self.languages.len()
        )?;
        for (id, issues) in &self.languages {
            let coverage = self.coverage(id).unwrap_or(1.0) * 100.0;
            if issues.is_empty() {
                writeln!(f, "  {}: ok ({:.1}%)", id, coverage)?;
                continue;
            }
            writeln!(f, "  {}: {} issues ({:.1}%)", id, issues.count(), coverage)?;
            for key in &issues.missing {
                writeln!(f, "    missing: {}", key)?;
            }
            for key in &issues.shape_conflicts {
                writeln!(f, "    not a string: {}", key)?;
            }
            for mismatch in &issues.placeholder_mismatches {
                writeln!(
                    f,
                    "    placeholders: {} uses {:?}, expected {:?}",
                    mismatch.key, mismatch.found, mismatch.expected
                )?;
            }
        }
        Ok(())
    }
}

enum Shape {
    Template(BTreeSet<usize>),
    Branch,
}

fn shapes(languages: &LanguageSet) -> BTreeMap<&str, BTreeMap<String, Shape>> {
    languages
        .iter()
        .map(|(id, catalog)| {
            let mut shapes = BTreeMap::new();
            catalog.walk_paths(&mut |key, node| {
                let shape = match node {
                    Node::Text(template) => Shape::Template(
                        placeholders(template).iter().map(|p| p.index).collect(),
                    ),
                    Node::Branch(_) => Shape::Branch,
                };
                shapes.insert(key.to_string(), shape);
            });
            (id, shapes)
        })
        .collect()
}

/// Check every language against the first one in sorted order.
pub fn check(languages: &LanguageSet) -> CheckReport {
    let reference = languages.ids().next().map(str::to_string);
    build_report(languages, reference)
}

/// Check every language, comparing placeholders against `reference`.
pub fn check_against(languages: &LanguageSet, reference: &str) -> Result<CheckReport> {
    if !languages.contains(reference) {
        return Err(I18nError::UnknownLanguage(reference.to_string()));
    }
    Ok(build_report(languages, Some(reference.to_string())))
}

fn build_report(languages: &LanguageSet, reference: Option<String>) -> CheckReport {
    let shapes = shapes(languages);

    let all_keys: BTreeSet<&str> = shapes
        .values()
        .flat_map(|keys| {
            keys.iter().filter_map(|(key, shape)| match shape {
                Shape::Template(_) => Some(key.as_str()),
                Shape::Branch => None,
            })
        })
        .collect();

    let reference_shapes = reference.as_deref().and_then(|id| shapes.get(id));

    let mut report = BTreeMap::new();
    for (&id, keys) in &shapes {
        let mut issues = LanguageIssues::default();
        for &key in &all_keys {
            match keys.get(key) {
                None => issues.missing.push(key.to_string()),
                Some(Shape::Branch) => issues.shape_conflicts.push(key.to_string()),
                Some(Shape::Template(found)) => {
                    if reference.as_deref() == Some(id) {
                        continue;
                    }
                    if let Some(Shape::Template(expected)) =
                        reference_shapes.and_then(|r| r.get(key))
                    {
                        if expected != found {
                            issues.placeholder_mismatches.push(PlaceholderMismatch {
                                key: key.to_string(),
                                expected: expected.clone(),
                                found: found.clone(),
                            });
                        }
                    }
                }
            }
        }

        if !issues.is_empty() {
            glossa_log::debug!(
                target: "glossa::check",
                "language `{}`: {} issues",
                id,
                issues.count()
            );
        }
        report.insert(id.to_string(), issues);
    }

    CheckReport {
        reference,
        total_keys: all_keys.len(),
        languages: report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn set() -> LanguageSet {
        LanguageSet::new()
            .with_language(
                "en",
                Catalog::new()
                    .with_text("hello", "Hello, {0}!")
                    .with_text("bye", "Bye")
                    .with_branch("menu", Catalog::new().with_text("open", "Open {0} in {1}")),
            )
            .with_language(
                "zh",
                Catalog::new()
                    .with_text("hello", "你好，{0}！")
                    .with_text("menu", "菜单")
                    .with_text("extra", "额外"),
            )
    }

    #[test]
    fn test_clean_report() {
        let catalog = Catalog::new().with_text("a", "{0}").with_text("b", "b");
        let languages = LanguageSet::new()
            .with_language("en", catalog.clone())
            .with_language("fr", catalog);

        let report = check(&languages);
        assert!(report.is_clean());
        assert_eq!(report.total_keys(), 2);
        assert_eq!(report.coverage("fr"), Some(1.0));
        assert_eq!(report.reference(), Some("en"));
    }

    #[test]
    fn test_missing_and_shape_conflicts() {
        let report = check(&set());
        assert!(!report.is_clean());
        assert_eq!(report.total_keys(), 5);

        let en = report.issues("en").unwrap();
        assert_eq!(en.missing, vec!["extra"]);
        assert_eq!(en.shape_conflicts, vec!["menu"]);

        let zh = report.issues("zh").unwrap();
        assert_eq!(zh.missing, vec!["bye", "menu.open"]);
        assert!(zh.shape_conflicts.is_empty());
        assert!(zh.placeholder_mismatches.is_empty());
    }

    #[test]
    fn test_placeholder_mismatch() {
        let languages = LanguageSet::new()
            .with_language("en", Catalog::new().with_text("k", "{0} of {1}"))
            .with_language("zh", Catalog::new().with_text("k", "{1} 的 {1}"));

        let report = check(&languages);
        let zh = report.issues("zh").unwrap();
        assert_eq!(zh.placeholder_mismatches.len(), 1);
        assert_eq!(zh.placeholder_mismatches[0].expected, BTreeSet::from([0, 1]));
        assert_eq!(zh.placeholder_mismatches[0].found, BTreeSet::from([1]));
        assert!(report.issues("en").unwrap().is_empty());
    }

    #[test]
    fn test_check_against_reference() {
        let languages = LanguageSet::new()
            .with_language("en", Catalog::new().with_text("k", "{0}"))
            .with_language("zh", Catalog::new().with_text("k", "{0} {1}"));

        let report = check_against(&languages, "zh").unwrap();
        assert_eq!(report.reference(), Some("zh"));
        assert_eq!(report.issues("en").unwrap().placeholder_mismatches.len(), 1);
        assert!(report.issues("zh").unwrap().is_empty());

        assert!(matches!(
            check_against(&languages, "fr"),
            Err(I18nError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_coverage() {
        let report = check(&set());
        let zh = report.coverage("zh").unwrap();
        assert!((zh - 0.6).abs() < f64::EPSILON);
        assert_eq!(report.coverage("fr"), None);
    }

    #[test]
    fn test_display_summary() {
        let rendered = check(&set()).to_string();
        assert!(rendered.starts_with("5 keys across 2 languages"));
        assert!(rendered.contains("missing: menu.open"));
        assert!(rendered.contains("not a string: menu"));
    }

    #[test]
    fn test_default_namespace_does_not_mask_root_keys() {
        let languages = LanguageSet::new()
            .with_language(
                "en",
                Catalog::new()
                    .with_branch("default", Catalog::new().with_text("ok", "OK"))
                    .with_text("ok", "Okay"),
            )
            .with_language(
                "zh",
                Catalog::new()
                    .with_branch("default", Catalog::new().with_text("ok", "确定"))
                    .with_branch("ok", Catalog::new().with_text("x", "x")),
            );

        let report = check(&languages);
        assert_eq!(report.total_keys(), 3);
        assert_eq!(report.issues("zh").unwrap().shape_conflicts, vec!["ok"]);
        assert_eq!(report.issues("en").unwrap().missing, vec!["ok.x"]);
        assert!(report.issues("zh").unwrap().missing.is_empty());
    }

    #[test]
    fn test_empty_set() {
        let report = check(&LanguageSet::new());
        assert!(report.is_clean());
        assert_eq!(report.reference(), None);
    }
}
