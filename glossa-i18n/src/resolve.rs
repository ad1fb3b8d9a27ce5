//! Template Resolver
//!
//! Walks a dotted key through a [`Catalog`] to the template it addresses.

use crate::catalog::{Catalog, Node};
use crate::{I18nError, Result};

/// Outcome of walking a dotted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The key reached a template string
    Template(&'a str),
    /// The key stopped on a sub-tree
    Branch(&'a Catalog),
    /// Some segment of the key does not exist
    Missing,
}

impl<'a> Resolved<'a> {
    pub fn template(self) -> Option<&'a str> {
        match self {
            Resolved::Template(template) => Some(template),
            _ => None,
        }
    }
}

/// Walk `key` through `catalog`.
///
/// The first segment is looked up at the root; each further segment descends
/// into the current branch. Once a template string is reached, any remaining
/// segments are ignored, so `"title.anything"` resolves to the `title` leaf.
pub fn resolve<'a>(catalog: &'a Catalog, key: &str) -> Resolved<'a> {
    let mut segments = key.split('.');
    let first = segments.next().unwrap_or_default();

    let Some(mut current) = catalog.get(first) else {
        return Resolved::Missing;
    };

    for name in segments {
        match current {
            Node::Branch(branch) => match branch.get(name) {
                Some(child) => current = child,
                None => return Resolved::Missing,
            },
            Node::Text(_) => break,
        }
    }

    match current {
        Node::Text(template) => Resolved::Template(template),
        Node::Branch(branch) => Resolved::Branch(branch),
    }
}

/// Resolve `key` to a template, reporting lookup failures as errors.
///
/// `language` only labels the error.
pub fn lookup<'a>(catalog: &'a Catalog, key: &str, language: &str) -> Result<&'a str> {
    match resolve(catalog, key) {
        Resolved::Template(template) => Ok(template),
        Resolved::Branch(_) => Err(I18nError::TemplateType {
            key: key.to_string(),
            language: language.to_string(),
        }),
        Resolved::Missing => Err(I18nError::KeyNotFound {
            key: key.to_string(),
            language: language.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_text("title", "Glossa")
            .with_branch(
                "menu",
                Catalog::new()
                    .with_text("open", "Open")
                    .with_branch("recent", Catalog::new().with_text("clear", "Clear")),
            )
    }

    #[test]
    fn test_resolve_leaf() {
        let catalog = catalog();
        assert_eq!(resolve(&catalog, "title"), Resolved::Template("Glossa"));
        assert_eq!(resolve(&catalog, "menu.open"), Resolved::Template("Open"));
        assert_eq!(
            resolve(&catalog, "menu.recent.clear"),
            Resolved::Template("Clear")
        );
    }

    #[test]
    fn test_resolve_missing_first_segment() {
        assert_eq!(resolve(&catalog(), "nope"), Resolved::Missing);
        assert_eq!(resolve(&catalog(), "nope.open"), Resolved::Missing);
        assert_eq!(resolve(&catalog(), ""), Resolved::Missing);
    }

    #[test]
    fn test_resolve_missing_nested_segment() {
        assert_eq!(resolve(&catalog(), "menu.close"), Resolved::Missing);
        assert_eq!(resolve(&catalog(), "menu.recent.keep"), Resolved::Missing);
    }

    #[test]
    fn test_resolve_branch() {
        let catalog = catalog();
        match resolve(&catalog, "menu.recent") {
            Resolved::Branch(branch) => assert_eq!(branch.keys(), vec!["clear"]),
            other => panic!("expected branch, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_ignores_segments_past_leaf() {
        let catalog = catalog();
        assert_eq!(resolve(&catalog, "title.extra"), Resolved::Template("Glossa"));
        assert_eq!(
            resolve(&catalog, "menu.open.a.b"),
            Resolved::Template("Open")
        );
    }

    #[test]
    fn test_lookup_errors() {
        let catalog = catalog();
        assert_eq!(lookup(&catalog, "menu.open", "en").unwrap(), "Open");

        let err = lookup(&catalog, "menu", "en").unwrap_err();
        assert!(matches!(err, I18nError::TemplateType { ref key, .. } if key == "menu"));

        let err = lookup(&catalog, "missing", "fr").unwrap_err();
        assert!(
            matches!(err, I18nError::KeyNotFound { ref language, .. } if language == "fr")
        );
        assert!(err.is_lookup_failure());
    }
}
