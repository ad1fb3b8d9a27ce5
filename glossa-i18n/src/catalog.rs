//! Catalog Model
//!
//! One language's translations as a tree: leaves are template strings,
//! branches map names to sub-trees. Leaves are addressed by dotted keys
//! (`menu.file.open`).

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Root namespace whose name is elided from enumerated keys.
pub const DEFAULT_NAMESPACE: &str = "default";

/// A node of a catalog tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// A template string
    Text(String),
    /// A nested mapping
    Branch(Catalog),
}

impl Node {
    /// The template string, if this is a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Branch(_) => None,
        }
    }

    /// The sub-tree, if this is a branch.
    pub fn as_branch(&self) -> Option<&Catalog> {
        match self {
            Node::Text(_) => None,
            Node::Branch(catalog) => Some(catalog),
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Catalog> for Node {
    fn from(catalog: Catalog) -> Self {
        Node::Branch(catalog)
    }
}

/// Translation tree for a single language.
///
/// ```
/// use glossa_i18n::Catalog;
///
/// let catalog = Catalog::new()
///     .with_text("title", "Glossa")
///     .with_branch("menu", Catalog::new().with_text("open", "Open {0}"));
///
/// assert_eq!(catalog.keys(), vec!["menu.open", "title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, Node>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON object of nested strings.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| I18nError::parse("JSON catalog", e))
    }

    /// Parse a catalog from a TOML document of nested string tables.
    #[cfg(feature = "toml")]
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| I18nError::parse("TOML catalog", e))
    }

    /// Insert or replace a child node.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<Node>) {
        self.entries.insert(name.into(), node.into());
    }

    /// Builder form of [`insert`](Self::insert) for a leaf.
    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, Node::Text(text.into()));
        self
    }

    /// Builder form of [`insert`](Self::insert) for a sub-tree.
    pub fn with_branch(mut self, name: impl Into<String>, catalog: Catalog) -> Self {
        self.insert(name, Node::Branch(catalog));
        self
    }

    /// Direct child by name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct children in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Node> {
        self.entries.iter()
    }

    /// Every dotted key that addresses a template, depth-first.
    ///
    /// A root-level `default` namespace is elided: `default.title` is
    /// enumerated as `title`.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.walk(&mut |key, node| {
            if let Node::Text(_) = node {
                keys.push(key.to_string());
            }
        });
        keys
    }

    /// Enumerated keys paired with their templates.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut flat = BTreeMap::new();
        self.walk(&mut |key, node| {
            if let Node::Text(text) = node {
                flat.insert(key.to_string(), text.clone());
            }
        });
        flat
    }

    /// Visit every node (branches before their children) with its
    /// enumerated key.
    pub(crate) fn walk<'a>(&'a self, visit: &mut dyn FnMut(&str, &'a Node)) {
        walk_into(self, "", join_key, visit);
    }

    /// Like [`walk`](Self::walk), but with the full resolvable path of each
    /// node: `default.title` stays `default.title`.
    pub(crate) fn walk_paths<'a>(&'a self, visit: &mut dyn FnMut(&str, &'a Node)) {
        walk_into(self, "", join_path, visit);
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a Node);
    type IntoIter = btree_map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn walk_into<'a>(
    catalog: &'a Catalog,
    prefix: &str,
    join: fn(&str, &str) -> String,
    visit: &mut dyn FnMut(&str, &'a Node),
) {
    for (name, node) in &catalog.entries {
        let key = join(prefix, name);
        visit(&key, node);
        if let Node::Branch(child) = node {
            walk_into(child, &key, join, visit);
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() || prefix == DEFAULT_NAMESPACE {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
