//! Static template map resolver.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resolver::TemplateResolver;
use crate::ResolveError;

/// Resolve templates from a fixed name → path table.
///
/// Lookups are exact: `"bar"` only matches the key `"bar"`. Namespace
/// fallback comes from [`TemplateResolver::resolve`], which retries
/// `"<namespace>/bar"` when the bare name is missing.
///
/// # Example
///
/// ```
/// use viewkit_resolver::{CurrentView, MapResolver, TemplateResolver};
///
/// let resolver = MapResolver::from_iter([("foo/bar", "views/foo/bar.phtml")]);
/// let view = CurrentView::new("foo/zaz");
///
/// assert_eq!(
///     resolver.resolve("bar", Some(&view)).unwrap().as_deref(),
///     Some("views/foo/bar.phtml"),
/// );
/// ```
///
/// A map can also be loaded from YAML configuration:
///
/// ```
/// use viewkit_resolver::MapResolver;
///
/// let resolver = MapResolver::from_yaml("layout/layout: views/layout.phtml").unwrap();
/// assert!(resolver.contains("layout/layout"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapResolver {
    map: BTreeMap<String, String>,
}

impl MapResolver {
    /// Create an empty map resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML mapping of template names to paths.
    pub fn from_yaml(source: &str) -> Result<Self, ResolveError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Add or replace a single entry.
    pub fn add(&mut self, name: impl Into<String>, path: impl Into<String>) -> &mut Self {
        self.map.insert(name.into(), path.into());
        self
    }

    /// Remove an entry, returning its path if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.map.remove(name)
    }

    /// Merge another map into this one. Entries in `other` win.
    pub fn merge<I, K, V>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extend(other);
        self
    }

    /// Whether `name` has an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Path registered for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    /// Iterate over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapResolver {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut resolver = Self::new();
        resolver.extend(iter);
        resolver
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MapResolver {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.map
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl TemplateResolver for MapResolver {
    fn name(&self) -> &'static str {
        "template map"
    }

    fn lookup(&self, name: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.map.get(name).cloned())
    }
}
