//! Declarative resolver configuration.
//!
//! A [`ResolverConfig`] describes the usual setup of a view layer: a static
//! template map consulted first, then a stack of template directories. It can
//! be written in YAML or JSON:
//!
//! ```yaml
//! template_map:
//!   layout/layout: module/views/layout/layout.phtml
//!   error/404: module/views/error/404.phtml
//! path_stack:
//!   script_paths:
//!     - module/views
//!   default_suffix: phtml
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateResolver, DEFAULT_PRIORITY};
use crate::resolvers::{MapResolver, PathStackOptions, PathStackResolver};
use crate::ResolveError;

/// Configuration for building an [`AggregateResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Template name → path entries.
    pub template_map: BTreeMap<String, String>,
    /// Priority of the template map resolver.
    pub map_priority: i32,
    /// Directory search settings.
    pub path_stack: PathStackOptions,
    /// Priority of the path stack resolver.
    pub path_stack_priority: i32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            template_map: BTreeMap::new(),
            map_priority: DEFAULT_PRIORITY,
            path_stack: PathStackOptions::default(),
            path_stack_priority: DEFAULT_PRIORITY,
        }
    }
}

impl ResolverConfig {
    /// Parse a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, ResolveError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parse a JSON document.
    pub fn from_json(source: &str) -> Result<Self, ResolveError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a configuration file, picking the format from its extension.
    ///
    /// `.yaml` and `.yml` are read as YAML, `.json` as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ResolveError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ResolveError::io(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&source),
            Some("json") => Self::from_json(&source),
            _ => Err(ResolveError::config(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    /// Build an aggregate from this configuration.
    ///
    /// The map resolver is attached before the path stack, so with equal
    /// priorities the map is consulted first. Empty sections attach nothing.
    pub fn build(&self) -> AggregateResolver {
        let mut aggregate = AggregateResolver::new();

        if !self.template_map.is_empty() {
            let map: MapResolver = self.template_map.clone().into_iter().collect();
            aggregate.attach_with_priority(map, self.map_priority);
        }
        if !self.path_stack.script_paths.is_empty() {
            let stack = PathStackResolver::with_options(self.path_stack.clone());
            aggregate.attach_with_priority(stack, self.path_stack_priority);
        }

        tracing::debug!(resolvers = aggregate.len(), "built aggregate resolver");
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LookupFailure;
    use std::path::PathBuf;

    #[test]
    fn defaults() {
        let config = ResolverConfig::default();
        assert!(config.template_map.is_empty());
        assert_eq!(config.map_priority, DEFAULT_PRIORITY);
        assert_eq!(config.path_stack_priority, DEFAULT_PRIORITY);
        assert!(config.path_stack.lfi_protection);
    }

    #[test]
    fn parses_yaml() {
        let yaml = "\
template_map:
  layout/layout: views/layout.phtml
path_stack:
  script_paths:
    - views
    - shared/views
  default_suffix: .twig
path_stack_priority: -5
";
        let config = ResolverConfig::from_yaml(yaml).unwrap();

        assert_eq!(
            config.template_map.get("layout/layout").map(String::as_str),
            Some("views/layout.phtml")
        );
        assert_eq!(
            config.path_stack.script_paths,
            vec![PathBuf::from("views"), PathBuf::from("shared/views")]
        );
        assert_eq!(config.path_stack.default_suffix, ".twig");
        assert_eq!(config.path_stack_priority, -5);
        assert_eq!(config.map_priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn parses_json() {
        let config =
            ResolverConfig::from_json(r#"{ "template_map": { "bar": "baz" } }"#).unwrap();
        assert_eq!(config.template_map.len(), 1);
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = ResolverConfig::from_yaml("template_map: [unclosed");
        assert!(matches!(result, Err(ResolveError::Config(_))));
    }

    #[test]
    fn build_orders_map_before_path_stack() {
        let config = ResolverConfig {
            template_map: BTreeMap::from([("bar".to_string(), "baz".to_string())]),
            path_stack: PathStackOptions {
                script_paths: vec![PathBuf::from("views")],
                ..PathStackOptions::default()
            },
            ..ResolverConfig::default()
        };

        let aggregate = config.build();
        let names: Vec<&str> = aggregate.iter().map(|(r, _)| r.name()).collect();
        assert_eq!(names, vec!["template map", "path stack"]);
    }

    #[test]
    fn build_respects_priorities() {
        let config = ResolverConfig {
            template_map: BTreeMap::from([("bar".to_string(), "baz".to_string())]),
            map_priority: -1,
            path_stack: PathStackOptions {
                script_paths: vec![PathBuf::from("views")],
                ..PathStackOptions::default()
            },
            path_stack_priority: 10,
        };

        let aggregate = config.build();
        let order: Vec<(&str, i32)> = aggregate.iter().map(|(r, p)| (r.name(), p)).collect();
        assert_eq!(order, vec![("path stack", 10), ("template map", -1)]);
    }

    #[test]
    fn build_empty_config() {
        let mut aggregate = ResolverConfig::default().build();
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.resolve("bar", None).unwrap(), None);
        assert_eq!(
            aggregate.last_lookup_failure(),
            Some(LookupFailure::NoResolvers)
        );
    }

    #[test]
    fn from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("views.yml");
        fs::write(&yaml, "template_map:\n  bar: baz\n").unwrap();
        let ini = dir.path().join("views.ini");
        fs::write(&ini, "bar = baz\n").unwrap();

        let config = ResolverConfig::from_file(&yaml).unwrap();
        assert_eq!(config.template_map.len(), 1);
        assert!(matches!(
            ResolverConfig::from_file(&ini),
            Err(ResolveError::Config(_))
        ));
        assert!(matches!(
            ResolverConfig::from_file(dir.path().join("missing.yaml")),
            Err(ResolveError::Io { .. })
        ));
    }
}
