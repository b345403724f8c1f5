//! Filesystem path stack resolver.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::resolver::TemplateResolver;
use crate::ResolveError;

/// Suffix appended to template names that carry no extension.
pub const DEFAULT_SUFFIX: &str = "phtml";

/// Settings for a [`PathStackResolver`].
///
/// Every field has a default, so partial YAML or JSON documents deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStackOptions {
    /// Directories to search, in order.
    pub script_paths: Vec<PathBuf>,
    /// Extension appended to names without one (a leading `.` is ignored).
    pub default_suffix: String,
    /// Reject names containing `..` segments.
    pub lfi_protection: bool,
}

impl Default for PathStackOptions {
    fn default() -> Self {
        Self {
            script_paths: Vec::new(),
            default_suffix: DEFAULT_SUFFIX.to_string(),
            lfi_protection: true,
        }
    }
}

/// Resolve templates by searching a list of directories.
///
/// Directories are searched in the order they were added; the first directory
/// holding a matching file wins. The returned path is canonical and absolute.
///
/// A name without an extension gets the default suffix appended, so with the
/// default settings `"layout/layout"` looks for `layout/layout.phtml`. Names
/// that already have an extension are used verbatim.
///
/// # Example
///
/// ```no_run
/// use viewkit_resolver::{PathStackResolver, TemplateResolver};
///
/// let mut resolver = PathStackResolver::new();
/// resolver.add_path("./module/views").add_path("./views");
///
/// let _path = resolver.lookup("layout/layout")?;
/// # Ok::<(), viewkit_resolver::ResolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathStackResolver {
    paths: Vec<PathBuf>,
    default_suffix: String,
    lfi_protection: bool,
}

impl Default for PathStackResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathStackResolver {
    /// Create a resolver with no search paths.
    pub fn new() -> Self {
        Self::with_options(PathStackOptions::default())
    }

    /// Create a resolver from options.
    pub fn with_options(options: PathStackOptions) -> Self {
        let mut resolver = Self {
            paths: options.script_paths,
            default_suffix: String::new(),
            lfi_protection: options.lfi_protection,
        };
        resolver.set_default_suffix(options.default_suffix);
        resolver
    }

    /// Append a directory to the search list.
    pub fn add_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.paths.push(path.into());
        self
    }

    /// Append several directories, preserving their order.
    pub fn add_paths<I, P>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Replace the search list.
    pub fn set_paths<I, P>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.clear();
        self.add_paths(paths)
    }

    /// Remove all search directories.
    pub fn clear_paths(&mut self) {
        self.paths.clear();
    }

    /// Search directories in lookup order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Set the suffix appended to extensionless names.
    pub fn set_default_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        let suffix = suffix.into();
        self.default_suffix = suffix.trim_start_matches('.').to_string();
        self
    }

    /// Suffix appended to extensionless names, without the leading dot.
    pub fn default_suffix(&self) -> &str {
        &self.default_suffix
    }

    /// Enable or disable rejection of `..` segments.
    pub fn set_lfi_protection(&mut self, enabled: bool) -> &mut Self {
        self.lfi_protection = enabled;
        self
    }

    /// Whether `..` segments are rejected.
    pub fn lfi_protection(&self) -> bool {
        self.lfi_protection
    }

    /// Relative file name searched for in each directory.
    fn file_name(&self, name: &str) -> PathBuf {
        let relative = Path::new(name.trim_start_matches('/'));
        if relative.extension().is_some() || self.default_suffix.is_empty() {
            relative.to_path_buf()
        } else {
            PathBuf::from(format!(
                "{}.{}",
                relative.to_string_lossy(),
                self.default_suffix
            ))
        }
    }
}

/// A missing file, or a path component that is not a directory.
fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn has_parent_segment(name: &str) -> bool {
    name.split(['/', '\\']).any(|segment| segment == "..")
}

impl TemplateResolver for PathStackResolver {
    fn name(&self) -> &'static str {
        "path stack"
    }

    fn lookup(&self, name: &str) -> Result<Option<String>, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::EmptyName);
        }
        if self.lfi_protection && has_parent_segment(name) {
            return Err(ResolveError::parent_traversal(name));
        }
        if self.paths.is_empty() {
            tracing::debug!(template = name, "path stack has no search paths");
            return Ok(None);
        }

        let file_name = self.file_name(name);
        for dir in &self.paths {
            let candidate = dir.join(&file_name);
            tracing::trace!(candidate = %candidate.display(), "checking template path");
            match fs::metadata(&candidate) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) if is_missing(&e) => continue,
                Err(e) => return Err(ResolveError::io(&candidate, e)),
            }
            let canonical =
                fs::canonicalize(&candidate).map_err(|e| ResolveError::io(&candidate, e))?;
            return canonical
                .into_os_string()
                .into_string()
                .map(Some)
                .map_err(ResolveError::non_utf8_path);
        }

        Ok(None)
    }
}
