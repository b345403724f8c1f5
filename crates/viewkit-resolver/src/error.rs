//! Error types for template resolution.
//!
//! A template that simply cannot be found is not an error: resolvers report it
//! as `Ok(None)`. [`ResolveError`] is reserved for lookups that could not be
//! carried out at all, and the aggregate passes it through untouched.

use std::io;
use std::path::PathBuf;

/// Errors that abort a template lookup.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The requested template name was empty.
    #[error("Template name must not be empty.")]
    EmptyName,

    /// The name walks out of the search directory via `..`.
    #[error("Template name '{name}' contains a parent directory traversal.")]
    ParentTraversal { name: String },

    /// Filesystem access failed for a reason other than a missing file.
    #[error("Failed to access template path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template was found, but its path is not valid UTF-8.
    #[error("Template path '{}' is not valid UTF-8.", .path.display())]
    NonUtf8Path { path: PathBuf },

    /// Resolver configuration could not be parsed or applied.
    #[error("Invalid resolver configuration: {0}")]
    Config(String),
}

impl ResolveError {
    /// Create a parent traversal error.
    pub fn parent_traversal(name: impl Into<String>) -> Self {
        Self::ParentTraversal { name: name.into() }
    }

    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a non-UTF-8 path error.
    pub fn non_utf8_path(path: impl Into<PathBuf>) -> Self {
        Self::NonUtf8Path { path: path.into() }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_yaml::Error> for ResolveError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_message_names_template() {
        let err = ResolveError::parent_traversal("../secret");
        assert_eq!(
            err.to_string(),
            "Template name '../secret' contains a parent directory traversal."
        );
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error;

        let err = ResolveError::io(
            "/tmp/views",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/views"));
        assert!(err.source().is_some());
    }
}
