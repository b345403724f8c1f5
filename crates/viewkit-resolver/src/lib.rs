//! Template name resolution for view layers.
//!
//! `viewkit-resolver` turns logical template names such as `"layout/layout"`
//! into concrete template paths. Lookup strategies are composed into an
//! [`AggregateResolver`] that asks each of them in priority order.
//!
//! # Quick Start
//!
//! ```
//! use viewkit_resolver::{AggregateResolver, MapResolver, PathStackResolver};
//!
//! let mut stack = PathStackResolver::new();
//! stack.add_path("module/views");
//!
//! let mut resolver = AggregateResolver::new();
//! resolver
//!     .attach(MapResolver::from_iter([("layout/layout", "views/layout.phtml")]))
//!     .attach_with_priority(stack, -10);
//!
//! let path = resolver.resolve("layout/layout", None).unwrap();
//! assert_eq!(path.as_deref(), Some("views/layout.phtml"));
//! ```
//!
//! # Architecture
//!
//! The crate is built around the [`TemplateResolver`] trait, which every
//! lookup strategy implements. A resolver answers with `Ok(Some(path))`,
//! `Ok(None)` for "not mine, ask the next one", or `Err` when the lookup
//! could not be performed at all.
//!
//! ```text
//! AggregateResolver
//! ├── MapResolver        (priority 100) → None
//! ├── MapResolver        (priority 1)   → Some("views/bar.phtml") ← returns this
//! └── PathStackResolver  (priority -10) → (not reached)
//! ```
//!
//! # Namespaces
//!
//! Resolution can be given a [`ViewContext`] describing the template that is
//! currently rendering. A bare name requested from inside `"foo/zaz"` first
//! resolves as the top-level `"bar"` and, failing that, as `"foo/bar"`.

mod aggregate;
mod config;
mod context;
mod error;
mod resolver;
pub mod resolvers;

// Re-export core types
pub use aggregate::{AggregateResolver, LookupFailure, DEFAULT_PRIORITY};
pub use config::ResolverConfig;
pub use context::{namespace_of, CurrentView, ViewContext};
pub use error::ResolveError;
pub use resolver::{namespaced_name, TemplateResolver};

// Re-export resolvers at crate root for convenience
pub use resolvers::{MapResolver, PathStackOptions, PathStackResolver, DEFAULT_SUFFIX};
