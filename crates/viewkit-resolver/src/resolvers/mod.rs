//! Resolver implementations.
//!
//! This module contains the built-in lookup strategies:
//!
//! - [`MapResolver`] - Exact lookups in a static name → path table
//! - [`PathStackResolver`] - Search a list of template directories

mod map;
mod path_stack;

pub use map::MapResolver;
pub use path_stack::{PathStackOptions, PathStackResolver, DEFAULT_SUFFIX};
