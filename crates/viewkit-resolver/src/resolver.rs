//! Core template resolver trait.
//!
//! The [`TemplateResolver`] trait defines the interface every lookup strategy
//! implements. Resolvers can be used on their own or attached to an
//! [`AggregateResolver`](crate::AggregateResolver).

use crate::context::ViewContext;
use crate::ResolveError;

/// A strategy that maps template names to template paths.
///
/// # Implementation Guidelines
///
/// - [`lookup`](Self::lookup) performs an exact lookup of the given name. It
///   returns `Ok(None)` when the name is unknown, so that the next resolver in
///   a chain can be tried. Return `Err` only when the lookup itself could not
///   be performed (invalid name, unreadable directory, ...).
///
/// - [`resolve`](Self::resolve) adds namespace fallback on top of `lookup`
///   and rarely needs overriding.
///
/// # Example
///
/// ```
/// use viewkit_resolver::{ResolveError, TemplateResolver};
///
/// struct Fixed(&'static str);
///
/// impl TemplateResolver for Fixed {
///     fn name(&self) -> &'static str { "fixed" }
///
///     fn lookup(&self, _name: &str) -> Result<Option<String>, ResolveError> {
///         Ok(Some(self.0.to_string()))
///     }
/// }
///
/// assert_eq!(Fixed("a.phtml").resolve("x", None).unwrap(), Some("a.phtml".into()));
/// ```
pub trait TemplateResolver: Send + Sync {
    /// Human-readable name for this resolver.
    ///
    /// Used in logs and `Debug` output. Examples: "template map", "path stack".
    fn name(&self) -> &'static str;

    /// Look up `name` exactly as given.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(path))` - The template was found
    /// - `Ok(None)` - This resolver does not know the template
    /// - `Err(e)` - The lookup failed; callers should not try to recover
    fn lookup(&self, name: &str) -> Result<Option<String>, ResolveError>;

    /// Resolve `name`, falling back to the current view's namespace.
    ///
    /// The top-level name is always tried first. Only when it is unknown and
    /// `context` carries a namespace `ns` is `ns/name` tried.
    fn resolve(
        &self,
        name: &str,
        context: Option<&dyn ViewContext>,
    ) -> Result<Option<String>, ResolveError> {
        if let Some(found) = self.lookup(name)? {
            return Ok(Some(found));
        }
        match namespaced_name(name, context) {
            Some(qualified) => self.lookup(&qualified),
            None => Ok(None),
        }
    }
}

/// Builds the namespace-qualified form of a bare template name.
///
/// Returns `None` if `name` is empty, already contains a namespace, or the
/// context has no namespace to offer.
pub fn namespaced_name(name: &str, context: Option<&dyn ViewContext>) -> Option<String> {
    if name.is_empty() || name.contains('/') {
        return None;
    }
    let namespace = context?.namespace()?;
    Some(format!("{namespace}/{name}"))
}
