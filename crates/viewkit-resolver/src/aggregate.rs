//! Aggregate resolver for composing multiple lookup strategies.
//!
//! The [`AggregateResolver`] queries attached resolvers by priority until one
//! of them knows the requested template.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::context::ViewContext;
use crate::resolver::{namespaced_name, TemplateResolver};
use crate::ResolveError;

/// Priority given to resolvers attached without an explicit one.
pub const DEFAULT_PRIORITY: i32 = 1;

/// Why the most recent [`AggregateResolver::resolve`] call found nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    /// No resolvers were attached.
    NoResolvers,
    /// Every attached resolver was asked and none knew the template.
    NotFound,
    /// A resolver returned an error, which was handed back to the caller.
    ResolverError,
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResolvers => write!(f, "no resolvers attached"),
            Self::NotFound => write!(f, "template not found"),
            Self::ResolverError => write!(f, "resolver error"),
        }
    }
}

struct Entry {
    resolver: Arc<dyn TemplateResolver>,
    priority: i32,
}

/// Chain multiple resolvers with priority ordering.
///
/// Resolvers with a higher priority are asked first; resolvers sharing a
/// priority are asked in the order they were attached. The first resolver
/// that returns a path wins and later ones are not consulted.
///
/// # Example
///
/// ```
/// use viewkit_resolver::{AggregateResolver, CurrentView, MapResolver};
///
/// let mut resolver = AggregateResolver::new();
/// resolver
///     .attach(MapResolver::from_iter([("foo/bar", "foo/baz")]))
///     .attach(MapResolver::from_iter([("bar", "baz")]));
///
/// let view = CurrentView::new("foo/zaz");
/// assert_eq!(resolver.resolve("bar", Some(&view)).unwrap().as_deref(), Some("baz"));
/// ```
///
/// # Namespaces
///
/// When a bare name is requested and the current view lives in a namespace,
/// the whole chain is first asked for the top-level name. Only when nobody
/// knows it is the chain asked again, this time looking up the namespaced
/// name exactly. A top-level template therefore always shadows a namespaced
/// one, and each resolver sees every candidate name once.
///
/// # Outcome tracking
///
/// Each call to [`resolve`](Self::resolve) records either the resolver that
/// succeeded ([`last_successful_resolver`](Self::last_successful_resolver)) or
/// the reason nothing was found ([`last_lookup_failure`](Self::last_lookup_failure)).
/// Both are reset at the start of every call.
pub struct AggregateResolver {
    entries: Vec<Entry>,
    last_successful: Option<Weak<dyn TemplateResolver>>,
    last_failure: Option<LookupFailure>,
}

impl AggregateResolver {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            last_successful: None,
            last_failure: None,
        }
    }

    /// Attach a resolver with [`DEFAULT_PRIORITY`].
    pub fn attach<R: TemplateResolver + 'static>(&mut self, resolver: R) -> &mut Self {
        self.attach_with_priority(resolver, DEFAULT_PRIORITY)
    }

    /// Attach a resolver with an explicit priority.
    pub fn attach_with_priority<R: TemplateResolver + 'static>(
        &mut self,
        resolver: R,
        priority: i32,
    ) -> &mut Self {
        self.attach_shared(Arc::new(resolver), priority)
    }

    /// Attach a resolver the caller keeps a handle to.
    ///
    /// Use this to compare against [`last_successful_resolver`](Self::last_successful_resolver)
    /// later, or to share one resolver between several aggregates.
    pub fn attach_shared(
        &mut self,
        resolver: Arc<dyn TemplateResolver>,
        priority: i32,
    ) -> &mut Self {
        // Keep entries sorted; equal priorities stay in attach order.
        let pos = self
            .entries
            .partition_point(|entry| entry.priority >= priority);
        tracing::trace!(resolver = resolver.name(), priority, "attaching resolver");
        self.entries.insert(pos, Entry { resolver, priority });
        self
    }

    /// Resolve a template name.
    ///
    /// Returns `Ok(None)` when no resolver knows the template, in which case
    /// [`last_lookup_failure`](Self::last_lookup_failure) tells why. Errors
    /// returned by a resolver are passed through unchanged and stop the
    /// lookup.
    pub fn resolve(
        &mut self,
        name: &str,
        context: Option<&dyn ViewContext>,
    ) -> Result<Option<String>, ResolveError> {
        self.last_successful = None;
        self.last_failure = None;

        if self.entries.is_empty() {
            tracing::debug!(template = name, "no resolvers attached");
            self.last_failure = Some(LookupFailure::NoResolvers);
            return Ok(None);
        }

        let found = match namespaced_name(name, context) {
            Some(qualified) => match self.query_chain(name, |r| r.resolve(name, None))? {
                Some(path) => Some(path),
                None => self.query_chain(&qualified, |r| r.lookup(&qualified))?,
            },
            None => self.query_chain(name, |r| r.resolve(name, context))?,
        };

        if found.is_none() {
            tracing::debug!(template = name, "template not found");
            self.last_failure = Some(LookupFailure::NotFound);
        }
        Ok(found)
    }

    /// Ask every resolver in order, stopping at the first hit.
    fn query_chain<F>(&mut self, name: &str, query: F) -> Result<Option<String>, ResolveError>
    where
        F: Fn(&dyn TemplateResolver) -> Result<Option<String>, ResolveError>,
    {
        for entry in &self.entries {
            match query(entry.resolver.as_ref()) {
                Ok(Some(path)) => {
                    tracing::debug!(
                        template = name,
                        resolver = entry.resolver.name(),
                        priority = entry.priority,
                        path = %path,
                        "template resolved"
                    );
                    self.last_successful = Some(Arc::downgrade(&entry.resolver));
                    return Ok(Some(path));
                }
                Ok(None) => continue,
                Err(err) => {
                    tracing::debug!(
                        template = name,
                        resolver = entry.resolver.name(),
                        error = %err,
                        "resolver failed"
                    );
                    self.last_failure = Some(LookupFailure::ResolverError);
                    return Err(err);
                }
            }
        }
        Ok(None)
    }

    /// The resolver that satisfied the most recent lookup.
    ///
    /// `None` before the first lookup and after any lookup that failed.
    pub fn last_successful_resolver(&self) -> Option<Arc<dyn TemplateResolver>> {
        self.last_successful.as_ref().and_then(Weak::upgrade)
    }

    /// Whether `resolver` satisfied the most recent lookup.
    pub fn is_last_successful<R: ?Sized>(&self, resolver: &Arc<R>) -> bool {
        self.last_successful
            .as_ref()
            .is_some_and(|last| std::ptr::addr_eq(last.as_ptr(), Arc::as_ptr(resolver)))
    }

    /// Why the most recent lookup found nothing.
    ///
    /// `None` before the first lookup and after a successful one.
    pub fn last_lookup_failure(&self) -> Option<LookupFailure> {
        self.last_failure
    }

    /// Iterate over attached resolvers in lookup order, with their priority.
    pub fn iter(&self) -> impl Iterator<Item = (&(dyn TemplateResolver + 'static), i32)> {
        self.entries
            .iter()
            .map(|entry| (entry.resolver.as_ref(), entry.priority))
    }

    /// Number of attached resolvers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no resolvers are attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AggregateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AggregateResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateResolver")
            .field(
                "resolvers",
                &self
                    .entries
                    .iter()
                    .map(|e| (e.resolver.name(), e.priority))
                    .collect::<Vec<_>>(),
            )
            .field("last_failure", &self.last_failure)
            .finish()
    }
}
