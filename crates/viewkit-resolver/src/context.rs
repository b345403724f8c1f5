//! View context abstraction.
//!
//! Resolvers only need one thing from the surrounding view layer: the name of
//! the template currently being rendered. Its namespace (everything before the
//! last `/`) lets a bare name such as `"bar"` fall back to a sibling template
//! like `"foo/bar"`.

/// Access to the view that is currently being rendered.
pub trait ViewContext {
    /// Name of the template currently being rendered, if any.
    fn current_template_name(&self) -> Option<&str>;

    /// Namespace of the current template.
    ///
    /// Returns `None` when there is no current template or when it lives at
    /// the top level.
    fn namespace(&self) -> Option<&str> {
        self.current_template_name().and_then(namespace_of)
    }
}

/// Returns the namespace portion of a template name.
///
/// ```
/// use viewkit_resolver::namespace_of;
///
/// assert_eq!(namespace_of("admin/users/list"), Some("admin/users"));
/// assert_eq!(namespace_of("index"), None);
/// ```
pub fn namespace_of(template: &str) -> Option<&str> {
    match template.rfind('/') {
        Some(idx) if idx > 0 => Some(&template[..idx]),
        _ => None,
    }
}

/// A minimal [`ViewContext`] holding the current template name.
///
/// Rendering layers usually implement [`ViewContext`] on their own renderer
/// type. `CurrentView` covers everything else, tests included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentView {
    template: Option<String>,
}

impl CurrentView {
    /// Create a context whose current template is `template`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
        }
    }

    /// Create a context with no current template.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the current template.
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = Some(template.into());
    }

    /// Forget the current template.
    pub fn clear(&mut self) {
        self.template = None;
    }
}

impl ViewContext for CurrentView {
    fn current_template_name(&self) -> Option<&str> {
        self.template.as_deref()
    }
}
