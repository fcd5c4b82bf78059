//! Element handle for the headless element tree.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A node in the element tree the tracker operates on.
///
/// `Element` is a cheap handle (`Arc` inner) so the same node can be held by
/// the event source, the tracker state, and a scheduled restore task at once.
/// Identity is pointer identity: two handles are the same element iff they
/// point at the same inner node, see [`Element::ptr_eq`].
///
/// Children hold a strong reference to their parent; parents do not reference
/// children. That is all the ancestor walk in
/// [`parent_link_for`] needs, and it keeps the tree free of reference cycles.
#[derive(Clone)]
pub struct Element {
    inner: Arc<ElementInner>,
}

struct ElementInner {
    tag: String,
    attributes: RwLock<HashMap<String, String>>,
    parent: RwLock<Option<Element>>,
    /// Set while a sync tracking dispatch has temporarily rewritten `href`.
    rewriting: AtomicBool,
}

impl Element {
    /// Creates a detached element with the given tag name.
    ///
    /// Tag names are matched case-insensitively, so `"A"` and `"a"` both
    /// produce an anchor.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ElementInner {
                tag: tag.into(),
                attributes: RwLock::new(HashMap::new()),
                parent: RwLock::new(None),
                rewriting: AtomicBool::new(false),
            }),
        }
    }

    /// Builder-style attribute setter for constructing trees in one expression.
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style parent attachment.
    pub fn child_of(self, parent: &Element) -> Self {
        self.attach_to(parent);
        self
    }

    /// Returns the tag name as given at construction.
    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// Returns a copy of the attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<String> {
        self.inner.attributes.read().get(name).cloned()
    }

    /// Sets or replaces an attribute.
    pub fn set_attr(&self, name: &str, value: &str) {
        self.inner
            .attributes
            .write()
            .insert(name.to_string(), value.to_string());
    }

    /// Attaches this element as a child of `parent`, replacing any previous
    /// parent.
    pub fn attach_to(&self, parent: &Element) {
        *self.inner.parent.write() = Some(parent.clone());
    }

    /// Returns the parent element, if attached.
    pub fn parent(&self) -> Option<Element> {
        self.inner.parent.read().clone()
    }

    /// Whether this element is an anchor (`<a>`).
    pub fn is_anchor(&self) -> bool {
        self.inner.tag.eq_ignore_ascii_case("a")
    }

    /// Shorthand for the `href` attribute.
    pub fn href(&self) -> Option<String> {
        self.attr("href")
    }

    /// Shorthand for setting the `href` attribute.
    pub fn set_href(&self, value: &str) {
        self.set_attr("href", value);
    }

    /// Whether `self` is `root` or one of its descendants.
    pub fn is_within(&self, root: &Element) -> bool {
        let mut current = Some(self.clone());
        while let Some(elm) = current {
            if Element::ptr_eq(&elm, root) {
                return true;
            }
            current = elm.parent();
        }
        false
    }

    /// Pointer identity of two handles.
    pub fn ptr_eq(a: &Element, b: &Element) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Claims the rewrite guard. Returns `false` if a rewrite is already in
    /// progress on this element, in which case the caller must not touch the
    /// destination attribute.
    pub(crate) fn begin_rewrite(&self) -> bool {
        !self.inner.rewriting.swap(true, Ordering::AcqRel)
    }

    /// Releases the rewrite guard after the original destination is restored.
    pub(crate) fn end_rewrite(&self) {
        self.inner.rewriting.store(false, Ordering::Release);
    }

    /// Whether a sync dispatch currently holds the rewrite guard.
    pub fn is_rewriting(&self) -> bool {
        self.inner.rewriting.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.inner.tag)
            .field("attributes", &*self.inner.attributes.read())
            .finish_non_exhaustive()
    }
}

/// Walks from `elm` up through its ancestors and returns the first anchor
/// element, or `None` when the chain is exhausted without finding one.
pub fn parent_link_for(elm: &Element) -> Option<Element> {
    let mut current = Some(elm.clone());
    while let Some(e) = current {
        if e.is_anchor() {
            return Some(e);
        }
        current = e.parent();
    }
    None
}
