//! Tree-navigation capability set for selector synthesis.
//!
//! The synthesizers never touch a live browser tree. They operate on the
//! small capability set below (tag, classes, id, parent, selector
//! matching), so the same code runs against any offline parsed document
//! and stays testable without rendering.

use scraper::ElementRef;

pub use scraper::{Html, Selector};

/// Abstract node in the rendered page's structural tree.
///
/// Implementations must report class names in document order: the
/// classifier's first-match-wins contract is order-sensitive.
pub trait DomNode: Clone {
    /// Lowercase tag name.
    fn tag(&self) -> String;

    /// Element id, if present and non-empty.
    fn id(&self) -> Option<String>;

    /// Class names in document order. May be empty.
    fn classes(&self) -> Vec<String>;

    /// Parent element, if any.
    fn parent(&self) -> Option<Self>;

    /// Whether this node matches a CSS selector. Unparseable selectors
    /// match nothing.
    fn matches(&self, selector: &str) -> bool;

    /// Whether this node is the document body (the exclusive terminal
    /// of every ancestor walk).
    fn is_body(&self) -> bool {
        self.tag() == "body"
    }
}

impl<'a> DomNode for ElementRef<'a> {
    fn tag(&self) -> String {
        self.value().name().to_ascii_lowercase()
    }

    fn id(&self) -> Option<String> {
        self.value()
            .id()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    fn classes(&self) -> Vec<String> {
        // Read the raw attribute rather than scraper's class set so the
        // authoring order is preserved.
        self.value()
            .attr("class")
            .map(|attr| attr.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn parent(&self) -> Option<Self> {
        // Disambiguated: `self.parent()` would re-enter this method
        // instead of reaching `NodeRef::parent` through deref.
        (**self).parent().and_then(ElementRef::wrap)
    }

    fn matches(&self, selector: &str) -> bool {
        match Selector::parse(selector) {
            Ok(sel) => sel.matches(self),
            Err(_) => false,
        }
    }
}

/// First element matching `selector`, for tests and callers that need to
/// locate a concrete node inside a parsed document.
pub fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).next()
}
