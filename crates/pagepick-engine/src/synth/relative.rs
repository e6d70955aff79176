//! Relative path synthesizer.
//!
//! Walks upward from a clicked element to the nearest enclosing item
//! container and emits a descendant-combinator path of per-level
//! tag+class fragments. This is where most of the generalization power
//! lives: the same relative path extracts the corresponding sub-element
//! from every item on the page.

use super::classifier::{classify, content_keywords};
use super::generic::resolve_generic;
use crate::dom::DomNode;

/// Resolve a selector for `el` relative to the item container matching
/// `item_selector`.
///
/// The ancestor walk starts at `el` itself and stops before the
/// document body; body never counts as a container. When no container
/// is found the relative approach is abandoned entirely and the generic
/// resolver's output is returned verbatim.
pub fn resolve_relative<N: DomNode>(el: &N, item_selector: &str) -> String {
    // Fragments accumulate innermost-first while searching upward for
    // the container; on success they reverse into container→el order.
    let mut fragments = Vec::new();
    let mut current = el.clone();

    loop {
        if current.is_body() {
            return resolve_generic(el);
        }
        if current.matches(item_selector) {
            if fragments.is_empty() {
                // The clicked element IS the container. Emit its own
                // fragment rather than an empty path.
                return fragment(el);
            }
            fragments.reverse();
            return fragments.join(" ");
        }
        fragments.push(fragment(&current));
        match current.parent() {
            Some(parent) => current = parent,
            None => return resolve_generic(el),
        }
    }
}

/// One per-level fragment: lowercase tag, plus the most meaningful
/// class (content keyword match first, else the first class).
fn fragment<N: DomNode>(node: &N) -> String {
    let tag = node.tag();
    let classes = node.classes();
    match classes.first() {
        None => tag,
        Some(first) => {
            let cls = classify(&classes, content_keywords()).unwrap_or_else(|| first.clone());
            format!("{}.{}", tag, cls)
        }
    }
}
