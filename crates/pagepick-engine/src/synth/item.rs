//! Item container synthesizer.

use super::classifier::{classify, item_keywords};
use super::generic::resolve_generic;
use crate::dom::DomNode;

/// Tag names plausible as generic containers even without class hints.
const CONTAINER_TAGS: &[&str] = &["article", "section", "div"];

/// Generalize a clicked element into a selector meant to match every
/// repeated item container on the page. Semantic class names win over
/// positional ones because the selector must cover many siblings, not
/// describe one element.
pub fn resolve_item<N: DomNode>(el: &N) -> String {
    let classes = el.classes();
    if !classes.is_empty() {
        if let Some(cls) = classify(&classes, item_keywords()) {
            return format!(".{}", cls);
        }
        return format!(".{}", classes[0]);
    }

    let tag = el.tag();
    if CONTAINER_TAGS.contains(&tag.as_str()) {
        return tag;
    }

    resolve_generic(el)
}
