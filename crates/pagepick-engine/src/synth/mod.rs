//! Selector synthesis.
//!
//! Given one concrete element the user clicked, produce a CSS selector
//! string. For the `item` role the selector must generalize to every
//! repeated article container on the page; for all other roles it
//! resolves relative to the known item container so the same relative
//! path extracts the matching sub-element from every item.
//!
//! Every tier is an ordered first-match policy with no scoring. All
//! entry points are total: any reachable element yields a non-empty
//! selector.

mod classifier;
mod generic;
mod item;
mod relative;

pub use classifier::{classify, content_keywords, image_keywords, item_keywords};
pub use generic::resolve_generic;
pub use item::resolve_item;
pub use relative::resolve_relative;

use crate::dom::DomNode;
use pagepick_common::protocol::Role;

/// Route a clicked element to the right synthesizer for its role.
///
/// `item_selector` is the previously committed container selector, if
/// any. A non-item role without one degrades to the generic resolver,
/// never an error.
pub fn resolve_for_role<N: DomNode>(el: &N, role: Role, item_selector: Option<&str>) -> String {
    match role {
        Role::Item => resolve_item(el),
        _ => match item_selector.map(str::trim).filter(|s| !s.is_empty()) {
            Some(selector) => resolve_relative(el, selector),
            None => resolve_generic(el),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Html, select_first};

    #[test]
    fn test_item_role_uses_item_synthesizer() {
        let doc = Html::parse_document(r#"<div class="story-block"><a>x</a></div>"#);
        let el = select_first(&doc, "div").unwrap();
        assert_eq!(resolve_for_role(&el, Role::Item, None), ".story-block");
    }

    #[test]
    fn test_missing_context_falls_back_to_generic() {
        let doc = Html::parse_document(r#"<h2 class="headline">Hi</h2>"#);
        let el = select_first(&doc, "h2").unwrap();
        assert_eq!(resolve_for_role(&el, Role::Title, None), ".headline");
        // Blank context counts as missing.
        assert_eq!(resolve_for_role(&el, Role::Title, Some("  ")), ".headline");
    }

    #[test]
    fn test_non_item_role_with_context_resolves_relatively() {
        let doc = Html::parse_document(
            r#"<div class="entry"><h2 class="headline">Hi</h2></div>"#,
        );
        let el = select_first(&doc, "h2").unwrap();
        assert_eq!(
            resolve_for_role(&el, Role::Title, Some(".entry")),
            "h2.headline"
        );
    }
}
