//! Context-free fallback resolver.

use super::classifier::{classify, image_keywords};
use crate::dom::DomNode;

/// Resolve a selector for a single element with no contextual
/// information. Tie-break order, first applicable rule wins:
/// id, image special-casing, first class, bare tag.
pub fn resolve_generic<N: DomNode>(el: &N) -> String {
    if let Some(id) = el.id() {
        return format!("#{}", id);
    }

    if el.tag() == "img" {
        return resolve_image(el);
    }

    let classes = el.classes();
    if let Some(first) = classes.first() {
        return format!(".{}", first);
    }

    el.tag()
}

/// Images get a wider net: a semantic class on the element itself, then
/// on its parent, then the bare tag. A non-semantic class on an `img`
/// is ignored; `img` alone generalizes better.
fn resolve_image<N: DomNode>(el: &N) -> String {
    if let Some(cls) = classify(&el.classes(), image_keywords()) {
        return format!("img.{}", cls);
    }

    if let Some(parent) = el.parent()
        && let Some(cls) = classify(&parent.classes(), image_keywords())
    {
        return format!(".{} img", cls);
    }

    "img".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Html, select_first};

    #[test]
    fn test_id_takes_absolute_precedence() {
        let doc = Html::parse_document(r#"<div id="main" class="post story"></div>"#);
        let el = select_first(&doc, "div").unwrap();
        assert_eq!(resolve_generic(&el), "#main");
    }

    #[test]
    fn test_id_beats_img_special_casing() {
        let doc = Html::parse_document(r#"<img id="logo" class="thumb">"#);
        let el = select_first(&doc, "img").unwrap();
        assert_eq!(resolve_generic(&el), "#logo");
    }

    #[test]
    fn test_img_with_semantic_class() {
        let doc = Html::parse_document(r#"<img class="decoration hero-photo">"#);
        let el = select_first(&doc, "img").unwrap();
        assert_eq!(resolve_generic(&el), "img.hero-photo");
    }

    #[test]
    fn test_img_with_semantic_parent_class() {
        let doc = Html::parse_document(r#"<figure class="post-figure"><img class="x"></figure>"#);
        let el = select_first(&doc, "img").unwrap();
        assert_eq!(resolve_generic(&el), ".post-figure img");
    }

    #[test]
    fn test_img_bare_when_nothing_classifiable() {
        let doc = Html::parse_document(r#"<div class="wrapper"><img class="decoration"></div>"#);
        let el = select_first(&doc, "img").unwrap();
        // Non-semantic classes on an img never produce a class selector.
        assert_eq!(resolve_generic(&el), "img");
    }

    #[test]
    fn test_first_class_positional() {
        let doc = Html::parse_document(r#"<span class="zebra author"></span>"#);
        let el = select_first(&doc, "span").unwrap();
        // No keyword filtering at this tier: purely positional.
        assert_eq!(resolve_generic(&el), ".zebra");
    }

    #[test]
    fn test_bare_tag_fallback() {
        let doc = Html::parse_document("<em>hello</em>");
        let el = select_first(&doc, "em").unwrap();
        assert_eq!(resolve_generic(&el), "em");
    }

    #[test]
    fn test_self_consistency() {
        let html = r#"
            <div id="top" class="post"></div>
            <img class="thumb">
            <span class="plain"></span>
            <em></em>
        "#;
        let doc = Html::parse_document(html);
        for sel in ["#top", "img", "span", "em"] {
            let el = select_first(&doc, sel).unwrap();
            let produced = resolve_generic(&el);
            let matched = select_first(&doc, &produced).unwrap();
            assert_eq!(matched.value().name(), el.value().name());
        }
    }
}
