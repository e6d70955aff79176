//! Mapping-driven article extraction.
//!
//! Evaluates a committed `SelectorMapping` against a fetched document
//! and returns the ordered items the mapping describes. This is the
//! preview collaborator: the synthesis layer produces the selectors,
//! this module consumes them.

use pagepick_common::protocol::{ExtractedItem, Role, SelectorMapping};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Item selector used when the mapping leaves it empty.
const DEFAULT_ITEM_SELECTOR: &str = "article";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid {field} selector: {selector:?}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
    },
}

/// Per-field selectors compiled once per extraction run.
struct FieldSelectors {
    title: Option<Selector>,
    link: Option<Selector>,
    content: Option<Selector>,
    date: Option<Selector>,
    author: Option<Selector>,
    image: Option<Selector>,
}

impl FieldSelectors {
    fn compile(mapping: &SelectorMapping) -> Result<Self, ExtractError> {
        Ok(Self {
            title: compile_field(mapping, Role::Title)?,
            link: compile_field(mapping, Role::Link)?,
            content: compile_field(mapping, Role::Content)?,
            date: compile_field(mapping, Role::Date)?,
            author: compile_field(mapping, Role::Author)?,
            image: compile_field(mapping, Role::Image)?,
        })
    }
}

fn compile_field(
    mapping: &SelectorMapping,
    role: Role,
) -> Result<Option<Selector>, ExtractError> {
    match mapping.get(role) {
        None => Ok(None),
        Some(raw) => Selector::parse(raw)
            .map(Some)
            .map_err(|_| ExtractError::InvalidSelector {
                field: role.as_str(),
                selector: raw.to_string(),
            }),
    }
}

/// Extract up to `limit` items from `html` using `mapping`.
///
/// Items missing either a title or a link are dropped; relative links
/// and image sources are joined against `base_url`.
pub fn extract_items(
    html: &str,
    base_url: &Url,
    mapping: &SelectorMapping,
    limit: usize,
) -> Result<Vec<ExtractedItem>, ExtractError> {
    let doc = Html::parse_document(html);
    let item_raw = mapping.get(Role::Item).unwrap_or(DEFAULT_ITEM_SELECTOR);
    let item_selector =
        Selector::parse(item_raw).map_err(|_| ExtractError::InvalidSelector {
            field: Role::Item.as_str(),
            selector: item_raw.to_string(),
        })?;
    let fields = FieldSelectors::compile(mapping)?;

    let mut items = Vec::new();
    for item_el in doc.select(&item_selector) {
        if items.len() >= limit {
            break;
        }
        if let Some(item) = extract_one(item_el, base_url, &fields) {
            items.push(item);
        }
    }

    tracing::debug!(count = items.len(), item_selector = %item_raw, "extracted items");
    Ok(items)
}

fn extract_one(
    item_el: ElementRef<'_>,
    base_url: &Url,
    fields: &FieldSelectors,
) -> Option<ExtractedItem> {
    let title = fields
        .title
        .as_ref()
        .and_then(|sel| item_el.select(sel).next())
        .map(text_of)
        .filter(|t| !t.is_empty());

    let link = fields
        .link
        .as_ref()
        .and_then(|sel| item_el.select(sel).next())
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| base_url.join(href).ok())
        .map(|u| u.to_string());

    // Only accept items with a title and a link at minimum.
    let (title, link) = match (title, link) {
        (Some(t), Some(l)) => (t, l),
        _ => return None,
    };

    let text_field = |sel: &Option<Selector>| {
        sel.as_ref()
            .and_then(|sel| item_el.select(sel).next())
            .map(text_of)
            .filter(|t| !t.is_empty())
    };

    let image = fields
        .image
        .as_ref()
        .and_then(|sel| item_el.select(sel).next())
        .and_then(image_source)
        .and_then(|src| base_url.join(&src).ok())
        .map(|u| u.to_string());

    Some(ExtractedItem {
        title: Some(title),
        link: Some(link),
        content: text_field(&fields.content),
        date: text_field(&fields.date),
        author: text_field(&fields.author),
        image,
    })
}

/// Image URL from an `img` element's `src`, or the `content` attribute
/// of meta-like elements.
fn image_source(el: ElementRef<'_>) -> Option<String> {
    if el.value().name().eq_ignore_ascii_case("img") {
        return el.value().attr("src").map(str::to_string);
    }
    el.value().attr("content").map(str::to_string)
}

/// Whitespace-normalized text content of an element.
fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="feed">
            <div class="entry">
                <h2 class="headline">First Post</h2>
                <a href="/posts/1">read</a>
                <p class="summary">Summary  one</p>
                <time>2024-01-01</time>
                <span class="author">Ada</span>
                <img class="thumb" src="/img/1.png">
            </div>
            <div class="entry">
                <h2 class="headline">Second Post</h2>
                <a href="https://other.example/posts/2">read</a>
            </div>
            <div class="entry">
                <h2 class="headline">No link here</h2>
            </div>
        </div>
    "#;

    fn full_mapping() -> SelectorMapping {
        SelectorMapping {
            item: Some(".entry".into()),
            title: Some("h2.headline".into()),
            link: Some("a".into()),
            content: Some("p.summary".into()),
            date: Some("time".into()),
            author: Some(".author".into()),
            image: Some("img.thumb".into()),
        }
    }

    fn base() -> Url {
        Url::parse("https://example.com/blog/").unwrap()
    }

    #[test]
    fn test_extracts_mapped_fields() {
        let items = extract_items(PAGE, &base(), &full_mapping(), 20).unwrap();
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.title.as_deref(), Some("First Post"));
        assert_eq!(first.link.as_deref(), Some("https://example.com/posts/1"));
        assert_eq!(first.content.as_deref(), Some("Summary one"));
        assert_eq!(first.date.as_deref(), Some("2024-01-01"));
        assert_eq!(first.author.as_deref(), Some("Ada"));
        assert_eq!(first.image.as_deref(), Some("https://example.com/img/1.png"));
    }

    #[test]
    fn test_absolute_links_pass_through() {
        let items = extract_items(PAGE, &base(), &full_mapping(), 20).unwrap();
        assert_eq!(
            items[1].link.as_deref(),
            Some("https://other.example/posts/2")
        );
        assert_eq!(items[1].author, None);
    }

    #[test]
    fn test_items_without_title_or_link_are_dropped() {
        let items = extract_items(PAGE, &base(), &full_mapping(), 20).unwrap();
        assert!(items.iter().all(|i| i.title.is_some() && i.link.is_some()));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_limit_counts_accepted_items() {
        let items = extract_items(PAGE, &base(), &full_mapping(), 1).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("First Post"));
    }

    #[test]
    fn test_default_item_selector() {
        let html = r#"
            <article><h2>A</h2><a href="/a">x</a></article>
            <article><h2>B</h2><a href="/b">x</a></article>
        "#;
        let mapping = SelectorMapping {
            title: Some("h2".into()),
            link: Some("a".into()),
            ..Default::default()
        };
        let items = extract_items(html, &base(), &mapping, 20).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let mut mapping = full_mapping();
        mapping.title = Some("[[nope".into());
        let err = extract_items(PAGE, &base(), &mapping, 20).unwrap_err();
        match err {
            ExtractError::InvalidSelector { field, .. } => assert_eq!(field, "title"),
        }
    }

    #[test]
    fn test_meta_image_uses_content_attr() {
        let html = r#"
            <div class="entry">
                <h2>A</h2><a href="/a">x</a>
                <meta class="og-img" content="/img/og.png">
            </div>
        "#;
        let mapping = SelectorMapping {
            item: Some(".entry".into()),
            title: Some("h2".into()),
            link: Some("a".into()),
            image: Some(".og-img".into()),
            ..Default::default()
        };
        let items = extract_items(html, &base(), &mapping, 20).unwrap();
        assert_eq!(
            items[0].image.as_deref(),
            Some("https://example.com/img/og.png")
        );
    }
}
