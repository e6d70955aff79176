//! Heuristic mapping auto-detection.
//!
//! A coarse, selector-synthesis-free collaborator: probe a fixed list
//! of container selectors common in content systems, fall back to tag
//! frequency, and pair the winner with stock field selectors. The pick
//! session refines whatever this gets wrong.

use crate::extract::{ExtractError, extract_items};
use crate::fetch::{FetchError, PageFetcher};
use pagepick_common::protocol::{ExtractedItem, SelectorMapping};
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Container selectors probed in order; first with enough matches wins.
const ITEM_CANDIDATES: &[&str] = &[
    "article",
    "div.post",
    "div.entry",
    "div.article",
    "li.post",
    "li.entry",
    "li.article",
    r#"div[class*="post"]"#,
    r#"div[class*="entry"]"#,
    r#"div[class*="article"]"#,
];

/// A candidate must select at least this many elements to count as a
/// repeating container.
const MIN_ITEM_MATCHES: usize = 3;

/// Tag-frequency fallback threshold.
const MIN_TAG_COUNT: usize = 5;

/// Layout tags too generic for the tag-frequency fallback.
const GENERIC_TAGS: &[&str] = &["div", "span", "p", "a", "li"];

/// Preview size returned alongside a detected mapping.
const PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Find a selector identifying the page's repeating content items.
pub fn detect_item_selector(doc: &Html) -> String {
    for candidate in ITEM_CANDIDATES {
        let sel = Selector::parse(candidate).expect("valid candidate selector");
        if doc.select(&sel).count() >= MIN_ITEM_MATCHES {
            tracing::debug!(selector = candidate, "item candidate accepted");
            return candidate.to_string();
        }
    }

    // Fallback: most frequent non-generic tag, first-seen wins ties.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for node in doc.tree.nodes() {
        if let Some(element) = node.value().as_element() {
            let name = element.name().to_ascii_lowercase();
            match counts.iter_mut().find(|(tag, _)| *tag == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    for (tag, count) in counts {
        if count >= MIN_TAG_COUNT && !GENERIC_TAGS.contains(&tag.as_str()) {
            return tag;
        }
    }

    "a".to_string()
}

/// Detect a full mapping for a page: the item selector heuristic plus
/// stock relative selectors for the common fields.
pub fn detect_mapping(html: &str) -> SelectorMapping {
    let doc = Html::parse_document(html);
    SelectorMapping {
        item: Some(detect_item_selector(&doc)),
        title: Some("h1, h2, h3".to_string()),
        link: Some("a".to_string()),
        content: Some("p".to_string()),
        date: Some("time".to_string()),
        author: Some(r#"[class*="author"], .author"#.to_string()),
        image: None,
    }
}

/// Fetch a page, detect its mapping and return a bounded preview.
pub async fn auto_detect(
    fetcher: &mut PageFetcher,
    url: &str,
) -> Result<(SelectorMapping, Vec<ExtractedItem>), DetectError> {
    let base_url = Url::parse(url)?;
    let html = fetcher.fetch(url).await?;
    let mapping = detect_mapping(&html);
    let preview = extract_items(&html, &base_url, &mapping, PREVIEW_LIMIT)?;
    Ok((mapping, preview))
}
