//! Heuristic class-name classifier.
//!
//! Decides whether a class name is semantically meaningful for a role
//! by keyword containment. First match in document order wins; the
//! contract is deliberately order-sensitive because authoring order
//! reflects intent.

use regex::Regex;
use std::sync::LazyLock;

static ITEM_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|post|item|entry|card|story)").expect("valid keyword pattern")
});

static CONTENT_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(title|content|image|img|date|author|link|text|description)")
        .expect("valid keyword pattern")
});

static IMAGE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(image|img|thumb|photo|picture|avatar|figure)")
        .expect("valid keyword pattern")
});

/// Keywords recognizing repeated article containers.
pub fn item_keywords() -> &'static Regex {
    &ITEM_KEYWORDS
}

/// Keywords recognizing per-field sub-elements inside a container.
pub fn content_keywords() -> &'static Regex {
    &CONTENT_KEYWORDS
}

/// Keywords recognizing image wrappers.
pub fn image_keywords() -> &'static Regex {
    &IMAGE_KEYWORDS
}

/// Return the first class name (document order) containing any keyword
/// of the set, or `None` when nothing matches.
pub fn classify(classes: &[String], keywords: &Regex) -> Option<String> {
    classes.iter().find(|cls| keywords.is_match(cls)).cloned()
}
