//! RSS rendering for saved feeds.
//!
//! The end product of the whole pipeline: a saved feed's extraction,
//! rendered as RSS XML a reader can subscribe to. Items come from the
//! extraction layer already filtered, so every entry has a title and a
//! link.

use chrono::{DateTime, NaiveDate};
use pagepick_common::protocol::{ExtractedItem, SavedFeed};
use rss::{ChannelBuilder, EnclosureBuilder, Item, ItemBuilder};

/// Items rendered per feed.
pub const RSS_ITEM_LIMIT: usize = 50;

/// Render a feed's extracted items as an RSS 2.0 document.
pub fn generate_rss(feed: &SavedFeed, items: &[ExtractedItem]) -> String {
    let title = if feed.name.trim().is_empty() {
        feed.url.as_str()
    } else {
        feed.name.as_str()
    };

    let channel = ChannelBuilder::default()
        .title(title)
        .link(feed.url.clone())
        .description(format!("RSS feed generated from {}", feed.url))
        .items(items.iter().map(rss_item).collect::<Vec<_>>())
        .build();

    tracing::debug!(feed = feed.id, items = items.len(), "rss rendered");
    channel.to_string()
}

fn rss_item(item: &ExtractedItem) -> Item {
    let mut builder = ItemBuilder::default();
    builder
        .title(item.title.clone())
        .link(item.link.clone())
        .description(item.content.clone())
        .author(item.author.clone())
        .pub_date(item.date.as_deref().and_then(pub_date));

    if let Some(image) = &item.image {
        builder.enclosure(Some(
            EnclosureBuilder::default()
                .url(image.clone())
                .length("0")
                .mime_type(image_mime(image))
                .build(),
        ));
    }

    builder.build()
}

/// Lenient date handling: extracted dates are raw page text, so try the
/// common machine formats and drop anything unrecognized rather than
/// emit an invalid pubDate.
fn pub_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.to_rfc2822());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.to_rfc2822());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0)?.and_utc();
        return Some(dt.to_rfc2822());
    }
    None
}

/// Guess an enclosure mime type from the URL's extension, defaulting to
/// jpeg like the usual table-based guessers.
fn image_mime(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "image/jpeg",
    }
}
