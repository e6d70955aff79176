use crate::protocol::{ExtractedItem, Role, SelectorMapping};

/// Longest content snippet shown per item before truncation.
const SNIPPET_LEN: usize = 120;

/// Render extracted items as a plain-text preview list.
pub fn format_preview(items: &[ExtractedItem]) -> String {
    if items.is_empty() {
        return "No items extracted".to_string();
    }

    let mut output = String::new();
    for (idx, item) in items.iter().enumerate() {
        let title = item.title.as_deref().unwrap_or("(untitled)");
        output.push_str(&format!("[{}] {:?}\n", idx + 1, title));

        if let Some(link) = &item.link {
            output.push_str(&format!("    link: {}\n", link));
        }

        let mut meta = Vec::new();
        if let Some(date) = &item.date {
            meta.push(format!("date: {}", date));
        }
        if let Some(author) = &item.author {
            meta.push(format!("author: {}", author));
        }
        if let Some(image) = &item.image {
            meta.push(format!("image: {}", image));
        }
        if !meta.is_empty() {
            output.push_str(&format!("    {}\n", meta.join("  ")));
        }

        if let Some(content) = &item.content {
            output.push_str(&format!("    {}\n", snippet(content)));
        }
    }
    output
}

/// Render a selector mapping, one `field: selector` line per set role.
pub fn format_mapping(mapping: &SelectorMapping) -> String {
    let mut lines = Vec::new();
    for role in Role::ALL {
        if let Some(selector) = mapping.get(*role) {
            lines.push(format!("{}: {}", role.field_name(), selector));
        }
    }
    if lines.is_empty() {
        "(empty mapping)".to_string()
    } else {
        lines.join("\n")
    }
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= SNIPPET_LEN {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(SNIPPET_LEN).collect();
    format!("{}…", cut.trim_end())
}
