use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic purpose of a picked element.
///
/// A picking session is bound to exactly one role. `Item` is special:
/// its selector must generalize across all repeated containers on the
/// page, while every other role resolves relative to the item container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Item,
    Title,
    Link,
    Content,
    Date,
    Author,
    Image,
}

impl Role {
    pub const ALL: &[Role] = &[
        Role::Item,
        Role::Title,
        Role::Link,
        Role::Content,
        Role::Date,
        Role::Author,
        Role::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Item => "item",
            Role::Title => "title",
            Role::Link => "link",
            Role::Content => "content",
            Role::Date => "date",
            Role::Author => "author",
            Role::Image => "image",
        }
    }

    /// Wire name of the mapping field this role fills, e.g. `item_selector`.
    pub fn field_name(&self) -> &'static str {
        match self {
            Role::Item => "item_selector",
            Role::Title => "title_selector",
            Role::Link => "link_selector",
            Role::Content => "content_selector",
            Role::Date => "date_selector",
            Role::Author => "author_selector",
            Role::Image => "image_selector",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "item" => Ok(Role::Item),
            "title" => Ok(Role::Title),
            "link" => Ok(Role::Link),
            "content" => Ok(Role::Content),
            "date" => Ok(Role::Date),
            "author" => Ok(Role::Author),
            "image" => Ok(Role::Image),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// The single artifact a picking session produces.
///
/// Posted to the session's opener once the controller resolves; the
/// opener fills the form field keyed by `field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickResult {
    pub field: Role,
    pub selector: String,
}

/// Role → selector mapping for one feed.
///
/// Field names match the original wire/database format. Empty strings
/// are treated the same as absent selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorMapping {
    #[serde(rename = "item_selector", skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(rename = "title_selector", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "link_selector", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(rename = "content_selector", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "date_selector", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "author_selector", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "image_selector", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SelectorMapping {
    /// Get the selector for a role, treating empty/blank strings as absent.
    pub fn get(&self, role: Role) -> Option<&str> {
        let slot = match role {
            Role::Item => &self.item,
            Role::Title => &self.title,
            Role::Link => &self.link,
            Role::Content => &self.content,
            Role::Date => &self.date,
            Role::Author => &self.author,
            Role::Image => &self.image,
        };
        slot.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, role: Role, selector: impl Into<String>) {
        let slot = match role {
            Role::Item => &mut self.item,
            Role::Title => &mut self.title,
            Role::Link => &mut self.link,
            Role::Content => &mut self.content,
            Role::Date => &mut self.date,
            Role::Author => &mut self.author,
            Role::Image => &mut self.image,
        };
        *slot = Some(selector.into());
    }

    /// Apply a pick result to the mapping.
    pub fn apply(&mut self, result: &PickResult) {
        self.set(result.field, result.selector.clone());
    }

    pub fn is_empty(&self) -> bool {
        Role::ALL.iter().all(|r| self.get(*r).is_none())
    }
}

/// One extracted article, as returned by the preview collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A saved feed definition: name, source URL and selector mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFeed {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub mapping: SelectorMapping,
}

/// Error payload reported at collaborator boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(error: impl fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
