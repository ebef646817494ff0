// crates/feed-parser/src/feed.rs
//! Unified feed data structures
//!
//! Every format parser produces the same [`Feed`] shape, so nothing here
//! records which wire format a feed came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed feed with metadata and items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    /// Feed title
    pub title: String,
    /// Site URL, possibly relative until resolved with `fix_urls`
    pub site_url: String,
    /// Feed description
    pub description: Option<String>,
    /// Feed language
    pub language: Option<String>,
    /// Last update time
    pub updated: Option<DateTime<Utc>>,
    /// Items in document order
    pub items: Vec<FeedItem>,
}

impl Feed {
    /// Creates a new feed
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns the number of items in the feed
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the feed has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item to the feed
    pub fn add_item(&mut self, item: FeedItem) {
        self.items.push(item);
    }

}

/// A single entry in a feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Unique identifier (guid / id), empty when the source has none
    pub guid: String,
    /// Item link, possibly relative until resolved with `fix_urls`
    pub url: String,
    /// Item title
    pub title: String,
    /// Body or summary, whichever the source offers (full content preferred)
    pub content: Option<String>,
    /// Author/creator
    pub author: Option<String>,
    /// Publication date
    pub published: Option<DateTime<Utc>>,
    /// Media enclosure
    pub enclosure: Option<Enclosure>,
}

impl FeedItem {
    /// Creates a new feed item
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

}

/// Media attached to an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    /// URL to the media file
    pub url: String,
    /// MIME type (e.g., "audio/mpeg")
    pub mime_type: Option<String>,
    /// File size in bytes
    pub length: Option<u64>,
}

impl Enclosure {
    /// Creates a new enclosure
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime_type: None,
            length: None,
        }
    }
}
