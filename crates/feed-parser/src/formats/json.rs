// crates/feed-parser/src/formats/json.rs
//! JSON Feed 1.0 / 1.1 parser

use super::{non_empty, parse_rfc3339};
use crate::error::FeedResult;
use crate::feed::{Enclosure, Feed, FeedItem};
use serde::Deserialize;
use std::io::{BufReader, Read};

#[derive(Debug, Deserialize)]
struct JsonFeed {
    title: Option<String>,
    home_page_url: Option<String>,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    items: Vec<JsonItem>,
}

#[derive(Debug, Deserialize)]
struct JsonItem {
    // Should be a string, but numeric ids show up in the wild
    #[serde(default)]
    id: serde_json::Value,
    url: Option<String>,
    title: Option<String>,
    content_html: Option<String>,
    content_text: Option<String>,
    summary: Option<String>,
    date_published: Option<String>,
    date_modified: Option<String>,
    // 1.0 uses `author`, 1.1 uses `authors`
    author: Option<JsonAuthor>,
    #[serde(default)]
    authors: Vec<JsonAuthor>,
    #[serde(default)]
    attachments: Vec<JsonAttachment>,
}

#[derive(Debug, Deserialize)]
struct JsonAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonAttachment {
    url: String,
    mime_type: Option<String>,
    size_in_bytes: Option<u64>,
}

/// Parses a JSON Feed document
pub fn parse<R: Read>(reader: R) -> FeedResult<Feed> {
    let source: JsonFeed = serde_json::from_reader(BufReader::new(reader))?;

    Ok(Feed {
        title: source.title.unwrap_or_default(),
        site_url: source.home_page_url.unwrap_or_default(),
        description: source.description.and_then(non_empty),
        language: source.language.and_then(non_empty),
        updated: None,
        items: source.items.into_iter().map(into_item).collect(),
    })
}

fn into_item(item: JsonItem) -> FeedItem {
    let guid = match item.id {
        serde_json::Value::String(id) => id,
        serde_json::Value::Number(id) => id.to_string(),
        _ => String::new(),
    };

    let published = item
        .date_published
        .as_deref()
        .and_then(parse_rfc3339)
        .or_else(|| item.date_modified.as_deref().and_then(parse_rfc3339));

    let author = item
        .authors
        .into_iter()
        .chain(item.author)
        .find_map(|a| a.name.and_then(non_empty));

    let enclosure = item.attachments.into_iter().next().map(|a| Enclosure {
        url: a.url,
        mime_type: a.mime_type,
        length: a.size_in_bytes,
    });

    FeedItem {
        guid,
        url: item.url.unwrap_or_default(),
        title: item.title.unwrap_or_default(),
        content: item
            .content_html
            .or(item.content_text)
            .or(item.summary)
            .and_then(non_empty),
        author,
        published,
        enclosure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;

    #[test]
    fn test_parse_json_feed() {
        let json = r#"{
  "version": "https://jsonfeed.org/version/1.1",
  "title": "JSON Feed",
  "home_page_url": "https://example.org/",
  "description": "A JSON feed",
  "items": [
    {
      "id": "1",
      "url": "https://example.org/first",
      "title": "First",
      "content_html": "<p>Hello</p>",
      "date_published": "2024-01-01T12:00:00Z",
      "authors": [{"name": "Alice"}],
      "attachments": [{"url": "https://example.org/1.mp3", "mime_type": "audio/mpeg", "size_in_bytes": 100}]
    },
    {
      "id": 2,
      "url": "second",
      "content_text": "Plain",
      "author": {"name": "Bob"}
    }
  ]
}"#;

        let feed = parse(json.as_bytes()).expect("Should parse JSON Feed");
        assert_eq!(feed.title, "JSON Feed");
        assert_eq!(feed.site_url, "https://example.org/");
        assert_eq!(feed.description.as_deref(), Some("A JSON feed"));
        assert_eq!(feed.item_count(), 2);

        let first = &feed.items[0];
        assert_eq!(first.guid, "1");
        assert_eq!(first.content.as_deref(), Some("<p>Hello</p>"));
        assert_eq!(first.author.as_deref(), Some("Alice"));
        assert!(first.published.is_some());
        let enclosure = first.enclosure.as_ref().expect("Should have an attachment");
        assert_eq!(enclosure.mime_type.as_deref(), Some("audio/mpeg"));
        assert_eq!(enclosure.length, Some(100));

        let second = &feed.items[1];
        assert_eq!(second.guid, "2");
        assert_eq!(second.url, "second");
        assert_eq!(second.content.as_deref(), Some("Plain"));
        assert_eq!(second.author.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_minimal_json_feed() {
        let feed = parse(&b"{}"[..]).expect("Should parse empty object");
        assert!(feed.title.is_empty());
        assert!(feed.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse(&b"{\"items\": [}"[..]).expect_err("Should fail");
        assert!(matches!(err, FeedError::Json(_)));
    }
}
