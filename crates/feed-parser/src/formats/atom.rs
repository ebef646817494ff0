// crates/feed-parser/src/formats/atom.rs
//! Atom 1.0 parser

use super::{
    attribute, element_key, enclosure_from, non_empty, parse_rfc3339, push_text, text_of,
    xml_reader, MODULE_PREFIXES,
};
use crate::error::FeedResult;
use crate::feed::{Feed, FeedItem};
use quick_xml::events::{BytesStart, Event};
use std::io::Read;

/// Parses an Atom document
pub fn parse<R: Read>(reader: R) -> FeedResult<Feed> {
    let mut reader = xml_reader(reader);

    let mut feed = Feed::default();
    let mut current_item: Option<FeedItem> = None;
    let mut text_buffer = String::new();
    let mut in_author = false;
    // Depth inside <content>/<summary>; xhtml bodies carry child elements
    let mut content_depth = 0usize;
    // Depth inside an entry's <source>, which describes another feed
    let mut source_depth = 0usize;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) if content_depth > 0 => content_depth += 1,
            Event::Start(e) => {
                text_buffer.clear();
                match element_key(e.name(), MODULE_PREFIXES) {
                    b"entry" => current_item = Some(FeedItem::default()),
                    b"source" if current_item.is_some() => source_depth += 1,
                    b"author" => in_author = true,
                    b"content" | b"summary" => content_depth = 1,
                    b"link" if source_depth == 0 => {
                        apply_link(&e, &mut feed, current_item.as_mut())
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if content_depth == 0
                    && source_depth == 0
                    && element_key(e.name(), MODULE_PREFIXES) == b"link"
                {
                    apply_link(&e, &mut feed, current_item.as_mut());
                }
            }
            Event::Text(e) => push_text(&mut text_buffer, &text_of(&e)),
            Event::CData(e) => push_text(&mut text_buffer, &String::from_utf8_lossy(&e)),
            Event::End(_) if content_depth > 1 => content_depth -= 1,
            Event::End(e) => {
                let value = text_buffer.trim().to_string();
                text_buffer.clear();

                let name = element_key(e.name(), MODULE_PREFIXES);

                if content_depth == 1 {
                    content_depth = 0;
                    if let Some(item) = current_item.as_mut() {
                        match name {
                            b"content" if !value.is_empty() => item.content = Some(value),
                            b"summary" if item.content.is_none() => {
                                item.content = non_empty(value)
                            }
                            _ => {}
                        }
                    }
                } else if source_depth > 0 {
                    // fields of the originating feed are not ours
                    if name == b"source" {
                        source_depth -= 1;
                    }
                } else if name == b"author" {
                    in_author = false;
                } else if name == b"entry" {
                    if let Some(item) = current_item.take() {
                        feed.add_item(item);
                    }
                } else if let Some(item) = current_item.as_mut() {
                    match name {
                        b"title" => item.title = value,
                        b"id" => item.guid = value,
                        b"name" if in_author => item.author = non_empty(value),
                        b"published" => item.published = parse_rfc3339(&value),
                        b"updated" if item.published.is_none() => {
                            item.published = parse_rfc3339(&value)
                        }
                        _ => {}
                    }
                } else if !in_author {
                    match name {
                        b"title" if feed.title.is_empty() => feed.title = value,
                        b"subtitle" => feed.description = non_empty(value),
                        b"updated" => feed.updated = parse_rfc3339(&value),
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(feed)
}

/// Applies a `<link>` to the entry being read, or to the feed itself
fn apply_link(element: &BytesStart<'_>, feed: &mut Feed, item: Option<&mut FeedItem>) {
    let rel = attribute(element, b"rel").unwrap_or_else(|| "alternate".to_string());

    match (rel.as_str(), item) {
        ("alternate", Some(item)) if item.url.is_empty() => {
            item.url = attribute(element, b"href").unwrap_or_default();
        }
        ("enclosure", Some(item)) if item.enclosure.is_none() => {
            item.enclosure = enclosure_from(element, b"href", b"type", b"length");
        }
        ("alternate", None) if feed.site_url.is_empty() => {
            feed.site_url = attribute(element, b"href").unwrap_or_default();
        }
        _ => {}
    }
}
