// crates/feed-parser/src/formats/rss.rs
//! RSS 0.9x / 2.0 parser

use super::{
    element_key, enclosure_from, non_empty, parse_rfc2822, parse_rfc3339, push_text, text_of,
    xml_reader,
};
use crate::error::FeedResult;
use crate::feed::{Feed, FeedItem};
use quick_xml::events::Event;
use std::io::Read;

/// `atom:link` inside a channel must not be read as the channel `link`
const KEPT_PREFIXES: &[&[u8]] = &[
    b"dc", b"content", b"itunes", b"media", b"slash", b"wfw", b"sy", b"thr", b"georss",
    b"feedburner", b"googleplay", b"podcast", b"atom",
];

/// Parses an RSS document
pub fn parse<R: Read>(reader: R) -> FeedResult<Feed> {
    let mut reader = xml_reader(reader);

    let mut feed = Feed::default();
    let mut current_item: Option<FeedItem> = None;
    let mut text_buffer = String::new();
    // Depth inside <image>/<textInput>, whose title/link describe the image
    let mut nested_depth = 0usize;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                text_buffer.clear();
                match element_key(e.name(), KEPT_PREFIXES) {
                    b"item" => current_item = Some(FeedItem::default()),
                    b"image" | b"textInput" | b"textinput" => nested_depth += 1,
                    b"enclosure" => {
                        if let Some(item) = current_item.as_mut() {
                            item.enclosure = enclosure_from(&e, b"url", b"type", b"length");
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                // Self-closing tags like <enclosure ... />
                if element_key(e.name(), KEPT_PREFIXES) == b"enclosure" {
                    if let Some(item) = current_item.as_mut() {
                        item.enclosure = enclosure_from(&e, b"url", b"type", b"length");
                    }
                }
            }
            Event::Text(e) => push_text(&mut text_buffer, &text_of(&e)),
            Event::CData(e) => push_text(&mut text_buffer, &String::from_utf8_lossy(&e)),
            Event::End(e) => {
                let value = text_buffer.trim().to_string();
                text_buffer.clear();

                let name = element_key(e.name(), KEPT_PREFIXES);

                if matches!(name, b"image" | b"textInput" | b"textinput") {
                    nested_depth = nested_depth.saturating_sub(1);
                } else if nested_depth > 0 {
                    // title/link/url of the image itself
                } else if name == b"item" {
                    if let Some(item) = current_item.take() {
                        feed.add_item(item);
                    }
                } else if let Some(item) = current_item.as_mut() {
                    apply_item_field(item, name, value);
                } else {
                    apply_channel_field(&mut feed, name, value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(feed)
}

fn apply_item_field(item: &mut FeedItem, name: &[u8], value: String) {
    match name {
        b"title" => item.title = value,
        b"link" => item.url = value,
        b"guid" => item.guid = value,
        b"description" if item.content.is_none() => item.content = non_empty(value),
        b"content:encoded" if !value.is_empty() => item.content = Some(value),
        b"author" | b"dc:creator" if item.author.is_none() => item.author = non_empty(value),
        b"pubDate" => item.published = parse_rfc2822(&value),
        b"dc:date" if item.published.is_none() => item.published = parse_rfc3339(&value),
        _ => {}
    }
}

fn apply_channel_field(feed: &mut Feed, name: &[u8], value: String) {
    match name {
        b"title" if feed.title.is_empty() => feed.title = value,
        b"link" if feed.site_url.is_empty() => feed.site_url = value,
        b"description" => feed.description = non_empty(value),
        b"language" => feed.language = non_empty(value),
        b"lastBuildDate" => feed.updated = parse_rfc2822(&value),
        _ => {}
    }
}
