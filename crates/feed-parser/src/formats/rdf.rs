// crates/feed-parser/src/formats/rdf.rs
//! RSS 1.0 (RDF) parser
//!
//! Unlike RSS 2.0, items are siblings of `<channel>` under `<rdf:RDF>` and
//! dates use Dublin Core (`dc:date`, RFC 3339).

use super::{
    attribute, element_key, non_empty, parse_rfc3339, push_text, text_of, xml_reader,
    MODULE_PREFIXES,
};
use crate::error::FeedResult;
use crate::feed::{Feed, FeedItem};
use quick_xml::events::Event;
use std::io::Read;

/// Parses an RDF Site Summary document
pub fn parse<R: Read>(reader: R) -> FeedResult<Feed> {
    let mut reader = xml_reader(reader);

    let mut feed = Feed::default();
    let mut current_item: Option<FeedItem> = None;
    let mut text_buffer = String::new();
    let mut in_channel = false;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                text_buffer.clear();
                match element_key(e.name(), MODULE_PREFIXES) {
                    b"channel" => in_channel = true,
                    b"item" => {
                        current_item = Some(FeedItem {
                            guid: attribute(&e, b"rdf:about").unwrap_or_default(),
                            ..FeedItem::default()
                        });
                    }
                    _ => {}
                }
            }
            Event::Text(e) => push_text(&mut text_buffer, &text_of(&e)),
            Event::CData(e) => push_text(&mut text_buffer, &String::from_utf8_lossy(&e)),
            Event::End(e) => {
                let value = text_buffer.trim().to_string();
                text_buffer.clear();

                let name = element_key(e.name(), MODULE_PREFIXES);

                if name == b"item" {
                    if let Some(mut item) = current_item.take() {
                        if item.guid.is_empty() {
                            item.guid = item.url.clone();
                        }
                        feed.add_item(item);
                    }
                } else if let Some(item) = current_item.as_mut() {
                    match name {
                        b"title" => item.title = value,
                        b"link" => item.url = value,
                        b"description" if item.content.is_none() => {
                            item.content = non_empty(value)
                        }
                        b"content:encoded" if !value.is_empty() => item.content = Some(value),
                        b"dc:creator" => item.author = non_empty(value),
                        b"dc:date" => item.published = parse_rfc3339(&value),
                        _ => {}
                    }
                } else if name == b"channel" {
                    in_channel = false;
                } else if in_channel {
                    match name {
                        b"title" => feed.title = value,
                        b"link" => feed.site_url = value,
                        b"description" => feed.description = non_empty(value),
                        b"dc:language" => feed.language = non_empty(value),
                        b"dc:date" => feed.updated = parse_rfc3339(&value),
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
