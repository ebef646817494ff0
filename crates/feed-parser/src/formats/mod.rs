// crates/feed-parser/src/formats/mod.rs
//! Format-specific parsers
//!
//! Each submodule exposes `parse<R: Read>(reader: R) -> FeedResult<Feed>`.
//! They are called by [`FeedFormat::parse`](crate::FeedFormat::parse) after
//! sniffing but can also be used directly when the format is known.

pub mod atom;
pub mod json;
pub mod rdf;
pub mod rss;

use crate::feed::Enclosure;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, BytesText};
use quick_xml::name::QName;
use quick_xml::Reader;
use std::io::{BufReader, Read};

/// Prefixes of extension modules (Dublin Core, content, iTunes, ...)
///
/// Their elements keep the prefix so `dc:title` never shadows `title`.
pub(crate) const MODULE_PREFIXES: &[&[u8]] = &[
    b"dc", b"content", b"itunes", b"media", b"slash", b"wfw", b"sy", b"thr", b"georss",
    b"feedburner", b"googleplay", b"podcast",
];

/// Name an element is matched on.
///
/// Prefixes listed in `kept` stay qualified; any other prefix (`atom:`,
/// `rss:`, `rdf:`) is dropped so prefixed documents parse like default
/// namespace ones.
pub(crate) fn element_key<'a>(name: QName<'a>, kept: &[&[u8]]) -> &'a [u8] {
    let raw = name.0;
    match raw.iter().position(|&b| b == b':') {
        Some(colon) if !kept.iter().any(|prefix| *prefix == &raw[..colon]) => &raw[colon + 1..],
        _ => raw,
    }
}

/// Builds a streaming XML reader with the settings all XML parsers share
pub(crate) fn xml_reader<R: Read>(reader: R) -> Reader<BufReader<R>> {
    let mut reader = Reader::from_reader(BufReader::new(reader));
    reader.config_mut().trim_text(true);
    reader
}

/// Returns the unescaped value of attribute `key`, if present
pub(crate) fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}

/// Builds an enclosure from `url`/`type`/`length` style attributes
pub(crate) fn enclosure_from(
    element: &BytesStart<'_>,
    url_key: &[u8],
    type_key: &[u8],
    length_key: &[u8],
) -> Option<Enclosure> {
    let url = attribute(element, url_key)?;
    Some(Enclosure {
        url,
        mime_type: attribute(element, type_key),
        length: attribute(element, length_key).and_then(|v| v.trim().parse().ok()),
    })
}

/// Appends a text or CDATA chunk to the element text collected so far
pub(crate) fn push_text(buffer: &mut String, chunk: &str) {
    if chunk.is_empty() {
        return;
    }
    if !buffer.is_empty() && !buffer.ends_with(char::is_whitespace) {
        buffer.push(' ');
    }
    buffer.push_str(chunk);
}

/// Unescapes a text event, keeping the raw text if it holds unknown entities
pub(crate) fn text_of(text: &BytesText<'_>) -> String {
    match text.unescape() {
        Ok(value) => value.into_owned(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parses an RFC 2822 date (RSS `pubDate`), falling back to RFC 3339
pub(crate) fn parse_rfc2822(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| parse_rfc3339(value))
}

/// Parses an RFC 3339 date (Atom, JSON Feed, `dc:date`)
pub(crate) fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
