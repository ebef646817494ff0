// crates/feed-parser/src/parser.rs
//! Format sniffing and dispatch
//!
//! A feed arrives as a plain byte stream of unknown format. The parser peeks
//! a bounded prefix, classifies it, then hands the format parser a stream
//! made of the peeked prefix followed by the unread remainder, so the
//! downstream parser sees every original byte exactly once. No seeking is
//! required from the source.

use crate::config::ParserConfig;
use crate::error::{FeedError, FeedResult};
use crate::feed::Feed;
use crate::formats::{atom, json, rdf, rss};
use crate::urls::fix_urls;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Cursor, Read};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
// Read size used while filling the peek window
const PEEK_CHUNK: usize = 8 * 1024;

/// Wire format of a feed, as detected by sniffing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// RSS 0.9x / 2.0, root element `rss`
    Rss,
    /// RSS 1.0, root element `rdf:RDF`
    Rdf,
    /// Atom, root element `feed`
    Atom,
    /// JSON Feed, a top-level object
    Json,
}

impl FeedFormat {
    /// All supported formats
    pub const ALL: [FeedFormat; 4] = [
        FeedFormat::Rss,
        FeedFormat::Rdf,
        FeedFormat::Atom,
        FeedFormat::Json,
    ];

    /// Returns the short tag for this format
    pub fn name(self) -> &'static str {
        match self {
            FeedFormat::Rss => "rss",
            FeedFormat::Rdf => "rdf",
            FeedFormat::Atom => "atom",
            FeedFormat::Json => "json",
        }
    }

    /// Maps an XML element local name to the format it identifies
    pub fn from_element_name(local_name: &[u8]) -> Option<Self> {
        match local_name {
            b"rss" => Some(FeedFormat::Rss),
            b"RDF" => Some(FeedFormat::Rdf),
            b"feed" => Some(FeedFormat::Atom),
            _ => None,
        }
    }

    /// Runs this format's parser over `reader`
    ///
    /// Errors from the format parser are returned as-is.
    pub fn parse<R: Read>(self, reader: R) -> FeedResult<Feed> {
        match self {
            FeedFormat::Rss => rss::parse(reader),
            FeedFormat::Rdf => rdf::parse(reader),
            FeedFormat::Atom => atom::parse(reader),
            FeedFormat::Json => json::parse(reader),
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stream handed to a format parser: peeked prefix, then the live remainder
pub type RewoundStream<R> = io::Chain<Cursor<Vec<u8>>, R>;

/// Result of sniffing: the detected format plus the rewound stream
#[derive(Debug)]
pub struct Sniffed<R> {
    /// Detected format
    pub format: FeedFormat,
    /// Full original input, starting from its first byte
    pub stream: RewoundStream<R>,
}

impl<R: Read> Sniffed<R> {
    /// Dispatches the rewound stream to the detected format's parser
    pub fn parse(self) -> FeedResult<Feed> {
        self.format.parse(self.stream)
    }
}

/// Feed parser that detects the format before parsing
#[derive(Debug, Clone, Default)]
pub struct FeedParser {
    config: ParserConfig,
}

impl FeedParser {
    /// Creates a parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with a custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a feed of any supported format from a byte stream
    pub fn parse<R: Read>(&self, reader: R) -> FeedResult<Feed> {
        self.sniff(reader)?.parse()
    }

    /// Parses a feed from an in-memory string
    pub fn parse_str(&self, content: &str) -> FeedResult<Feed> {
        self.parse(content.as_bytes())
    }

    /// Parses a feed and makes its URLs absolute against `base_url`
    ///
    /// Items without a guid get their resolved URL as guid.
    pub fn parse_and_fix<R: Read>(&self, reader: R, base_url: &str) -> FeedResult<Feed> {
        let mut feed = self.parse(reader)?;
        fix_urls(&mut feed, base_url)?;

        for item in feed.items.iter_mut().filter(|item| item.guid.is_empty()) {
            item.guid = item.url.clone();
        }

        Ok(feed)
    }

    /// Peeks the configured window, classifies it and rewinds the stream
    ///
    /// Fails with [`FeedError::Read`] if nothing could be read and with
    /// [`FeedError::UnknownFormat`] if the prefix matches no format.
    pub fn sniff<R: Read>(&self, mut reader: R) -> FeedResult<Sniffed<R>> {
        let prefix = peek(&mut reader, self.config.peek_window).map_err(FeedError::Read)?;

        let format = match detect_format(&prefix) {
            Some(format) => format,
            None => {
                log::debug!("no feed format found in {} peeked bytes", prefix.len());
                return Err(FeedError::UnknownFormat);
            }
        };
        log::debug!("sniffed {} feed from {} bytes", format, prefix.len());

        Ok(Sniffed {
            format,
            stream: Cursor::new(prefix).chain(reader),
        })
    }
}

/// Parses a feed with the default configuration
pub fn parse<R: Read>(reader: R) -> FeedResult<Feed> {
    FeedParser::new().parse(reader)
}

/// Parses a feed with the default configuration and resolves its URLs
pub fn parse_and_fix<R: Read>(reader: R, base_url: &str) -> FeedResult<Feed> {
    FeedParser::new().parse_and_fix(reader, base_url)
}

/// Classifies a feed prefix without doing any I/O
///
/// Leading whitespace (and a UTF-8 BOM) is skipped. A `<` starts an XML scan
/// for the first `rss`, `RDF` or `feed` element; a `{` means JSON.
pub fn detect_format(prefix: &[u8]) -> Option<FeedFormat> {
    let prefix = prefix.strip_prefix(UTF8_BOM).unwrap_or(prefix);
    let trimmed = prefix.trim_ascii_start();

    match trimmed.first() {
        Some(b'<') => detect_xml_root(trimmed),
        Some(b'{') => Some(FeedFormat::Json),
        _ => None,
    }
}

/// Scans element tokens of a possibly truncated XML fragment.
///
/// The fragment is cut at an arbitrary byte, so tokenizer errors are
/// expected and only end the scan.
fn detect_xml_root(fragment: &[u8]) -> Option<FeedFormat> {
    let mut reader = Reader::from_reader(fragment);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if let Some(format) = FeedFormat::from_element_name(e.local_name().as_ref()) {
                    return Some(format);
                }
            }
            Ok(Event::Eof) => return None,
            Err(e) => {
                log::trace!(
                    "sniff stopped at byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                return None;
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Reads up to `window` bytes, tolerating short reads.
///
/// The prefix grows with what the source actually yields, so a large window
/// costs nothing on a short document. An error before the first byte is
/// returned; an error after that ends the peek early and is left for the
/// downstream parser to hit again.
fn peek<R: Read>(reader: &mut R, window: usize) -> io::Result<Vec<u8>> {
    let limit = u64::try_from(window).unwrap_or(u64::MAX);
    let mut limited = reader.by_ref().take(limit);
    let mut prefix = Vec::with_capacity(window.min(PEEK_CHUNK));
    let mut chunk = [0u8; PEEK_CHUNK];

    loop {
        match limited.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => prefix.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if prefix.is_empty() => return Err(e),
            Err(e) => {
                log::debug!("peek ended after {} bytes: {}", prefix.len(), e);
                break;
            }
        }
    }

    Ok(prefix)
}
