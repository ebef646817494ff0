// crates/feed-parser/src/lib.rs
//! Format-sniffing feed parser
//!
//! Reads a syndication feed from any byte stream without knowing its format
//! up front. Supported formats:
//! - RSS 0.9x / 2.0
//! - RSS 1.0 (RDF)
//! - Atom
//! - JSON Feed
//!
//! After parsing, [`fix_urls`] turns relative site and item links into
//! absolute URLs.
//!
//! # Example
//!
//! ```rust
//! use feedscope_feed_parser::{fix_urls, FeedParser};
//!
//! let rss = r#"<?xml version="1.0"?>
//! <rss version="2.0">
//!   <channel>
//!     <title>My Blog</title>
//!     <link>/blog/</link>
//!     <item>
//!       <title>Post 1</title>
//!       <link>posts/1</link>
//!     </item>
//!   </channel>
//! </rss>"#;
//!
//! let mut feed = FeedParser::new().parse(rss.as_bytes()).expect("Failed to parse feed");
//! fix_urls(&mut feed, "https://example.com/feed.xml").expect("Failed to resolve urls");
//! assert_eq!(feed.items[0].url, "https://example.com/blog/posts/1");
//! ```

mod config;
mod error;
mod feed;
pub mod formats;
mod parser;
mod urls;

pub use config::{ParserConfig, ValidationError, DEFAULT_PEEK_WINDOW};
pub use error::{FeedError, FeedResult};
pub use feed::{Enclosure, Feed, FeedItem};
pub use parser::{
    detect_format, parse, parse_and_fix, FeedFormat, FeedParser, RewoundStream, Sniffed,
};
pub use urls::fix_urls;
