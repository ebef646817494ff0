// crates/feed-parser/src/error.rs
//! Error types for feed parsing

use thiserror::Error;

/// Result type for feed parser operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while sniffing, parsing or fixing up a feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// The peek read failed before any byte was obtained
    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// The input does not look like any supported feed format.
    ///
    /// Never carries the offending bytes, so callers can branch on the
    /// variant itself.
    #[error("unknown feed format")]
    UnknownFormat,

    /// XML parsing error raised by one of the XML format parsers
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// JSON parsing error raised by the JSON Feed parser
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The externally supplied base URL could not be parsed
    #[error("failed to parse base url: {0:?}")]
    InvalidBaseUrl(String),

    /// The feed's own site URL could not be resolved
    #[error("failed to parse feed url: {0:?}")]
    InvalidSiteUrl(String),

    /// An item URL could not be resolved
    #[error("failed to parse item url: {0:?}")]
    InvalidItemUrl(String),
}

impl FeedError {
    /// Returns true if sniffing could not classify the input
    pub fn is_unknown_format(&self) -> bool {
        matches!(self, FeedError::UnknownFormat)
    }

    /// Returns true if the error came from resolving one of the feed's URLs
    pub fn is_url_error(&self) -> bool {
        matches!(
            self,
            FeedError::InvalidBaseUrl(_) | FeedError::InvalidSiteUrl(_) | FeedError::InvalidItemUrl(_)
        )
    }
}

impl From<quick_xml::Error> for FeedError {
    fn from(err: quick_xml::Error) -> Self {
        FeedError::XmlParse(err.to_string())
    }
}
