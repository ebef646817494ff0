// crates/feed-parser/src/config.rs
//! Parser configuration section
//!
//! `ParserConfig` is meant to be embedded in a host application's config
//! file (e.g. under a `[feed_parser]` table) and validated on load.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of bytes peeked to classify a feed
pub const DEFAULT_PEEK_WINDOW: usize = 1024;

/// Smallest accepted peek window
pub const MIN_PEEK_WINDOW: usize = 16;

/// Largest accepted peek window (1 MiB)
pub const MAX_PEEK_WINDOW: usize = 1024 * 1024;

/// Tunables for [`FeedParser`](crate::FeedParser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Bytes read up front to sniff the format
    pub peek_window: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            peek_window: DEFAULT_PEEK_WINDOW,
        }
    }
}

impl ParserConfig {
    /// Creates a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the peek window size
    pub fn with_peek_window(mut self, peek_window: usize) -> Self {
        self.peek_window = peek_window;
        self
    }

    /// Validates the configuration
    ///
    /// Returns all validation errors found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !(MIN_PEEK_WINDOW..=MAX_PEEK_WINDOW).contains(&self.peek_window) {
            errors.push(ValidationError::with_value(
                "feed_parser.peek_window",
                format!("must be between {} and {}", MIN_PEEK_WINDOW, MAX_PEEK_WINDOW),
                self.peek_window,
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Parses a config section from TOML text and validates it
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, Vec<ValidationError>> {
        let config: ParserConfig = toml::from_str(text)
            .map_err(|e| vec![ValidationError::new("feed_parser", e.message().to_string())])?;
        config.validate()?;
        Ok(config)
    }
}

/// Validation error for a specific config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the field (e.g., "feed_parser.peek_window")
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a validation error with the invalid value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
