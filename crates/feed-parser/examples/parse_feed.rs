// crates/feed-parser/examples/parse_feed.rs
//! Sniffs and parses a feed from a file (or stdin), then resolves its URLs
//!
//! ```text
//! cargo run --example parse_feed -- feed.xml https://example.com/feed.xml
//! curl -s https://example.com/feed.json | cargo run --example parse_feed -- - https://example.com/
//! ```

use feedscope_feed_parser::{fix_urls, FeedError, FeedParser};
use std::fs::File;
use std::io::{self, Read};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "-".to_string());
    let base_url = args.next();

    let input: Box<dyn Read> = if path == "-" {
        Box::new(io::stdin().lock())
    } else {
        match File::open(&path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Cannot open {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        }
    };

    let parser = FeedParser::new();
    let sniffed = match parser.sniff(input) {
        Ok(sniffed) => sniffed,
        Err(FeedError::UnknownFormat) => {
            eprintln!("{} is not an RSS, RDF, Atom or JSON feed", path);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("=== {} feed ===", sniffed.format);

    let mut feed = match sniffed.parse() {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("Error parsing feed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(base_url) = base_url {
        if let Err(e) = fix_urls(&mut feed, &base_url) {
            eprintln!("Warning: {}", e);
        }
    }

    println!("Feed: {}", feed.title);
    println!("Site: {}", feed.site_url);

    if let Some(desc) = &feed.description {
        println!("Description: {}", desc);
    }

    println!("\nItems: {}", feed.item_count());
    println!("{}", "-".repeat(60));

    for (i, item) in feed.items.iter().enumerate() {
        println!("\n{}. {}", i + 1, item.title);
        println!("   Link: {}", item.url);

        if let Some(author) = &item.author {
            println!("   Author: {}", author);
        }

        if let Some(published) = &item.published {
            println!("   Published: {}", published.format("%Y-%m-%d"));
        }

        if let Some(enclosure) = &item.enclosure {
            println!("   Media: {}", enclosure.url);
            if let Some(size) = enclosure.length {
                println!("   Size: {:.1} MB", size as f64 / 1_000_000.0);
            }
        }
    }

    ExitCode::SUCCESS
}
