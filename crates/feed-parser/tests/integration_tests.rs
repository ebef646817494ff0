// crates/feed-parser/tests/integration_tests.rs
//! Integration tests for sniffing, dispatch and URL resolution

use feedscope_feed_parser::{
    fix_urls, parse, parse_and_fix, FeedError, FeedFormat, FeedParser, ParserConfig,
};
use std::io::{self, Read};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const MINIMAL_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>RSS</title>
    <link>http://example.com/</link>
    <item><title>One</title><link>http://example.com/1</link></item>
  </channel>
</rss>"#;

const MINIMAL_RDF: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns="http://purl.org/rss/1.0/">
  <channel rdf:about="http://example.com/">
    <title>RDF</title>
    <link>http://example.com/</link>
  </channel>
  <item rdf:about="http://example.com/1"><title>One</title><link>http://example.com/1</link></item>
</rdf:RDF>"#;

const MINIMAL_ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom</title>
  <link href="http://example.com/"/>
  <entry><title>One</title><id>1</id><link href="http://example.com/1"/></entry>
</feed>"#;

const MINIMAL_JSON: &str = r#"{
  "version": "https://jsonfeed.org/version/1.1",
  "title": "JSON",
  "home_page_url": "http://example.com/",
  "items": [{"id": "1", "title": "One", "url": "http://example.com/1"}]
}"#;

#[test]
fn test_each_format_is_sniffed_and_parsed() {
    init_logging();
    let cases = [
        (MINIMAL_RSS, FeedFormat::Rss, "RSS"),
        (MINIMAL_RDF, FeedFormat::Rdf, "RDF"),
        (MINIMAL_ATOM, FeedFormat::Atom, "Atom"),
        (MINIMAL_JSON, FeedFormat::Json, "JSON"),
    ];

    for (doc, expected_format, expected_title) in cases {
        let sniffed = FeedParser::new()
            .sniff(doc.as_bytes())
            .expect("Should sniff");
        assert_eq!(sniffed.format, expected_format);

        let feed = sniffed.parse().expect("Should parse");
        assert_eq!(feed.title, expected_title);
        assert_eq!(feed.site_url, "http://example.com/");
        assert_eq!(feed.item_count(), 1);
        assert_eq!(feed.items[0].title, "One");
        assert_eq!(feed.items[0].url, "http://example.com/1");
    }
}

#[test]
fn test_unknown_inputs_return_sentinel() {
    init_logging();
    let inputs: [&[u8]; 6] = [
        b"",
        b"   \n\t  ",
        b"just some plain text",
        b"<foo><bar/></foo>",
        b"<!DOCTYPE html><html><head><title>Page</title></head></html>",
        b"[\"not\", \"an\", \"object\"]",
    ];

    for input in inputs {
        let err = parse(input).expect_err("Should not classify");
        assert!(
            matches!(err, FeedError::UnknownFormat),
            "expected unknown format for {:?}, got {:?}",
            String::from_utf8_lossy(input),
            err
        );
    }
}

#[test]
fn test_delegated_parse_errors_pass_through() {
    init_logging();
    let broken_xml = "<rss><channel><title>Broken</channel></rss>";
    let err = parse(broken_xml.as_bytes()).expect_err("Should fail");
    assert!(matches!(err, FeedError::XmlParse(_)), "got {:?}", err);

    let broken_json = "{\"title\": \"unterminated";
    let err = parse(broken_json.as_bytes()).expect_err("Should fail");
    assert!(matches!(err, FeedError::Json(_)), "got {:?}", err);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
    }
}

#[test]
fn test_read_error_is_reported_with_cause() {
    let err = parse(FailingReader).expect_err("Should fail");
    match err {
        FeedError::Read(source) => assert_eq!(source.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("expected read error, got {:?}", other),
    }
}

/// Serves `data` once, then fails every further read
struct FailsAfterData<'a> {
    data: Option<&'a [u8]>,
}

impl Read for FailsAfterData<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.take() {
            Some(data) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(n)
            }
            None => Err(io::Error::new(io::ErrorKind::TimedOut, "stalled")),
        }
    }
}

#[test]
fn test_error_after_partial_peek_surfaces_from_parser() {
    let reader = FailsAfterData {
        data: Some(b"<rss version=\"2.0\"><channel><title>Cut"),
    };
    let err = parse(reader).expect_err("Should fail");
    assert!(!err.is_unknown_format());
    assert!(!matches!(err, FeedError::Read(_)));
}

#[test]
fn test_root_element_within_window_after_comments() {
    let doc = format!(
        "<?xml version=\"1.0\"?>\n<!-- {} -->\n{}",
        "x".repeat(500),
        MINIMAL_RSS.trim_start_matches("<?xml version=\"1.0\"?>")
    );
    let feed = parse(doc.as_bytes()).expect("Should find root inside window");
    assert_eq!(feed.title, "RSS");
}

#[test]
fn test_root_element_beyond_window() {
    let doc = format!(
        "<!-- {} -->\n{}",
        "x".repeat(2000),
        MINIMAL_ATOM.trim_start_matches("<?xml version=\"1.0\" encoding=\"utf-8\"?>")
    );

    let err = parse(doc.as_bytes()).expect_err("Default window should miss the root");
    assert!(err.is_unknown_format());

    let parser = FeedParser::with_config(ParserConfig::new().with_peek_window(4096));
    let feed = parser.parse(doc.as_bytes()).expect("Larger window should find it");
    assert_eq!(feed.title, "Atom");
}

#[test]
fn test_leading_whitespace_beyond_window() {
    let doc = format!("{}{}", " ".repeat(1500), MINIMAL_JSON);
    let err = parse(doc.as_bytes()).expect_err("Window holds only whitespace");
    assert!(err.is_unknown_format());
}

#[test]
fn test_fix_urls_after_parse() {
    let rss = r#"<rss version="2.0">
  <channel>
    <title>Relative</title>
    <link>archive/</link>
    <item><title>A</title><link>post/1</link></item>
    <item><title>B</title><link>https://other.example/x</link></item>
  </channel>
</rss>"#;

    let mut feed = parse(rss.as_bytes()).expect("Should parse");
    fix_urls(&mut feed, "http://example.com/blog/").expect("Should resolve");

    assert_eq!(feed.site_url, "http://example.com/blog/archive/");
    assert_eq!(feed.items[0].url, "http://example.com/blog/archive/post/1");
    assert_eq!(feed.items[1].url, "https://other.example/x");
}

#[test]
fn test_parse_and_fix_fills_missing_guids() {
    let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Guids</title>
  <link href="/"/>
  <entry><title>With id</title><id>tag:example.com,2024:1</id><link href="/1"/></entry>
  <entry><title>Without id</title><link href="/2"/></entry>
</feed>"#;

    let feed = parse_and_fix(atom.as_bytes(), "https://example.com/atom.xml")
        .expect("Should parse and fix");
    assert_eq!(feed.items[0].guid, "tag:example.com,2024:1");
    assert_eq!(feed.items[1].guid, "https://example.com/2");
}

#[test]
fn test_parse_and_fix_reports_bad_base() {
    let err = parse_and_fix(MINIMAL_RSS.as_bytes(), "::nope").expect_err("Should fail");
    assert!(matches!(err, FeedError::InvalidBaseUrl(ref s) if s == "::nope"));
}

#[test]
fn test_prefixed_atom_sniffs_and_parses() {
    init_logging();
    let atom = r#"<?xml version="1.0"?>
<atom:feed xmlns:atom="http://www.w3.org/2005/Atom">
  <atom:title>Prefixed</atom:title>
  <atom:entry><atom:title>One</atom:title><atom:link href="/1"/></atom:entry>
</atom:feed>"#;

    let sniffed = FeedParser::new()
        .sniff(atom.as_bytes())
        .expect("Should sniff");
    assert_eq!(sniffed.format, FeedFormat::Atom);

    let feed = sniffed.parse().expect("Should parse");
    assert_eq!(feed.title, "Prefixed");
    assert_eq!(feed.item_count(), 1);
    assert_eq!(feed.items[0].title, "One");
    assert_eq!(feed.items[0].url, "/1");
}
