//! Integration tests for character reference escaping.

use lax_html::{escape_string, parse, unescape_string};

#[test]
fn test_escape_markup_characters() {
    assert_eq!(escape_string("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    assert_eq!(escape_string("plain"), "plain");

    let escaped = escape_string(r#"<a href="x">Tom & 'Jerry'</a>"#);
    assert!(!escaped.contains(['<', '>', '"', '\'']), "{escaped}");
}

#[test]
fn test_unescape_named() {
    assert_eq!(unescape_string("a &lt; b &amp;&amp; c &gt; d"), "a < b && c > d");
    assert_eq!(unescape_string("&copy; 2024 &mdash; all"), "\u{00A9} 2024 \u{2014} all");
    assert_eq!(unescape_string("&quot;hi&quot;"), "\"hi\"");
}

#[test]
fn test_unescape_full_named_table() {
    assert_eq!(unescape_string("I &hearts; HTML"), "I \u{2665} HTML");
    assert_eq!(unescape_string("&rArr; &Omega;"), "\u{21D2} \u{03A9}");
}

#[test]
fn test_unescape_numeric() {
    assert_eq!(unescape_string("&#169;"), "\u{00A9}");
    assert_eq!(unescape_string("&#xA9;"), "\u{00A9}");
    assert_eq!(unescape_string("&#65;&#66;"), "AB");
}

#[test]
fn test_unescape_c1_numeric_as_windows_1252() {
    assert_eq!(unescape_string("1&#150;2"), "1\u{2013}2");
    assert_eq!(unescape_string("&#x80;5"), "\u{20AC}5");
    assert_eq!(unescape_string("&#147;q&#148;"), "\u{201C}q\u{201D}");
}

#[test]
fn test_unknown_references_stay_verbatim() {
    assert_eq!(unescape_string("&bogus; and more"), "&bogus; and more");
    assert_eq!(unescape_string("AT&T"), "AT&T");
}

#[test]
fn test_round_trip() {
    let text = "if (a < b && c > \"d\") { e = 'f'; }";
    assert_eq!(unescape_string(&escape_string(text)), text);
}

#[test]
fn test_parser_does_not_decode() {
    let doc = parse("<p title=\"&amp;\">&lt;b&gt;</p>").expect("parse");
    let p = doc.elements_by_tag_name(doc.root(), "p")[0];
    assert_eq!(doc.as_element(p).and_then(|e| e.attr("title")), Some("&amp;"));
    assert_eq!(doc.text_content(p), "&lt;b&gt;");
    assert_eq!(unescape_string(&doc.text_content(p)), "<b>");
}
