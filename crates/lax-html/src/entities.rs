//! Character reference escaping.
//!
//! The parser never decodes references: text nodes and attribute values keep
//! the source bytes. These helpers are for callers that want decoded text or
//! need to write text back into markup.

use std::borrow::Cow;

/// What numeric references in `&#128;..=&#159;` decode to (windows-1252).
const C1_REPLACEMENTS: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Escape the characters that are significant in markup (`<`, `>`, `&`,
/// `'` and `"`). Everything else is copied unchanged.
#[must_use]
pub fn escape_string(text: &str) -> String {
    html_escape::encode_safe(text).into_owned()
}

/// Decode named and numeric character references.
///
/// Named references cover the full HTML5 table. Numeric references in the
/// C1 range are read as windows-1252, as browsers do. Anything unrecognized
/// is left verbatim.
#[must_use]
pub fn unescape_string(text: &str) -> String {
    html_escape::decode_html_entities(&remap_c1_references(text)).into_owned()
}

/// Replace numeric references in the C1 range with the characters they
/// stand for, leaving every other reference for the decoder.
fn remap_c1_references(text: &str) -> Cow<'_, str> {
    if !text.contains("&#") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find("&#") {
        out.push_str(&rest[..at]);
        let reference = &rest[at + 2..];
        if let Some((replacement, len)) = c1_reference(reference) {
            out.push(replacement);
            rest = &reference[len..];
        } else {
            out.push_str("&#");
            rest = reference;
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Parse the digits after `&#`. Returns the replacement and how many bytes
/// were used when the code point is in the C1 range.
fn c1_reference(reference: &str) -> Option<(char, usize)> {
    let (radix, prefix_len) = match reference.as_bytes().first() {
        Some(b'x' | b'X') => (16, 1),
        _ => (10, 0),
    };
    let digits = &reference[prefix_len..];
    let digits_len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let code = u32::from_str_radix(&digits[..digits_len], radix).ok()?;
    let index = usize::try_from(code.checked_sub(0x80)?).ok()?;
    let replacement = *C1_REPLACEMENTS.get(index)?;

    let semicolon = usize::from(digits[digits_len..].starts_with(';'));
    Some((replacement, prefix_len + digits_len + semicolon))
}
