//! Position tracking over the input text.
//!
//! The cursor walks the input one code point at a time. Positions are byte
//! offsets, always on a `char` boundary, so any two positions taken from the
//! cursor delimit a valid substring of the input.

use std::ops::Range;

/// Whitespace as far as tag and text scanning are concerned.
///
/// Tab, line feed, form feed, carriage return and space.
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// True when every character of `text` is whitespace (including when empty).
#[must_use]
pub fn is_continuous_whitespace(text: &str) -> bool {
    text.chars().all(is_whitespace)
}

/// A forward-only read position into a borrowed input string.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// The full input text.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// True once every character has been consumed.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The next character, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Consume the next character and advance past it.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume a run of whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consume everything up to (not including) the next `<` and return it.
    ///
    /// At end of input the whole remainder is returned.
    pub fn read_until_tag(&mut self) -> &'a str {
        let start = self.pos;
        let rest = &self.input[start..];
        self.pos += rest.find('<').unwrap_or(rest.len());
        &self.input[start..self.pos]
    }

    /// The input between two positions previously taken from this cursor.
    #[must_use]
    pub fn slice(&self, span: Range<usize>) -> &'a str {
        &self.input[span]
    }

    /// 1-based line number of the current position.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line_at(self.pos)
    }

    /// 1-based line number of byte offset `pos`: one plus the number of line
    /// feeds before it.
    #[must_use]
    pub fn line_at(&self, pos: usize) -> usize {
        let end = pos.min(self.input.len());
        1 + self.input.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_until_tag_stops_before_open_bracket() {
        let mut cursor = Cursor::new("      this is a test of reading until the tag <area/>");
        assert_eq!(
            cursor.read_until_tag(),
            "      this is a test of reading until the tag "
        );
        assert_eq!(cursor.peek(), Some('<'));
    }

    #[test]
    fn test_read_until_tag_without_tag_reads_everything() {
        let mut cursor = Cursor::new("there is no tag.");
        assert_eq!(cursor.read_until_tag(), "there is no tag.");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_until_tag_at_tag_reads_nothing() {
        let mut cursor = Cursor::new("<a href='things.html'>things</a>");
        assert_eq!(cursor.read_until_tag(), "");
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new(" \t\r\n x");
        cursor.skip_whitespace();
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.consume(), Some('x'));
        cursor.skip_whitespace();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_consume_multibyte() {
        let mut cursor = Cursor::new("é<");
        assert_eq!(cursor.consume(), Some('é'));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.consume(), Some('<'));
        assert_eq!(cursor.consume(), None);
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let cursor = Cursor::new("a\nb\nc");
        assert_eq!(cursor.line_at(0), 1);
        assert_eq!(cursor.line_at(2), 2);
        assert_eq!(cursor.line_at(4), 3);
        assert_eq!(cursor.line_at(100), 3);
    }

    #[test]
    fn test_continuous_whitespace() {
        assert!(is_continuous_whitespace(""));
        assert!(is_continuous_whitespace("\n  \t"));
        assert!(!is_continuous_whitespace("\n x "));
    }
}
