//! The script-body scanner.
//!
//! A `<script>` body is raw text that ends at the first real `</script>`.
//! Searching for that substring is not enough: script source may legally
//! contain it inside a string literal or a comment. For JavaScript bodies
//! the scanner tracks string and comment syntax and only honours a close tag
//! found outside both. For any other content type only the close tag shape
//! is tracked.
//!
//! Known limitation: backslash escapes are not understood, so an escaped
//! quote inside a string literal ends the literal. Regular expression
//! literals are not recognised either.

use strum_macros::Display;

use super::cursor::{Cursor, is_whitespace};

/// Content type assumed for a `<script>` without a `type` attribute.
pub const DEFAULT_SCRIPT_TYPE: &str = "text/javascript";

const JAVASCRIPT_TYPES: [&str; 7] = [
    "",
    "module",
    "text/javascript",
    "application/javascript",
    "text/ecmascript",
    "application/ecmascript",
    "application/x-javascript",
];

/// Whether a `type` attribute value names JavaScript.
///
/// Comparison ignores ASCII case, surrounding whitespace and any parameters
/// after `;`.
#[must_use]
pub fn is_javascript_type(script_type: &str) -> bool {
    let essence = script_type.split(';').next().unwrap_or_default().trim();
    JAVASCRIPT_TYPES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(essence))
}

/// States of the script-body scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScriptState {
    /// Ordinary script text.
    Data,
    /// A `/` that may start a comment.
    Slash,
    /// Inside a `//` comment, until end of line.
    LineComment,
    /// Inside a `/* */` comment.
    BlockComment,
    /// A `*` inside a block comment that may end it.
    BlockCommentStar,
    /// Inside a `"` string literal.
    DoubleQuoted,
    /// Inside a `'` string literal.
    SingleQuoted,
    /// After a `<`, waiting for the `/` of a close tag.
    TagOpen,
    /// Reading the name of a close tag.
    EndTagName,
}

/// State machine locating the end of a script body.
pub struct ScriptScanner<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    state: ScriptState,
    javascript: bool,
    current_input_character: Option<char>,
    reconsume: bool,
    start: usize,
    tag_start: usize,
    tag_name: String,
}

impl<'c, 'a> ScriptScanner<'c, 'a> {
    /// Create a scanner for a body starting at the cursor, which must sit just
    /// past the opening `<script ...>` tag.
    pub fn new(cursor: &'c mut Cursor<'a>, script_type: &str) -> Self {
        let start = cursor.position();
        Self {
            cursor,
            state: ScriptState::Data,
            javascript: is_javascript_type(script_type),
            current_input_character: None,
            reconsume: false,
            start,
            tag_start: start,
            tag_name: String::new(),
        }
    }

    /// Scan to the real close tag.
    ///
    /// Returns the body, excluding the close tag, and leaves the cursor just
    /// past the close tag's `>`. Without a close tag the rest of the input is
    /// the body.
    #[must_use]
    pub fn scan(mut self) -> &'a str {
        loop {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.cursor.consume();
            }

            let Some(c) = self.current_input_character else {
                log::trace!(target: "lax.script", "script body runs to end of input");
                return self.cursor.slice(self.start..self.cursor.position());
            };

            let closed = match self.state {
                ScriptState::Data => self.handle_data_state(c),
                ScriptState::Slash => self.handle_slash_state(c),
                ScriptState::LineComment => self.handle_line_comment_state(c),
                ScriptState::BlockComment => self.handle_block_comment_state(c),
                ScriptState::BlockCommentStar => self.handle_block_comment_star_state(c),
                ScriptState::DoubleQuoted => self.handle_quoted_state(c, '"'),
                ScriptState::SingleQuoted => self.handle_quoted_state(c, '\''),
                ScriptState::TagOpen => self.handle_tag_open_state(c),
                ScriptState::EndTagName => self.handle_end_tag_name_state(c),
            };

            if closed {
                let body = self.cursor.slice(self.start..self.tag_start);
                log::trace!(target: "lax.script", "script body of {} bytes", body.len());
                return body;
            }
        }
    }

    const fn switch_to(&mut self, new_state: ScriptState) {
        self.state = new_state;
    }

    const fn reconsume_in(&mut self, new_state: ScriptState) {
        self.reconsume = true;
        self.state = new_state;
    }

    fn handle_data_state(&mut self, c: char) -> bool {
        match c {
            '<' => {
                self.tag_start = self.cursor.position() - c.len_utf8();
                self.switch_to(ScriptState::TagOpen);
            }
            '/' if self.javascript => self.switch_to(ScriptState::Slash),
            '"' if self.javascript => self.switch_to(ScriptState::DoubleQuoted),
            '\'' if self.javascript => self.switch_to(ScriptState::SingleQuoted),
            _ => {}
        }
        false
    }

    fn handle_slash_state(&mut self, c: char) -> bool {
        match c {
            '/' => self.switch_to(ScriptState::LineComment),
            '*' => self.switch_to(ScriptState::BlockComment),
            // A division operator: look at this character again as code.
            _ => self.reconsume_in(ScriptState::Data),
        }
        false
    }

    const fn handle_line_comment_state(&mut self, c: char) -> bool {
        if c == '\n' {
            self.switch_to(ScriptState::Data);
        }
        false
    }

    const fn handle_block_comment_state(&mut self, c: char) -> bool {
        if c == '*' {
            self.switch_to(ScriptState::BlockCommentStar);
        }
        false
    }

    const fn handle_block_comment_star_state(&mut self, c: char) -> bool {
        match c {
            '/' => self.switch_to(ScriptState::Data),
            '*' => {}
            _ => self.switch_to(ScriptState::BlockComment),
        }
        false
    }

    const fn handle_quoted_state(&mut self, c: char, quote: char) -> bool {
        if c == quote {
            self.switch_to(ScriptState::Data);
        }
        false
    }

    fn handle_tag_open_state(&mut self, c: char) -> bool {
        match c {
            '/' => {
                self.tag_name.clear();
                self.switch_to(ScriptState::EndTagName);
            }
            c if is_whitespace(c) => {}
            _ => self.reconsume_in(ScriptState::Data),
        }
        false
    }

    fn handle_end_tag_name_state(&mut self, c: char) -> bool {
        match c {
            '>' => {
                if self.tag_name.eq_ignore_ascii_case("script") {
                    return true;
                }
                self.switch_to(ScriptState::Data);
            }
            '<' => self.reconsume_in(ScriptState::Data),
            c if is_whitespace(c) => {}
            c => self.tag_name.push(c),
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_type_detection() {
        assert!(is_javascript_type(DEFAULT_SCRIPT_TYPE));
        assert!(is_javascript_type("Text/JavaScript"));
        assert!(is_javascript_type("text/javascript; charset=utf-8"));
        assert!(is_javascript_type("module"));
        assert!(is_javascript_type(""));
        assert!(!is_javascript_type("text/template"));
        assert!(!is_javascript_type("application/ld+json"));
    }

    #[test]
    fn test_block_comment_with_extra_stars() {
        let input = "/** '</script>' **/ x();</script>";
        let mut cursor = Cursor::new(input);
        let body = ScriptScanner::new(&mut cursor, DEFAULT_SCRIPT_TYPE).scan();
        assert_eq!(body, "/** '</script>' **/ x();");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_division_does_not_swallow_quote() {
        let input = "a = b /'</script>'.length;</script>";
        let mut cursor = Cursor::new(input);
        let body = ScriptScanner::new(&mut cursor, DEFAULT_SCRIPT_TYPE).scan();
        assert_eq!(body, "a = b /'</script>'.length;");
    }
}
