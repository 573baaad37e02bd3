//! The tag tokenizer.
//!
//! Consumes exactly one `<...>` construct from a [`Cursor`] and turns it into
//! a [`Token`]. Any text before the `<` is skipped; callers normally read it
//! first with [`Cursor::read_until_tag`].
//!
//! Each state has its own handler, and the handlers only ever move between
//! states through `switch_to` and `reconsume_in`.

use strum_macros::Display;

use lax_dom::AttributesMap;

use super::cursor::{Cursor, is_whitespace};
use super::token::{Token, is_known_void_element};
use crate::error::ParseError;

/// States of the tag tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TagState {
    /// Skipping input until the opening `<`.
    BeforeTag,
    /// Just after `<`: decides between declaration, close tag and name.
    TagOpen,
    /// Just after `<!`: a `-` may start a comment.
    MarkupDeclarationOpen,
    /// Just after `<!-`: only a second `-` is acceptable.
    CommentStartDash,
    /// Accumulating the tag name.
    TagName,
    /// Between attributes.
    BeforeAttributeName,
    /// Accumulating an attribute name.
    AttributeName,
    /// Just after `=`: the next character decides the quoting.
    BeforeAttributeValue,
    /// Inside a `"`-quoted attribute value.
    AttributeValueDoubleQuoted,
    /// Inside a `'`-quoted attribute value.
    AttributeValueSingleQuoted,
    /// Inside an unquoted attribute value.
    AttributeValueUnquoted,
    /// After a `/` in tag position, waiting for the `>`.
    SelfClosingTag,
    /// Inside a comment body.
    Comment,
    /// One `-` seen inside a comment.
    CommentEndDash,
    /// `--` seen inside a comment; a `>` ends it.
    CommentEnd,
}

/// What the construct after `<` turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
    Declaration,
}

/// Outcome of one state handler: `Some` once a token is complete.
type Step = Option<Token>;

/// State machine reading a single tag, comment or declaration.
pub struct TagTokenizer<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    state: TagState,
    current_input_character: Option<char>,
    // When true, the next iteration of the main loop will not consume a new
    // character. "Reconsume in the X state" sets this flag.
    reconsume: bool,

    kind: TagKind,
    self_closing: bool,
    tag_name: String,
    attributes: AttributesMap,
    attribute_name: String,
    attribute_value: String,
    comment: String,
}

impl<'c, 'a> TagTokenizer<'c, 'a> {
    /// Create a tokenizer reading from `cursor`.
    pub fn new(cursor: &'c mut Cursor<'a>) -> Self {
        Self {
            cursor,
            state: TagState::BeforeTag,
            current_input_character: None,
            reconsume: false,
            kind: TagKind::Open,
            self_closing: false,
            tag_name: String::new(),
            attributes: AttributesMap::new(),
            attribute_name: String::new(),
            attribute_value: String::new(),
            comment: String::new(),
        }
    }

    /// Read one construct.
    ///
    /// Returns `Ok(None)` if the input ends before any `<`. On success the
    /// cursor sits just past the closing `>`; on error it sits just past the
    /// offending character.
    ///
    /// # Errors
    ///
    /// [`ParseError::EmptyTag`] for `<>`, `< >`, `</>` and a `<` at the end
    /// of input; [`ParseError::AlmostComment`] for `<!-` not followed by `-`.
    pub fn run(mut self) -> Result<Option<Token>, ParseError> {
        loop {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.cursor.consume();
            }

            let Some(c) = self.current_input_character else {
                return self.finish_at_eof();
            };

            let emitted = match self.state {
                TagState::BeforeTag => self.handle_before_tag_state(c),
                TagState::TagOpen => self.handle_tag_open_state(c)?,
                TagState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(c),
                TagState::CommentStartDash => self.handle_comment_start_dash_state(c)?,
                TagState::TagName => self.handle_tag_name_state(c),
                TagState::BeforeAttributeName => self.handle_before_attribute_name_state(c),
                TagState::AttributeName => self.handle_attribute_name_state(c),
                TagState::BeforeAttributeValue => self.handle_before_attribute_value_state(c),
                TagState::AttributeValueDoubleQuoted => self.handle_attribute_value_quoted_state(c, '"'),
                TagState::AttributeValueSingleQuoted => self.handle_attribute_value_quoted_state(c, '\''),
                TagState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(c),
                TagState::SelfClosingTag => self.handle_self_closing_tag_state(c),
                TagState::Comment => self.handle_comment_state(c),
                TagState::CommentEndDash => self.handle_comment_end_dash_state(c),
                TagState::CommentEnd => self.handle_comment_end_state(c),
            };

            if let Some(token) = emitted {
                log::trace!(target: "lax.tokenizer", "emit token: {token}");
                return Ok(Some(token));
            }
        }
    }

    // =========================================================================
    // State transition helpers
    // =========================================================================

    /// Move to `new_state`; the next character is consumed on the next
    /// iteration of the main loop.
    const fn switch_to(&mut self, new_state: TagState) {
        self.state = new_state;
    }

    /// Move to `new_state` and process the current character again there.
    const fn reconsume_in(&mut self, new_state: TagState) {
        self.reconsume = true;
        self.state = new_state;
    }

    // =========================================================================
    // State handlers
    // =========================================================================

    fn handle_before_tag_state(&mut self, c: char) -> Step {
        if c == '<' {
            self.switch_to(TagState::TagOpen);
        }
        None
    }

    fn handle_tag_open_state(&mut self, c: char) -> Result<Step, ParseError> {
        match c {
            '!' => {
                self.kind = TagKind::Declaration;
                self.switch_to(TagState::MarkupDeclarationOpen);
            }
            '/' => self.kind = TagKind::Close,
            '>' => return Err(self.empty_tag_error()),
            c if is_whitespace(c) => {}
            c => {
                self.tag_name.push(c);
                self.switch_to(TagState::TagName);
            }
        }
        Ok(None)
    }

    fn handle_markup_declaration_open_state(&mut self, c: char) -> Step {
        if c == '-' {
            self.switch_to(TagState::CommentStartDash);
        } else {
            // `<!DOCTYPE ...>` and friends are read like any other tag.
            self.reconsume_in(TagState::TagOpen);
        }
        None
    }

    fn handle_comment_start_dash_state(&mut self, c: char) -> Result<Step, ParseError> {
        if c == '-' {
            self.switch_to(TagState::Comment);
            Ok(None)
        } else {
            Err(ParseError::AlmostComment {
                line: self.cursor.line(),
            })
        }
    }

    fn handle_tag_name_state(&mut self, c: char) -> Step {
        match c {
            '>' => return Some(self.emit_tag()),
            '/' => self.enter_self_closing(),
            c if is_whitespace(c) => self.switch_to(TagState::BeforeAttributeName),
            c => self.tag_name.push(c),
        }
        None
    }

    fn handle_before_attribute_name_state(&mut self, c: char) -> Step {
        match c {
            '>' => return Some(self.emit_tag()),
            '/' => self.enter_self_closing(),
            c if is_whitespace(c) => self.cursor.skip_whitespace(),
            _ => self.reconsume_in(TagState::AttributeName),
        }
        None
    }

    fn handle_attribute_name_state(&mut self, c: char) -> Step {
        match c {
            '=' => self.switch_to(TagState::BeforeAttributeValue),
            '>' | '/' => {
                // Boolean attribute: recorded with an empty value right away.
                self.commit_attribute();
                self.reconsume_in(TagState::BeforeAttributeName);
            }
            c if is_whitespace(c) => {
                self.commit_attribute();
                self.switch_to(TagState::BeforeAttributeName);
            }
            c => self.attribute_name.push(c),
        }
        None
    }

    fn handle_before_attribute_value_state(&mut self, c: char) -> Step {
        match c {
            '"' => self.switch_to(TagState::AttributeValueDoubleQuoted),
            '\'' => self.switch_to(TagState::AttributeValueSingleQuoted),
            c if is_whitespace(c) => {}
            c => {
                self.attribute_value.push(c);
                self.switch_to(TagState::AttributeValueUnquoted);
            }
        }
        None
    }

    fn handle_attribute_value_quoted_state(&mut self, c: char, quote: char) -> Step {
        if c == quote {
            self.commit_attribute();
            self.switch_to(TagState::BeforeAttributeName);
        } else {
            self.attribute_value.push(c);
        }
        None
    }

    fn handle_attribute_value_unquoted_state(&mut self, c: char) -> Step {
        // Only whitespace ends an unquoted value, so `a=b>c` reads as `b>c`.
        if is_whitespace(c) {
            self.commit_attribute();
            self.switch_to(TagState::BeforeAttributeName);
        } else {
            self.attribute_value.push(c);
        }
        None
    }

    fn handle_self_closing_tag_state(&mut self, c: char) -> Step {
        match c {
            '>' => return Some(self.emit_tag()),
            c if is_whitespace(c) => {}
            _ => self.reconsume_in(TagState::BeforeAttributeName),
        }
        None
    }

    fn handle_comment_state(&mut self, c: char) -> Step {
        if c == '-' {
            self.switch_to(TagState::CommentEndDash);
        } else {
            self.comment.push(c);
        }
        None
    }

    fn handle_comment_end_dash_state(&mut self, c: char) -> Step {
        if c == '-' {
            self.switch_to(TagState::CommentEnd);
        } else {
            self.comment.push('-');
            self.reconsume_in(TagState::Comment);
        }
        None
    }

    fn handle_comment_end_state(&mut self, c: char) -> Step {
        match c {
            '>' => return Some(self.emit_comment()),
            // `--->`: keep one dash as data, the last two still close.
            '-' => self.comment.push('-'),
            _ => {
                self.comment.push_str("--");
                self.reconsume_in(TagState::Comment);
            }
        }
        None
    }

    // =========================================================================
    // Token construction
    // =========================================================================

    fn enter_self_closing(&mut self) {
        self.self_closing = true;
        self.switch_to(TagState::SelfClosingTag);
    }

    /// Store the pending attribute. Later duplicates overwrite earlier ones.
    fn commit_attribute(&mut self) {
        let name = std::mem::take(&mut self.attribute_name).to_lowercase();
        let value = std::mem::take(&mut self.attribute_value);
        let _ = self.attributes.insert(name, value);
    }

    fn emit_tag(&mut self) -> Token {
        let name = self.tag_name.to_lowercase();
        if self.kind == TagKind::Close {
            return Token::EndTag { name };
        }
        let void = self.self_closing
            || self.kind == TagKind::Declaration
            || is_known_void_element(&name);
        Token::StartTag {
            name,
            attributes: std::mem::take(&mut self.attributes),
            void,
        }
    }

    fn emit_comment(&mut self) -> Token {
        Token::Comment {
            data: std::mem::take(&mut self.comment),
        }
    }

    fn empty_tag_error(&self) -> ParseError {
        ParseError::EmptyTag {
            line: self.cursor.line(),
        }
    }

    /// End of input inside a construct: complete it with what has been read.
    fn finish_at_eof(mut self) -> Result<Option<Token>, ParseError> {
        let token = match self.state {
            TagState::BeforeTag => return Ok(None),
            TagState::TagOpen | TagState::MarkupDeclarationOpen => {
                return Err(self.empty_tag_error());
            }
            TagState::CommentStartDash => {
                return Err(ParseError::AlmostComment {
                    line: self.cursor.line(),
                });
            }
            TagState::Comment => self.emit_comment(),
            TagState::CommentEndDash => {
                self.comment.push('-');
                self.emit_comment()
            }
            TagState::CommentEnd => {
                self.comment.push_str("--");
                self.emit_comment()
            }
            TagState::AttributeName
            | TagState::BeforeAttributeValue
            | TagState::AttributeValueDoubleQuoted
            | TagState::AttributeValueSingleQuoted
            | TagState::AttributeValueUnquoted => {
                self.commit_attribute();
                self.emit_tag()
            }
            TagState::TagName | TagState::BeforeAttributeName | TagState::SelfClosingTag => {
                self.emit_tag()
            }
        };
        log::trace!(target: "lax.tokenizer", "emit token at end of input: {token}");
        Ok(Some(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> (Result<Option<Token>, ParseError>, usize) {
        let mut cursor = Cursor::new(input);
        let result = TagTokenizer::new(&mut cursor).run();
        (result, cursor.position())
    }

    #[test]
    fn test_cursor_lands_after_closing_bracket() {
        let (result, pos) = read("<p class=x >rest");
        assert!(matches!(result, Ok(Some(Token::StartTag { .. }))));
        assert_eq!(pos, "<p class=x >".len());
    }

    #[test]
    fn test_self_closing_consumes_bracket() {
        let (result, pos) = read("<br/>text");
        assert!(matches!(result, Ok(Some(Token::StartTag { void: true, .. }))));
        assert_eq!(pos, "<br/>".len());
    }

    #[test]
    fn test_error_advances_past_offending_character() {
        let (result, pos) = read("<>after");
        assert_eq!(result, Err(ParseError::EmptyTag { line: 1 }));
        assert_eq!(pos, 2);

        let (result, pos) = read("<!-x-->");
        assert_eq!(result, Err(ParseError::AlmostComment { line: 1 }));
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_no_tag_returns_none() {
        let (result, pos) = read("just text");
        assert_eq!(result, Ok(None));
        assert_eq!(pos, "just text".len());
    }

    #[test]
    fn test_dangling_open_bracket_is_empty_tag() {
        let (result, _) = read("<");
        assert_eq!(result, Err(ParseError::EmptyTag { line: 1 }));
        let (result, _) = read("</");
        assert_eq!(result, Err(ParseError::EmptyTag { line: 1 }));
    }

    #[test]
    fn test_state_display_names() {
        assert_eq!(TagState::AttributeValueUnquoted.to_string(), "AttributeValueUnquoted");
    }
}
