use strum_macros::Display;

use lax_dom::{AttributesMap, Document, ElementData, NodeId, NodeType};

use super::stack::TagContextStack;
use crate::error::{ParseError, describe_expected};
use crate::tokenizer::cursor::{Cursor, is_continuous_whitespace};
use crate::tokenizer::script::{DEFAULT_SCRIPT_TYPE, ScriptScanner};
use crate::tokenizer::{TagTokenizer, Token};

/// How close tags that do not match the innermost open element are treated.
///
/// The mode is fixed for the whole parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum ParseMode {
    /// Drop the close tag and keep parsing at the current level.
    #[default]
    Lenient,
    /// Fail with [`ParseError::UnexpectedClose`].
    Strict,
}

/// A recoverable irregularity noticed in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What was dropped and why.
    pub message: String,
    /// 1-based line just after the offending tag.
    pub line: usize,
}

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// The finished element tree.
    pub document: Document,
    /// Close tags dropped in lenient mode, in document order.
    pub issues: Vec<ParseIssue>,
}

/// Parse `input`, dropping close tags that do not match the innermost open
/// element.
///
/// # Errors
///
/// Returns a tag-shape error for malformed tag syntax.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    HTMLParser::new(input).run().map(|output| output.document)
}

/// Parse `input`, failing on the first close tag that does not match the
/// innermost open element.
///
/// # Errors
///
/// Returns a tag-shape error for malformed tag syntax and a structural error
/// for mismatched nesting.
pub fn parse_strict(input: &str) -> Result<Document, ParseError> {
    HTMLParser::new(input)
        .with_strict_mode()
        .run()
        .map(|output| output.document)
}

/// Single-pass recursive-descent tree builder.
///
/// Each call to `parse_children` handles one level of the tree: it reads
/// text and tags until the close tag of the element it was called for, and
/// recurses for every container element it meets.
pub struct HTMLParser<'a> {
    cursor: Cursor<'a>,
    mode: ParseMode,
    document: Document,
    issues: Vec<ParseIssue>,
}

impl<'a> HTMLParser<'a> {
    /// Create a lenient parser for `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            mode: ParseMode::Lenient,
            document: Document::new(input),
            issues: Vec::new(),
        }
    }

    /// Enable strict mode: any mismatched close tag aborts the parse.
    #[must_use]
    pub const fn with_strict_mode(self) -> Self {
        self.with_mode(ParseMode::Strict)
    }

    /// Select the parse mode explicitly.
    #[must_use]
    pub const fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured mode.
    #[must_use]
    pub const fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Build the tree.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] aborts the whole parse; no partial tree is returned.
    pub fn run(mut self) -> Result<ParseOutput, ParseError> {
        log::debug!(
            target: "lax.parser",
            "parsing {} bytes in {} mode",
            self.cursor.input().len(),
            self.mode
        );
        self.parse_children(NodeId::ROOT, TagContextStack::new())?;
        Ok(ParseOutput {
            document: self.document,
            issues: self.issues,
        })
    }

    /// Parse one level of the tree into `parent`.
    ///
    /// `stack` is this level's own view of the ancestor chain; its top is the
    /// element whose close tag ends the level.
    fn parse_children(
        &mut self,
        parent: NodeId,
        mut stack: TagContextStack,
    ) -> Result<(), ParseError> {
        let level_start = self.cursor.position();

        while !self.cursor.is_at_end() {
            // STEP 1: Text up to the next tag. Whitespace-only runs are dropped.
            let text = self.cursor.read_until_tag();
            if !is_continuous_whitespace(text) {
                let text_node = self.document.alloc_text(text, false);
                let span_end = self.cursor.position();
                self.document
                    .set_raw_inner(text_node, span_end - text.len()..span_end);
                self.document.append_child(parent, text_node);
            }

            // STEP 2: The tag itself.
            let tag_start = self.cursor.position();
            let Some(token) = TagTokenizer::new(&mut self.cursor).run()? else {
                break;
            };

            match token {
                // STEP 3: Close tags end this level or are dealt with per mode.
                Token::EndTag { name } => {
                    if stack.peek() == Some(name.as_str()) {
                        let _ = stack.pop();
                        self.document
                            .set_raw_inner(parent, level_start..tag_start);
                        log::debug!(target: "lax.parser", "closed <{name}>");
                        return Ok(());
                    }
                    self.mismatched_close(name, &stack)?;
                }

                Token::Comment { data } => {
                    let comment = self.document.alloc(NodeType::Comment(data));
                    self.document.append_child(parent, comment);
                }

                // STEP 4: Void elements are complete leaves.
                Token::StartTag {
                    name,
                    attributes,
                    void: true,
                } => {
                    let element = self.alloc_element(&name, attributes, true);
                    self.document.append_child(parent, element);
                }

                // STEP 5: Script bodies are raw text, never markup.
                Token::StartTag {
                    name, attributes, ..
                } if name == "script" => {
                    let script_type = attributes
                        .get("type")
                        .map_or(DEFAULT_SCRIPT_TYPE, String::as_str)
                        .to_string();
                    let element = self.alloc_element(&name, attributes, false);

                    let body_start = self.cursor.position();
                    let body = ScriptScanner::new(&mut self.cursor, &script_type).scan();
                    let body_node = self.document.alloc_text(body, true);
                    let body_span = body_start..body_start + body.len();
                    self.document.set_raw_inner(body_node, body_span.clone());
                    self.document.set_raw_inner(element, body_span);

                    self.document.append_child(element, body_node);
                    self.document.append_child(parent, element);
                }

                // STEP 6: Containers recurse with their own copy of the stack.
                Token::StartTag {
                    name, attributes, ..
                } => {
                    let element = self.alloc_element(&name, attributes, false);
                    let mut child_stack = stack.duplicate();
                    child_stack.push(name.as_str());
                    log::debug!(target: "lax.parser", "descend into {child_stack}");

                    let result = self.parse_children(element, child_stack);
                    self.document.append_child(parent, element);
                    result?;
                }
            }
        }

        // STEP 7: End of input ends every open level.
        let level_end = self.cursor.position();
        self.document.set_raw_inner(parent, level_start..level_end);
        Ok(())
    }

    /// Handle a close tag that does not match the top of `stack`.
    fn mismatched_close(
        &mut self,
        found: String,
        stack: &TagContextStack,
    ) -> Result<(), ParseError> {
        let line = self.cursor.line();
        match self.mode {
            ParseMode::Strict => Err(ParseError::UnexpectedClose {
                found,
                expected: stack.peek().map(str::to_string),
                line,
                path: stack.to_string(),
            }),
            ParseMode::Lenient => {
                let message = format!(
                    "dropped unexpected close </{found}> (expected {}) on line {line}",
                    describe_expected(stack.peek())
                );
                log::warn!(target: "lax.parser", "{message}");
                self.issues.push(ParseIssue { message, line });
                Ok(())
            }
        }
    }

    fn alloc_element(&mut self, name: &str, attributes: AttributesMap, void: bool) -> NodeId {
        self.document
            .alloc(NodeType::Element(ElementData::new(name, attributes, void)))
    }
}
