//! HTML tokenizer and tree builder for the lax parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Cursor primitives** over the input text
//! - **Tag tokenizer**: a state machine consuming one `<...>` construct
//!   (tags, attributes, comments, declarations)
//! - **Script-body scanner**: finds the real `</script>` while skipping
//!   string literals and comments in JavaScript
//! - **Tree builder**: recursive descent over the token stream with a
//!   persistent tag-context stack, in strict or lenient mode
//! - **Entity escaping** helpers for callers working with text content
//!
//! # Not Implemented
//!
//! - HTML5 insertion modes and implicit tag closing/reopening
//! - Encoding sniffing
//! - Character reference decoding during parsing

/// Escaping and unescaping of character references.
pub mod entities;
/// Parse error types.
pub mod error;
/// Tree construction.
pub mod parser;
/// Tokenization of tags and script bodies.
pub mod tokenizer;

pub use entities::{escape_string, unescape_string};
pub use error::{ErrorKind, ParseError};
pub use parser::{
    HTMLParser, ParseIssue, ParseMode, ParseOutput, TagContextStack, parse, parse_strict,
};
pub use tokenizer::{Cursor, ScriptScanner, TagTokenizer, Token};
