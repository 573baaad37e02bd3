//! Tokenizer module.
//!
//! Two independent character-level state machines share one [`Cursor`]:
//! the [`TagTokenizer`] for generic `<...>` constructs and the
//! [`ScriptScanner`] for the raw body of `<script>` elements.

/// Position-tracking scan primitives.
pub mod cursor;
/// Script-body state machine.
pub mod script;
/// Tag state machine.
pub mod tag;
/// Token records produced by the tag tokenizer.
pub mod token;

pub use cursor::Cursor;
pub use script::ScriptScanner;
pub use tag::TagTokenizer;
pub use token::Token;
