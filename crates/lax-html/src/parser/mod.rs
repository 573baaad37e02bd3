//! Tree construction.

/// Recursive-descent tree builder.
pub mod builder;
/// Persistent stack of enclosing element names.
pub mod stack;

pub use builder::{HTMLParser, ParseIssue, ParseMode, ParseOutput, parse, parse_strict};
pub use stack::TagContextStack;
