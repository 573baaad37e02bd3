use thiserror::Error;

/// Broad classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed tag syntax, detected by the tag tokenizer.
    TagShape,
    /// A close tag that does not match the innermost open element, raised by
    /// the tree builder in strict mode only.
    Structural,
}

/// Errors that abort a parse.
///
/// Both kinds are fatal: they unwind every level of the tree builder and no
/// partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `<>`, `< >`, `</>`, or a `<` with nothing after it.
    #[error("empty tag similar to `<>`, `< >` or `</>` on line {line}")]
    EmptyTag {
        /// 1-based line of the offending character.
        line: usize,
    },

    /// `<!-` followed by anything other than a second `-`.
    #[error("almost an XML comment but not quite on line {line}")]
    AlmostComment {
        /// 1-based line of the offending character.
        line: usize,
    },

    /// A close tag whose name differs from the innermost open element.
    #[error(
        "unexpected close </{found}> (expected {}) on line {line}\ncurrent path: {path}",
        describe_expected(.expected.as_deref())
    )]
    UnexpectedClose {
        /// Name of the close tag that was read.
        found: String,
        /// Name of the innermost open element, if any.
        expected: Option<String>,
        /// 1-based line just after the close tag.
        line: usize,
        /// Ancestor path at the point of failure, as rendered by the
        /// tag-context stack.
        path: String,
    },
}

impl ParseError {
    /// Which class of failure this is.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTag { .. } | Self::AlmostComment { .. } => ErrorKind::TagShape,
            Self::UnexpectedClose { .. } => ErrorKind::Structural,
        }
    }

    /// 1-based line the error was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::EmptyTag { line }
            | Self::AlmostComment { line }
            | Self::UnexpectedClose { line, .. } => *line,
        }
    }
}

/// `</name>` for an open element, or a note that nothing is open.
pub(crate) fn describe_expected(expected: Option<&str>) -> String {
    expected.map_or_else(
        || "no open element".to_string(),
        |name| format!("</{name}>"),
    )
}
