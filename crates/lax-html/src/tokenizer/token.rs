use core::fmt;

use lax_dom::AttributesMap;

/// Elements that never have children, whatever the markup says.
pub const KNOWN_VOID_ELEMENTS: [&str; 16] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "menuitem",
    "meta", "param", "source", "track", "wbr",
];

/// Whether `name` is a known void element, ignoring case.
#[must_use]
pub fn is_known_void_element(name: &str) -> bool {
    KNOWN_VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// A record emitted by the tag tokenizer for one `<...>` construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opening tag, a self-closing tag, or a `<!...>` declaration.
    ///
    /// Declarations such as `<!DOCTYPE html>` are always void and go through
    /// the same name and attribute scanning as ordinary tags.
    StartTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes keyed by lower-cased name.
        attributes: AttributesMap,
        /// Explicitly self-closed, a declaration, or a known void element.
        void: bool,
    },

    /// A closing tag. Attributes written on close tags are discarded.
    EndTag {
        /// Lower-cased tag name.
        name: String,
    },

    /// A `<!-- ... -->` comment.
    Comment {
        /// Everything between the opening `<!--` and the closing `-->`.
        data: String,
    },
}

impl Token {
    /// True for close-tag records.
    #[must_use]
    pub const fn is_close(&self) -> bool {
        matches!(self, Self::EndTag { .. })
    }

    /// The tag name, or `None` for comments.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            Self::Comment { .. } => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                attributes,
                void,
            } => {
                write!(f, "<{name}")?;
                let mut names: Vec<&String> = attributes.keys().collect();
                names.sort();
                for attr in names {
                    write!(f, " {attr}=\"{}\"", attributes[attr])?;
                }
                if *void {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
        }
    }
}
