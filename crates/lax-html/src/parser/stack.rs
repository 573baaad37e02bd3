//! The tag-context stack.
//!
//! Each level of the tree builder owns its own view of the ancestor chain.
//! The stack is a singly-linked list with shared tails: duplicating it is a
//! reference-count bump, pushing prepends a frame, and popping moves the
//! head. None of these ever touches a frame another stack can see.

use core::fmt;
use std::rc::Rc;

/// Rendering of an empty stack.
pub const EMPTY_STACK_RENDERING: &str = "*";

#[derive(Debug)]
struct Frame {
    name: String,
    next: Option<Rc<Frame>>,
}

/// Persistent stack of enclosing element names, innermost on top.
#[derive(Debug, Clone, Default)]
pub struct TagContextStack {
    top: Option<Rc<Frame>>,
    len: usize,
}

impl TagContextStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { top: None, len: 0 }
    }

    /// Push `name` on top.
    pub fn push(&mut self, name: impl Into<String>) {
        let frame = Frame {
            name: name.into(),
            next: self.top.take(),
        };
        self.top = Some(Rc::new(frame));
        self.len += 1;
    }

    /// Remove and return the top name.
    pub fn pop(&mut self) -> Option<String> {
        let frame = self.top.take()?;
        self.len -= 1;
        match Rc::try_unwrap(frame) {
            Ok(frame) => {
                self.top = frame.next;
                Some(frame.name)
            }
            Err(shared) => {
                self.top.clone_from(&shared.next);
                Some(shared.name.clone())
            }
        }
    }

    /// The top name, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.top.as_deref().map(|frame| frame.name.as_str())
    }

    /// An independent copy: pushes and pops on either side are invisible to
    /// the other.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Number of names on the stack.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when no element is open.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Names from the top of the stack down to the bottom.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::successors(self.top.as_deref(), |frame| frame.next.as_deref())
            .map(|frame| frame.name.as_str())
    }
}

impl fmt::Display for TagContextStack {
    /// Renders the chain bottom-to-top joined by `" > "`, or `*` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY_STACK_RENDERING);
        }
        let mut names: Vec<&str> = self.iter().collect();
        names.reverse();
        f.write_str(&names.join(" > "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_render() {
        let mut stack = TagContextStack::new();
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.to_string(), "*");

        stack.push("br");
        assert_eq!(stack.len(), 1);
        stack.push("div");
        stack.push("div");
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.to_string(), "br > div > div");
        assert_eq!(stack.peek(), Some("div"));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut stack = TagContextStack::new();
        stack.push("br");
        stack.push("div");
        stack.push("div");

        let mut duplicated = stack.duplicate();
        assert_eq!(duplicated.to_string(), stack.to_string());

        duplicated.push("p");
        assert_eq!(duplicated.pop(), Some("p".to_string()));
        assert_eq!(duplicated.pop(), Some("div".to_string()));
        assert_eq!(duplicated.to_string(), "br > div");

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.to_string(), "br > div > div");

        assert_eq!(stack.pop(), Some("div".to_string()));
        assert_eq!(stack.len(), 2);
        assert_eq!(duplicated.to_string(), "br > div");
    }

    #[test]
    fn test_pop_empty() {
        let mut stack = TagContextStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.peek(), None);
        assert!(stack.is_empty());
    }
}
