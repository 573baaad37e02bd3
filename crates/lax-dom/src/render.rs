//! Rendering nodes back to markup.
//!
//! Output is meant for inspection and diffing: attributes are sorted by name,
//! text is trimmed and whitespace-only text is dropped. Nothing is escaped.

use core::fmt;

use crate::{AttributesMap, Document, NodeId, NodeType};

const INDENT: &str = "  ";

impl Document {
    /// Render the single tag for `id`, without its children or close tag.
    ///
    /// - root: empty
    /// - text: trimmed content, empty if only whitespace
    /// - comment: `<!--data-->` with trimmed data
    /// - void element: `<name attrs/>`
    /// - container element: `<name attrs>`
    #[must_use]
    pub fn tag_string(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match &node.node_type {
            NodeType::Root => String::new(),
            NodeType::Text(text) => text.content.trim().to_string(),
            NodeType::Comment(data) => format!("<!--{}-->", data.trim()),
            NodeType::Element(data) => {
                let close = if data.void { "/>" } else { ">" };
                if data.attrs.is_empty() {
                    format!("<{}{close}", data.tag_name)
                } else {
                    format!("<{} {}{close}", data.tag_name, stringify_attributes(&data.attrs))
                }
            }
        }
    }

    /// Render `id` and its subtree, one node per line, indented two spaces
    /// per level. Rendering the root renders its children at depth zero.
    #[must_use]
    pub fn render(&self, id: NodeId) -> String {
        let mut out = String::new();
        if id == NodeId::ROOT {
            for &child in self.children(id) {
                self.render_into(child, 0, &mut out);
            }
        } else {
            self.render_into(id, 0, &mut out);
        }
        out
    }

    fn render_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        let prefix = INDENT.repeat(depth);

        out.push_str(&prefix);
        out.push_str(&self.tag_string(id));
        out.push('\n');

        for &child in &node.children {
            self.render_into(child, depth + 1, out);
        }

        if !(node.is_void() || node.is_root()) {
            out.push_str(&prefix);
            out.push_str("</");
            out.push_str(node.name());
            out.push_str(">\n");
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(NodeId::ROOT))
    }
}

/// `name="value"` pairs sorted by name; empty values render as a bare name.
fn stringify_attributes(attrs: &AttributesMap) -> String {
    let mut names: Vec<&String> = attrs.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| match attrs[name].as_str() {
            "" => name.clone(),
            value => format!("{name}=\"{value}\""),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
