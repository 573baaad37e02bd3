//! Tests for tag stringification and tree rendering.

use lax_dom::{AttributesMap, Document, ElementData, NodeId, NodeType};

fn element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)], void: bool) -> NodeId {
    let attrs: AttributesMap = attrs
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let id = doc.alloc(NodeType::Element(ElementData::new(tag, attrs, void)));
    doc.append_child(parent, id);
    id
}

fn text(doc: &mut Document, parent: NodeId, content: &str) -> NodeId {
    let id = doc.alloc_text(content, false);
    doc.append_child(parent, id);
    id
}

#[test]
fn test_tag_string_attributes_sorted() {
    let mut doc = Document::new("");
    let a = element(
        &mut doc,
        NodeId::ROOT,
        "a",
        &[("href", "/test/route"), ("class", "my-link")],
        true,
    );
    assert_eq!(doc.tag_string(a), r#"<a class="my-link" href="/test/route"/>"#);
}

#[test]
fn test_tag_string_kinds() {
    let mut doc = Document::new("");
    let div = element(&mut doc, NodeId::ROOT, "div", &[], false);
    let input = element(&mut doc, div, "input", &[("disabled", ""), ("type", "text")], true);
    let words = text(&mut doc, div, "\n  some words  \n");
    let blank = text(&mut doc, div, " \t ");
    let comment = doc.alloc(NodeType::Comment("  note ".to_string()));
    doc.append_child(div, comment);

    assert_eq!(doc.tag_string(NodeId::ROOT), "");
    assert_eq!(doc.tag_string(div), "<div>");
    assert_eq!(doc.tag_string(input), r#"<input disabled type="text"/>"#);
    assert_eq!(doc.tag_string(words), "some words");
    assert_eq!(doc.tag_string(blank), "");
    assert_eq!(doc.tag_string(comment), "<!--note-->");
}

#[test]
fn test_render_nested() {
    let mut doc = Document::new("");
    let div = element(&mut doc, NodeId::ROOT, "div", &[("id", "a")], false);
    let _ = element(&mut doc, div, "br", &[], true);
    let p = element(&mut doc, div, "p", &[], false);
    let _ = text(&mut doc, p, "hi");
    let comment = doc.alloc(NodeType::Comment(" c ".to_string()));
    doc.append_child(div, comment);

    let expected = "\
<div id=\"a\">
  <br/>
  <p>
    hi
  </p>
  <!--c-->
</div>
";
    assert_eq!(doc.render(NodeId::ROOT), expected);
    assert_eq!(doc.to_string(), expected);
    assert_eq!(doc.render(p), "<p>\n  hi\n</p>\n");
}

#[test]
fn test_render_siblings_at_top_level() {
    let mut doc = Document::new("");
    let _ = element(&mut doc, NodeId::ROOT, "hr", &[], true);
    let _ = text(&mut doc, NodeId::ROOT, "end");
    assert_eq!(doc.to_string(), "<hr/>\nend\n");
}

#[test]
fn test_render_empty_document() {
    assert_eq!(Document::new("").to_string(), "");
}
