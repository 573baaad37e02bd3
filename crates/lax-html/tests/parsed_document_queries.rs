//! End-to-end tests: parse a full document, then query the resulting tree.

use lax_dom::Document;
use lax_html::{parse, parse_strict};

const SAMPLE_DOC: &str = r#"
<!DOCTYPE html>
<html>
	<head>
		<title>Test Document</title>
		<meta name="referrer" content="origin">
		<link rel="stylesheet" type="text/css" href="foo.css?123456">
		<script type="text/javascript">
			function hide(id) {
				var el = document.getElementById(id);
				if (el) { el.style.visibility = 'hidden'; }
			}
		</script>
	</head>
	<body>
		<div class="container">
			<h1 id="my-header">Hello World!</h1>
			<a href="/internal" class="my-link-class highlight">Test Internal Link</a>
			<a href="http://test/external" class="highlight" target="_blank">Test External Link</a>
		</div>
		<div class="footer">
			<!-- a footer comment -->
		</div>
	</body>
</html>"#;

fn sample() -> Document {
    parse(SAMPLE_DOC).unwrap_or_else(|e| panic!("sample failed to parse: {e}"))
}

#[test]
fn test_sample_is_well_formed() {
    let strict = parse_strict(SAMPLE_DOC).expect("strict parse");
    let lenient = sample();
    assert!(strict.same_tree(strict.root(), &lenient, lenient.root()));

    let top: Vec<&str> = lenient
        .children(lenient.root())
        .iter()
        .map(|&id| lenient.name(id))
        .collect();
    assert_eq!(top, ["doctype", "html"]);
}

#[test]
fn test_elements_by_tag_name() {
    let doc = sample();
    assert_eq!(doc.elements_by_tag_name(doc.root(), "div").len(), 2);
    assert_eq!(doc.elements_by_tag_name(doc.root(), "a").len(), 2);
    assert_eq!(doc.elements_by_tag_name(doc.root(), "DIV").len(), 2);
    assert!(!doc.elements_by_tag_name(doc.root(), "text").is_empty());
    assert_eq!(doc.elements_by_tag_name(doc.root(), "xmlcomment").len(), 1);
}

#[test]
fn test_elements_by_class_name() {
    let doc = sample();
    let highlighted = doc.elements_by_class_name(doc.root(), "highlight");
    assert_eq!(highlighted.len(), 2);
    assert_eq!(doc.elements_by_class_name(doc.root(), "HIGHLIGHT").len(), 2);
    assert_eq!(doc.elements_by_class_name(doc.root(), "my-link-class").len(), 1);
    assert!(doc.elements_by_class_name(doc.root(), "missing").is_empty());
}

#[test]
fn test_element_by_id() {
    let doc = sample();
    let header = doc.element_by_id(doc.root(), "my-header").expect("header");
    let data = doc.as_element(header).expect("element");
    assert_eq!(data.tag_name, "h1");
    assert_eq!(data.id(), Some("my-header"));
    assert_eq!(doc.text_content(header), "Hello World!");
    assert_eq!(doc.element_by_id(doc.root(), "MY-HEADER"), None);
}

#[test]
fn test_elements_by_predicate_sees_parent() {
    let doc = sample();
    let in_container = doc.elements_by_predicate(doc.root(), |doc, id| {
        doc.parent(id)
            .and_then(|parent| doc.as_element(parent))
            .is_some_and(|parent| parent.tag_name == "div" && parent.has_class("container"))
    });
    let names: Vec<&str> = in_container.iter().map(|&id| doc.name(id)).collect();
    assert_eq!(names, ["h1", "a", "a"]);
    assert_eq!(doc.path(in_container[0]), "html > body > div > h1");
}

#[test]
fn test_script_in_head() {
    let doc = sample();
    let script = doc.elements_by_tag_name(doc.root(), "script")[0];
    let body = doc.children(script)[0];
    assert!(doc.get(body).expect("body").is_data());
    assert!(doc.text_content(script).contains("el.style.visibility = 'hidden';"));
    assert_eq!(doc.path(script), "html > head > script");
}

#[test]
fn test_void_head_elements() {
    let doc = sample();
    let meta = doc.elements_by_tag_name(doc.root(), "meta")[0];
    let data = doc.as_element(meta).expect("meta");
    assert!(data.void);
    assert_eq!(data.attr("content"), Some("origin"));
    assert_eq!(data.attr("NAME"), Some("referrer"));

    let link = doc.elements_by_tag_name(doc.root(), "link")[0];
    assert_eq!(
        doc.as_element(link).and_then(|l| l.attr("href")),
        Some("foo.css?123456")
    );
}

#[test]
fn test_descendants_are_pre_order() {
    let doc = parse("<a><b><c></c></b><d></d></a>").expect("parse");
    let names: Vec<&str> = doc.descendants(doc.root()).map(|id| doc.name(id)).collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
}

#[test]
fn test_queries_are_scoped_to_subtree() {
    let doc = sample();
    let footer = doc.elements_by_class_name(doc.root(), "footer")[0];
    assert!(doc.elements_by_tag_name(footer, "a").is_empty());
    assert_eq!(doc.element_by_id(footer, "my-header"), None);
    assert_eq!(doc.text_content(footer), "");
}
