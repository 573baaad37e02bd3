//! Command-line front end for the lax HTML parser.
//!
//! Usage:
//!   lax `<file>`                    Parse a file and print the element tree
//!   lax --html `'<p>..</p>'`        Parse an inline string
//!   lax `<file>` --strict           Fail on the first mismatched close tag
//!   lax `<file>` --format json      Print a nested JSON snapshot
//!   lax `<file>` --format tags      Print one tag per element with its path

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lax_dom::{Document, NodeId, NodeType};
use lax_html::{HTMLParser, ParseMode, ParseOutput};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Parse HTML with a forgiving single-pass parser and print the result
#[derive(Parser, Debug)]
#[command(name = "lax")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the element tree of a file
    lax ./index.html

    # Parse inline HTML
    lax --html '<div><p>Hello</p></div>'

    # Reject misnested markup
    lax --strict ./index.html

    # Dump the tree as JSON
    lax --format json ./index.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of reading a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Fail on the first close tag that does not match the open element
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented element tree
    Tree,
    /// Nested JSON snapshot
    Json,
    /// One tag per element, with its ancestor path
    Tags,
}

/// JSON snapshot of one node and its subtree.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonNode<'a> {
    Root {
        children: Vec<JsonNode<'a>>,
    },
    Element {
        name: &'a str,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<&'a str, &'a str>,
        void: bool,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<JsonNode<'a>>,
    },
    Text {
        content: &'a str,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        data: bool,
    },
    Comment {
        content: &'a str,
    },
}

impl<'a> JsonNode<'a> {
    fn from_document(doc: &'a Document, id: NodeId) -> Option<Self> {
        let node = doc.get(id)?;
        let children = || -> Vec<Self> {
            node.children
                .iter()
                .filter_map(|&child| Self::from_document(doc, child))
                .collect()
        };
        Some(match &node.node_type {
            NodeType::Root => Self::Root {
                children: children(),
            },
            NodeType::Element(data) => Self::Element {
                name: data.tag_name.as_str(),
                attributes: data
                    .attrs
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect(),
                void: data.void,
                children: children(),
            },
            NodeType::Text(text) => Self::Text {
                content: text.content.as_str(),
                data: text.data,
            },
            NodeType::Comment(content) => Self::Comment {
                content: content.as_str(),
            },
        })
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let html = load_input(cli)?;
    let mode = if cli.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let ParseOutput { document, issues } = HTMLParser::new(&html).with_mode(mode).run()?;
    log::info!("parsed {} nodes in {mode} mode", document.len());

    for issue in &issues {
        eprintln!("{} {}", "warning:".yellow().bold(), issue.message);
    }

    match cli.format {
        OutputFormat::Tree => print!("{document}"),
        OutputFormat::Json => {
            let snapshot = JsonNode::from_document(&document, document.root())
                .context("document has no root")?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        OutputFormat::Tags => print_tags(&document),
    }
    Ok(())
}

fn load_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(html) = &cli.html {
        Ok(html.clone())
    } else if let Some(path) = &cli.path {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    } else {
        anyhow::bail!("no input: pass a FILE or --html")
    }
}

fn print_tags(doc: &Document) {
    for id in doc.descendants(doc.root()) {
        if doc.as_element(id).is_some() {
            println!("{}  {}", doc.path(id).dimmed(), doc.tag_string(id));
        }
    }
}
