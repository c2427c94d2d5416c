//! Low-level helpers over the parsed HTML tree.
//!
//! Everything here is markup plumbing: node construction, structural
//! edits, and text flattening. Semantic rules live in the builders and
//! the editor.

use ego_tree::{NodeId, NodeMut, NodeRef, Tree};
use html5ever::{local_name, namespace_url, ns, Attribute, LocalName, QualName};
use once_cell::sync::Lazy;
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{DocumentError, Result};

pub(crate) static SECTION: Lazy<Selector> = Lazy::new(|| selector("section"));
pub(crate) static HEADING: Lazy<Selector> = Lazy::new(|| selector("h2"));
pub(crate) static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
pub(crate) static LIST: Lazy<Selector> = Lazy::new(|| selector("ul"));
pub(crate) static ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
pub(crate) static CV_HEADER: Lazy<Selector> = Lazy::new(|| selector("header.cv-header"));
pub(crate) static JSON_LD: Lazy<Selector> =
    Lazy::new(|| selector(r#"script[type="application/ld+json"]"#));
pub(crate) static INTERACTIVE: Lazy<Selector> =
    Lazy::new(|| selector(".download-btn, .download-pdf"));

fn selector(source: &str) -> Selector {
    Selector::parse(source).expect("static selector")
}

fn html_name(local: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local))
}

/// A fresh element node with no attributes.
pub(crate) fn element(local: &str) -> Node {
    Node::Element(Element::new(html_name(local), Vec::new()))
}

/// A fresh `<a href=...>` node.
pub(crate) fn anchor(href: &str) -> Node {
    let href = Attribute {
        name: QualName::new(None, ns!(), local_name!("href")),
        value: href.into(),
    };
    Node::Element(Element::new(html_name("a"), vec![href]))
}

/// A fresh text node.
pub(crate) fn text(content: &str) -> Node {
    Node::Text(Text {
        text: content.into(),
    })
}

pub(crate) fn node_mut(tree: &mut Tree<Node>, id: NodeId) -> Result<NodeMut<'_, Node>> {
    tree.get_mut(id).ok_or_else(DocumentError::stale_node)
}

pub(crate) fn is_element_named(node: &NodeRef<'_, Node>, name: &str) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| element.name() == name)
}

/// Detaches every child of `id`.
pub(crate) fn clear_children(tree: &mut Tree<Node>, id: NodeId) -> Result<()> {
    let children: Vec<NodeId> = tree
        .get(id)
        .ok_or_else(DocumentError::stale_node)?
        .children()
        .map(|child| child.id())
        .collect();
    for child in children {
        node_mut(tree, child)?.detach();
    }
    Ok(())
}

/// Replaces the children of `id` with a single text node.
pub(crate) fn set_text(tree: &mut Tree<Node>, id: NodeId, content: &str) -> Result<()> {
    clear_children(tree, id)?;
    node_mut(tree, id)?.append(text(content));
    Ok(())
}

/// Flattens an element to plain text: one line per text run, each run
/// whitespace-normalized, empty runs dropped.
pub(crate) fn flattened_text(html: &Html, id: NodeId) -> String {
    let Some(node) = html.tree.get(id) else {
        return String::new();
    };
    let Some(element) = ElementRef::wrap(node) else {
        return String::new();
    };
    element
        .text()
        .map(|run| run.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|run| !run.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
