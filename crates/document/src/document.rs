//! The in-memory CV document.

use ego_tree::{NodeId, Tree};
use scraper::{ElementRef, Html, Node};

use crate::dom;
use crate::error::{DocumentError, Result};

const DOCTYPE: &str = "<!DOCTYPE html>";

/// A parsed CV page. Loaded fresh for every operation and discarded after
/// serialization; there is no cached instance across calls.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw markup into a mutable tree.
    pub fn parse(markup: &str) -> Result<Self> {
        let html = Html::parse_document(markup);
        let has_root = html
            .tree
            .root()
            .children()
            .any(|child| child.value().is_element());
        if !has_root {
            return Err(DocumentError::Parse(
                "markup has no element root".to_string(),
            ));
        }
        Ok(Self { html })
    }

    /// Serialized form of the tree. The output always begins with the
    /// doctype preamble, whether or not the in-memory tree carried one.
    pub fn serialize(&self) -> String {
        let markup = self.html.html();
        let head = markup.trim_start();
        if head.starts_with(DOCTYPE) || head.starts_with("<!doctype") {
            markup
        } else {
            format!("{DOCTYPE}\n{markup}")
        }
    }

    /// Detaches interactive-only controls (download buttons) ahead of
    /// paginated rendering. Returns how many nodes were removed.
    pub fn strip_interactive_controls(&mut self) -> usize {
        let targets: Vec<NodeId> = self
            .html
            .select(&dom::INTERACTIVE)
            .map(|control| control.id())
            .collect();
        let count = targets.len();
        for id in targets {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
        count
    }

    pub(crate) fn html(&self) -> &Html {
        &self.html
    }

    pub(crate) fn tree_mut(&mut self) -> &mut Tree<Node> {
        &mut self.html.tree
    }

    pub(crate) fn element(&self, id: NodeId) -> Result<ElementRef<'_>> {
        self.html
            .tree
            .get(id)
            .and_then(ElementRef::wrap)
            .ok_or_else(DocumentError::stale_node)
    }
}
