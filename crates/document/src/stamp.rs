//! Modification stamp maintenance.
//!
//! The document carries two synchronized markers: a human-readable date in
//! the header (`Curriculum vitae - August 29 2026`) and an ISO date in the
//! JSON-LD metadata (`"dateModified": "2026-08-29"`). Both are rewritten on
//! every successful mutation. A missing marker is left alone; stamping
//! never fabricates document structure.

use chrono::NaiveDate;
use ego_tree::NodeId;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Node;

use crate::document::Document;
use crate::dom;

const HEADER_MARKER: &str = "Curriculum vitae";

static DATE_MODIFIED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""dateModified":\s*"[^"]*""#).expect("static regex"));

/// Rewrites both modification markers to reflect `date`.
pub fn stamp(document: &mut Document, date: NaiveDate) {
    stamp_header(document, date);
    stamp_metadata(document, date);
}

fn stamp_header(document: &mut Document, date: NaiveDate) {
    let target: Option<NodeId> = document
        .html()
        .select(&dom::CV_HEADER)
        .next()
        .and_then(|header| {
            header
                .select(&dom::PARAGRAPH)
                .find(|line| line.text().any(|run| run.contains(HEADER_MARKER)))
                .map(|line| line.id())
        });
    let Some(id) = target else {
        log::debug!("header modification line absent, leaving header untouched");
        return;
    };
    let line = format!("{HEADER_MARKER} - {}", date.format("%B %d %Y"));
    if let Err(err) = dom::set_text(document.tree_mut(), id, &line) {
        log::warn!("failed to rewrite header date: {err}");
    }
}

fn stamp_metadata(document: &mut Document, date: NaiveDate) {
    let iso = date.format("%Y-%m-%d").to_string();
    let replacement = format!(r#""dateModified": "{iso}""#);

    let targets: Vec<(NodeId, String)> = document
        .html()
        .select(&dom::JSON_LD)
        .filter_map(|script| {
            let text_node = script.children().find(|child| child.value().is_text())?;
            let current = text_node.value().as_text()?.text.to_string();
            if !current.contains("dateModified") {
                return None;
            }
            let updated = DATE_MODIFIED
                .replace_all(&current, replacement.as_str())
                .into_owned();
            Some((text_node.id(), updated))
        })
        .collect();

    if targets.is_empty() {
        log::debug!("metadata dateModified absent, leaving metadata untouched");
    }
    for (id, updated) in targets {
        if let Some(mut node) = document.tree_mut().get_mut(id) {
            if let Node::Text(text) = node.value() {
                text.text = updated.as_str().into();
            }
        }
    }
}
