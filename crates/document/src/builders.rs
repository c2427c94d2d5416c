//! Fragment builders, one per entry kind.
//!
//! Each builder takes typed fields and produces a detached fragment in the
//! document's tree, ready for ordered insertion by the editor. Required
//! fields are unconditional; every optional field renders its line only
//! when supplied.

use ego_tree::{NodeId, Tree};
use scraper::Node;

use crate::dom;

/// A publication list item.
///
/// Rendered as `authors. <b>title</b>. <i>venue</i>, year.` — except for
/// preprint venues (any venue containing "arxiv"), which render as plain
/// `venue arXiv:id, year.` with the identifier included only when present.
#[derive(Debug, Clone, Default)]
pub struct Publication {
    pub authors: String,
    pub title: String,
    pub venue: String,
    pub year: String,
    pub arxiv_id: Option<String>,
    /// Accepted for completeness; not rendered in the list item.
    pub doi: Option<String>,
}

impl Publication {
    pub(crate) fn build(&self, tree: &mut Tree<Node>) -> NodeId {
        let mut item = tree.orphan(dom::element("li"));
        let id = item.id();
        item.append(dom::text(&format!("{}. ", self.authors)));
        item.append(dom::element("b"))
            .append(dom::text(&self.title));
        item.append(dom::text(". "));
        if self.venue.to_lowercase().contains("arxiv") {
            let tail = match &self.arxiv_id {
                Some(arxiv_id) => format!("{} arXiv:{}, {}.", self.venue, arxiv_id, self.year),
                None => format!("{}, {}.", self.venue, self.year),
            };
            item.append(dom::text(&tail));
        } else {
            item.append(dom::element("i"))
                .append(dom::text(&self.venue));
            item.append(dom::text(&format!(", {}.", self.year)));
        }
        id
    }
}

/// A talk entry: date heading, `event @ location, type` line, quoted title.
#[derive(Debug, Clone, Default)]
pub struct Talk {
    pub date: String,
    pub event_name: String,
    pub location: String,
    pub talk_type: String,
    pub talk_title: String,
}

impl Talk {
    pub(crate) fn build(&self, tree: &mut Tree<Node>) -> NodeId {
        let mut entry = tree.orphan(dom::element("article"));
        let id = entry.id();
        entry
            .append(dom::element("h3"))
            .append(dom::text(&self.date));
        {
            let mut line = entry.append(dom::element("p"));
            line.append(dom::element("b"))
                .append(dom::text(&self.event_name));
            line.append(dom::text(&format!(
                " @ {}, {}",
                self.location, self.talk_type
            )));
        }
        entry
            .append(dom::element("p"))
            .append(dom::text(&format!("\"{}\"", self.talk_title)));
        id
    }
}

/// A work experience entry. The organization renders as a hyperlink when a
/// URL is supplied.
#[derive(Debug, Clone, Default)]
pub struct WorkExperience {
    pub date_range: String,
    pub job_title: String,
    pub organization: String,
    pub location: String,
    pub description: String,
    pub org_url: Option<String>,
}

impl WorkExperience {
    pub(crate) fn build(&self, tree: &mut Tree<Node>) -> NodeId {
        let mut entry = tree.orphan(dom::element("article"));
        let id = entry.id();
        entry
            .append(dom::element("h3"))
            .append(dom::text(&self.date_range));
        {
            let mut line = entry.append(dom::element("p"));
            line.append(dom::element("b"))
                .append(dom::text(&self.job_title));
            line.append(dom::text(", "));
            match &self.org_url {
                Some(url) => {
                    line.append(dom::anchor(url))
                        .append(dom::text(&self.organization));
                }
                None => {
                    line.append(dom::text(&self.organization));
                }
            }
            line.append(dom::text(&format!(", {}", self.location)));
        }
        entry
            .append(dom::element("p"))
            .append(dom::text(&self.description));
        id
    }
}

/// An education entry. Optional fields become their own labeled lines,
/// emitted in fixed order: topics, group, supervisors, thesis, grade.
#[derive(Debug, Clone, Default)]
pub struct Education {
    pub date_range: String,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub topics: Option<String>,
    pub group_name: Option<String>,
    pub group_url: Option<String>,
    pub supervisors: Option<String>,
    pub thesis: Option<String>,
    pub grade: Option<String>,
}

impl Education {
    pub(crate) fn build(&self, tree: &mut Tree<Node>) -> NodeId {
        let mut entry = tree.orphan(dom::element("article"));
        let id = entry.id();
        entry
            .append(dom::element("h3"))
            .append(dom::text(&self.date_range));
        {
            let mut line = entry.append(dom::element("p"));
            line.append(dom::element("b"))
                .append(dom::text(&self.degree));
            line.append(dom::text(&format!(
                ", {}, {}",
                self.institution, self.location
            )));
        }
        if let Some(topics) = &self.topics {
            entry
                .append(dom::element("p"))
                .append(dom::text(&format!("Topics: {topics}")));
        }
        if let Some(group_name) = &self.group_name {
            let mut line = entry.append(dom::element("p"));
            line.append(dom::text("Group: "));
            match &self.group_url {
                Some(url) => {
                    line.append(dom::anchor(url)).append(dom::text(group_name));
                }
                None => {
                    line.append(dom::text(group_name));
                }
            }
        }
        if let Some(supervisors) = &self.supervisors {
            entry
                .append(dom::element("p"))
                .append(dom::text(&format!("Supervisors: {supervisors}")));
        }
        if let Some(thesis) = &self.thesis {
            entry
                .append(dom::element("p"))
                .append(dom::text(&format!("Thesis: \"{thesis}\"")));
        }
        if let Some(grade) = &self.grade {
            entry
                .append(dom::element("p"))
                .append(dom::text(&format!("Grade: {grade}")));
        }
        id
    }
}

/// A single plain line item for the list-replacement operations.
pub(crate) fn list_item(tree: &mut Tree<Node>, content: &str) -> NodeId {
    let mut item = tree.orphan(dom::element("li"));
    let id = item.id();
    item.append(dom::text(content));
    id
}
