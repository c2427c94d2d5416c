//! Section lookup and read-only inspection.
//!
//! Sections are `<section id=...>` elements. A list section keeps its
//! entries as `<li>` items inside a `<ul>`; a chronological section keeps
//! them as `<article>` blocks, newest first.

use std::collections::BTreeMap;

use ego_tree::NodeId;
use scraper::ElementRef;
use serde::Serialize;

use crate::document::Document;
use crate::dom;
use crate::error::{DocumentError, Result};

/// Discovery metadata for one section.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SectionSummary {
    /// Human-readable title, taken from the section's own heading.
    pub title: String,
    /// Item count for list sections, entry count for chronological ones.
    pub entry_count: usize,
}

impl Document {
    fn section_refs(&self) -> impl Iterator<Item = (String, ElementRef<'_>)> + '_ {
        self.html().select(&dom::SECTION).filter_map(|section| {
            section
                .value()
                .attr("id")
                .map(|id| (id.to_string(), section))
        })
    }

    /// Sorted identifiers of every section in the document.
    pub fn section_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.section_refs().map(|(id, _)| id).collect();
        ids.sort();
        ids
    }

    /// Enumerates every section with its title and entry count.
    pub fn list_sections(&self) -> BTreeMap<String, SectionSummary> {
        self.section_refs()
            .map(|(id, section)| {
                let title = section
                    .select(&dom::HEADING)
                    .next()
                    .map(|heading| heading.text().collect::<String>().trim().to_string())
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| id.clone());
                let entry_count = Self::entry_count(section);
                (id, SectionSummary { title, entry_count })
            })
            .collect()
    }

    fn entry_count(section: ElementRef<'_>) -> usize {
        if let Some(list) = section.select(&dom::LIST).next() {
            list.children()
                .filter(|child| dom::is_element_named(child, "li"))
                .count()
        } else {
            section.select(&dom::ARTICLE).count()
        }
    }

    /// Exact match on the stable section identifier. On a miss the error
    /// enumerates the known identifiers so the caller can recover.
    pub fn find_section(&self, id: &str) -> Result<NodeId> {
        self.section_refs()
            .find(|(section_id, _)| section_id == id)
            .map(|(_, section)| section.id())
            .ok_or_else(|| DocumentError::SectionMissing {
                id: id.to_string(),
                known: self.section_ids(),
            })
    }

    /// Plain, newline-separated, whitespace-normalized view of a section,
    /// independent of its markup shape.
    pub fn section_text(&self, id: &str) -> Result<String> {
        let section = self.find_section(id)?;
        Ok(dom::flattened_text(self.html(), section))
    }

    /// Native serialized form of a section, for manual inspection.
    pub fn raw_section_html(&self, id: &str) -> Result<String> {
        let section = self.find_section(id)?;
        Ok(self.element(section)?.html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MARKUP: &str = r#"
        <section id="publications"><h2>Publications</h2>
            <ul><li>one</li><li>two</li></ul>
        </section>
        <section id="talks"><h2>Talks</h2>
            <article><h3>May 2024</h3><p>only entry</p></article>
        </section>
        <section id="profile"><h2>Profile</h2><p>Short   bio.</p></section>
    "#;

    #[test]
    fn list_sections_counts_both_shapes() {
        let doc = Document::parse(MARKUP).unwrap();
        let sections = doc.list_sections();
        assert_eq!(sections["publications"].entry_count, 2);
        assert_eq!(sections["talks"].entry_count, 1);
        assert_eq!(sections["profile"].entry_count, 0);
        assert_eq!(sections["talks"].title, "Talks");
    }

    #[test]
    fn find_section_miss_enumerates_known_ids() {
        let doc = Document::parse(MARKUP).unwrap();
        let err = doc.find_section("awards").err().expect("should miss");
        let message = err.to_string();
        assert!(message.contains("awards"));
        assert!(message.contains("publications, talks"), "got: {message}");
    }

    #[test]
    fn section_text_is_normalized() {
        let doc = Document::parse(MARKUP).unwrap();
        assert_eq!(doc.section_text("profile").unwrap(), "Profile\nShort bio.");
    }

    #[test]
    fn raw_section_html_preserves_markup() {
        let doc = Document::parse(MARKUP).unwrap();
        let raw = doc.raw_section_html("talks").unwrap();
        assert!(raw.starts_with("<section"));
        assert!(raw.contains("<article>"));
    }
}
