//! The mutation engine: one load → mutate → stamp → save cycle per call.
//!
//! Every write operation is all-or-nothing at file granularity: any failure
//! before save leaves the persisted document untouched. There is no state
//! kept between calls; the document on disk is the only persistent state.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Local;
use ego_tree::NodeId;

use crate::builders::{self, Education, Publication, Talk, WorkExperience};
use crate::document::Document;
use crate::dom;
use crate::error::{DocumentError, Result};
use crate::sections::SectionSummary;
use crate::stamp;
use crate::store::DocumentStore;

const PUBLICATIONS: &str = "publications";
const TALKS: &str = "talks";
const WORK_EXPERIENCE: &str = "work-experience";
const EDUCATION: &str = "education";
const SOFTWARE: &str = "software";
const LANGUAGES: &str = "languages";
const PROFILE: &str = "profile";

const PREVIEW_CHARS: usize = 80;

/// Outcome of a substring-addressed removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Exactly one entry matched and was removed.
    Removed { preview: String },
    /// Nothing matched; the document is unchanged.
    NoMatch,
    /// More than one entry matched; nothing was removed. The caller must
    /// retry with a more specific substring.
    Ambiguous { candidates: Vec<String> },
}

#[derive(Clone, Copy)]
enum EntryKind {
    ListItem,
    Article,
}

/// Semantic editor over the CV page. Stateless between calls: each
/// operation loads the document fresh, applies one change, restamps, and
/// persists.
pub struct CvEditor {
    store: DocumentStore,
}

impl CvEditor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: DocumentStore::new(path),
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Read-only operations (never stamp, never write)
    // ------------------------------------------------------------------

    pub fn list_sections(&self) -> Result<BTreeMap<String, SectionSummary>> {
        Ok(self.store.load()?.list_sections())
    }

    pub fn section_content(&self, id: &str) -> Result<String> {
        self.store.load()?.section_text(id)
    }

    pub fn raw_section(&self, id: &str) -> Result<String> {
        self.store.load()?.raw_section_html(id)
    }

    pub fn profile(&self) -> Result<String> {
        let doc = self.store.load()?;
        let paragraph = Self::profile_paragraph(&doc)?;
        Ok(dom::flattened_text(doc.html(), paragraph))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Replaces the sole paragraph of the profile section.
    pub fn update_profile(&self, text: &str) -> Result<()> {
        self.mutate(|doc| {
            let paragraph = Self::profile_paragraph(doc)?;
            dom::set_text(doc.tree_mut(), paragraph, text)
        })
    }

    /// Inserts a publication at the head of the list (newest first).
    pub fn add_publication(&self, publication: &Publication) -> Result<()> {
        self.mutate(|doc| {
            let section = doc.find_section(PUBLICATIONS)?;
            let list = Self::list_node(doc, section, PUBLICATIONS)?;
            let item = publication.build(doc.tree_mut());
            dom::node_mut(doc.tree_mut(), list)?.prepend_id(item);
            Ok(())
        })
    }

    pub fn remove_publication(&self, title_substring: &str) -> Result<RemoveOutcome> {
        self.remove_matching(PUBLICATIONS, title_substring, EntryKind::ListItem)
    }

    /// Inserts a talk before the section's first entry (reverse-chronological).
    pub fn add_talk(&self, talk: &Talk) -> Result<()> {
        self.mutate(|doc| {
            let section = doc.find_section(TALKS)?;
            let entry = talk.build(doc.tree_mut());
            Self::insert_chronological(doc, section, entry)
        })
    }

    pub fn remove_talk(&self, title_substring: &str) -> Result<RemoveOutcome> {
        self.remove_matching(TALKS, title_substring, EntryKind::Article)
    }

    pub fn add_work_experience(&self, job: &WorkExperience) -> Result<()> {
        self.mutate(|doc| {
            let section = doc.find_section(WORK_EXPERIENCE)?;
            let entry = job.build(doc.tree_mut());
            Self::insert_chronological(doc, section, entry)
        })
    }

    pub fn add_education(&self, education: &Education) -> Result<()> {
        self.mutate(|doc| {
            let section = doc.find_section(EDUCATION)?;
            let entry = education.build(doc.tree_mut());
            Self::insert_chronological(doc, section, entry)
        })
    }

    /// Wholesale replacement of the software/skills list. An empty input
    /// is valid and yields an empty section.
    pub fn update_software_skills(&self, items: &[String]) -> Result<usize> {
        self.replace_list(SOFTWARE, items)
    }

    /// Wholesale replacement of the languages list.
    pub fn update_languages(&self, items: &[String]) -> Result<usize> {
        self.replace_list(LANGUAGES, items)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// One full edit cycle: load, apply `op`, restamp, save. Errors out of
    /// `op` abort before anything is written.
    fn mutate<T>(&self, op: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let mut doc = self.store.load()?;
        let value = op(&mut doc)?;
        stamp::stamp(&mut doc, Local::now().date_naive());
        self.store.save(&doc)?;
        Ok(value)
    }

    fn profile_paragraph(doc: &Document) -> Result<NodeId> {
        let section = doc.find_section(PROFILE)?;
        doc.element(section)?
            .select(&dom::PARAGRAPH)
            .next()
            .map(|paragraph| paragraph.id())
            .ok_or(DocumentError::MalformedSection {
                id: PROFILE.to_string(),
                expected: "paragraph",
            })
    }

    fn list_node(doc: &Document, section: NodeId, id: &str) -> Result<NodeId> {
        doc.element(section)?
            .select(&dom::LIST)
            .next()
            .map(|list| list.id())
            .ok_or(DocumentError::MalformedSection {
                id: id.to_string(),
                expected: "list",
            })
    }

    fn insert_chronological(doc: &mut Document, section: NodeId, entry: NodeId) -> Result<()> {
        let (first_entry, heading) = {
            let element = doc.element(section)?;
            (
                element.select(&dom::ARTICLE).next().map(|entry| entry.id()),
                element
                    .select(&dom::HEADING)
                    .next()
                    .map(|heading| heading.id()),
            )
        };
        match (first_entry, heading) {
            (Some(first), _) => {
                dom::node_mut(doc.tree_mut(), first)?.insert_id_before(entry);
            }
            (None, Some(heading)) => {
                dom::node_mut(doc.tree_mut(), heading)?.insert_id_after(entry);
            }
            (None, None) => {
                dom::node_mut(doc.tree_mut(), section)?.append_id(entry);
            }
        }
        Ok(())
    }

    fn replace_list(&self, section_id: &str, items: &[String]) -> Result<usize> {
        self.mutate(|doc| {
            let section = doc.find_section(section_id)?;
            let list = Self::list_node(doc, section, section_id)?;
            dom::clear_children(doc.tree_mut(), list)?;
            for item in items {
                let node = builders::list_item(doc.tree_mut(), item);
                dom::node_mut(doc.tree_mut(), list)?.append_id(node);
            }
            Ok(items.len())
        })
    }

    /// Collects matches first, then removes only when exactly one entry
    /// matched. No-match and multi-match paths never touch the file.
    fn remove_matching(
        &self,
        section_id: &str,
        needle: &str,
        kind: EntryKind,
    ) -> Result<RemoveOutcome> {
        let mut doc = self.store.load()?;
        let matches = Self::matching_entries(&doc, section_id, needle, kind)?;
        match matches.as_slice() {
            [] => Ok(RemoveOutcome::NoMatch),
            [(node, preview)] => {
                let (node, preview) = (*node, preview.clone());
                dom::node_mut(doc.tree_mut(), node)?.detach();
                stamp::stamp(&mut doc, Local::now().date_naive());
                self.store.save(&doc)?;
                Ok(RemoveOutcome::Removed { preview })
            }
            _ => Ok(RemoveOutcome::Ambiguous {
                candidates: matches.into_iter().map(|(_, preview)| preview).collect(),
            }),
        }
    }

    fn matching_entries(
        doc: &Document,
        section_id: &str,
        needle: &str,
        kind: EntryKind,
    ) -> Result<Vec<(NodeId, String)>> {
        let section = doc.find_section(section_id)?;
        let element = doc.element(section)?;
        let entries: Vec<NodeId> = match kind {
            EntryKind::ListItem => {
                let list = Self::list_node(doc, section, section_id)?;
                doc.element(list)?
                    .children()
                    .filter(|child| dom::is_element_named(child, "li"))
                    .map(|child| child.id())
                    .collect()
            }
            EntryKind::Article => element
                .select(&dom::ARTICLE)
                .map(|entry| entry.id())
                .collect(),
        };
        let needle = needle.to_lowercase();
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let text = dom::flattened_text(doc.html(), entry);
                text.to_lowercase()
                    .contains(&needle)
                    .then(|| (entry, preview(&text)))
            })
            .collect())
    }
}

/// Single-line, length-bounded summary of an entry's flattened text.
fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    }
}
