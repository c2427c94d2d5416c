//! End-to-end edit cycles against a fixture page on disk.

use chrono::NaiveDate;
use cvsite_document::{
    CvEditor, Document, DocumentError, Education, Publication, RemoveOutcome, Talk,
    WorkExperience,
};
use pretty_assertions::assert_eq;
use regex::Regex;

const FIXTURE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Ada Quantrell</title>
<script type="application/ld+json">{"@context": "https://schema.org", "@type": "Person", "name": "Ada Quantrell", "dateModified": "2024-01-15"}</script>
</head>
<body>
<header class="cv-header">
<h1>Ada Quantrell</h1>
<p>Curriculum vitae - January 15 2024</p>
<button class="download-btn">Download PDF</button>
</header>
<section id="profile"><h2>Profile</h2><p>Researcher in machine learning.</p></section>
<section id="publications"><h2>Publications</h2><ul>
<li>A. Quantrell. <b>Flow Matching at Scale</b>. <i>JMLR</i>, 2023.</li>
<li>A. Quantrell and B. Ng. <b>Diffusion Guidance</b>. arXiv preprint arXiv:2201.00001, 2022.</li>
<li>B. Ng. <b>Older Results</b>. <i>NeurIPS</i>, 2021.</li>
</ul></section>
<section id="talks"><h2>Talks</h2>
<article><h3>May 2023</h3><p><b>ICML</b> @ Honolulu, USA, Talk</p><p>"Scaling Flows"</p></article>
</section>
<section id="work-experience"><h2>Work experience</h2></section>
<section id="education"><h2>Education</h2></section>
<section id="software"><h2>Software</h2><ul><li>Python - advanced</li></ul></section>
<section id="languages"><h2>Languages</h2><ul></ul></section>
</body>
</html>
"#;

fn fixture_editor() -> (tempfile::TempDir, CvEditor) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("index.html");
    std::fs::write(&path, FIXTURE).expect("write fixture");
    (dir, CvEditor::new(path))
}

fn publication(title: &str) -> Publication {
    Publication {
        authors: "A. Quantrell".to_string(),
        title: title.to_string(),
        venue: "JMLR".to_string(),
        year: "2026".to_string(),
        ..Default::default()
    }
}

#[test]
fn unmodified_save_reparses_to_an_equivalent_tree() {
    let (_dir, editor) = fixture_editor();
    let before_sections = editor.list_sections().unwrap();
    let before_text = editor.section_content("publications").unwrap();

    let doc = editor.store().load().unwrap();
    editor.store().save(&doc).unwrap();

    assert_eq!(editor.list_sections().unwrap(), before_sections);
    assert_eq!(editor.section_content("publications").unwrap(), before_text);
}

#[test]
fn added_publications_come_back_in_reverse_call_order() {
    let (_dir, editor) = fixture_editor();
    editor.add_publication(&publication("First Added")).unwrap();
    editor.add_publication(&publication("Second Added")).unwrap();

    let text = editor.section_content("publications").unwrap();
    let second = text.find("Second Added").expect("second title present");
    let first = text.find("First Added").expect("first title present");
    let existing = text.find("Flow Matching at Scale").expect("old head present");
    assert!(second < first, "newest insertion must lead: {text}");
    assert!(first < existing);
    assert_eq!(editor.list_sections().unwrap()["publications"].entry_count, 5);
}

#[test]
fn add_then_remove_talk_restores_the_section() {
    let (_dir, editor) = fixture_editor();
    let before = editor.section_content("talks").unwrap();

    editor
        .add_talk(&Talk {
            date: "Feb 2026".to_string(),
            event_name: "QTML".to_string(),
            location: "Trieste, Italy".to_string(),
            talk_type: "Flash Talk".to_string(),
            talk_title: "Latent Surrogates".to_string(),
        })
        .unwrap();
    assert_eq!(editor.list_sections().unwrap()["talks"].entry_count, 2);

    let outcome = editor.remove_talk("latent surrogates").unwrap();
    assert!(matches!(outcome, RemoveOutcome::Removed { .. }));
    assert_eq!(editor.list_sections().unwrap()["talks"].entry_count, 1);
    assert_eq!(editor.section_content("talks").unwrap(), before);
}

#[test]
fn mutation_keeps_both_stamps_on_the_same_day() {
    let (dir, editor) = fixture_editor();
    editor.update_profile("Updated bio.").unwrap();

    let markup = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    let header = Regex::new(r"Curriculum vitae - ([A-Z][a-z]+ \d{2} \d{4})")
        .unwrap()
        .captures(&markup)
        .expect("header stamp present")[1]
        .to_string();
    let iso = Regex::new(r#""dateModified":\s*"(\d{4}-\d{2}-\d{2})""#)
        .unwrap()
        .captures(&markup)
        .expect("metadata stamp present")[1]
        .to_string();

    let header_day = NaiveDate::parse_from_str(&header, "%B %d %Y").unwrap();
    let iso_day = NaiveDate::parse_from_str(&iso, "%Y-%m-%d").unwrap();
    assert_eq!(header_day, iso_day);
}

#[test]
fn education_thesis_line_appears_only_when_supplied() {
    let (_dir, editor) = fixture_editor();
    editor
        .add_education(&Education {
            date_range: "2016 - 2019".to_string(),
            degree: "B.Sc. in Physics".to_string(),
            institution: "Sapienza".to_string(),
            location: "Rome, Italy".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert!(!editor.section_content("education").unwrap().contains("Thesis:"));

    editor
        .add_education(&Education {
            date_range: "2019 - 2021".to_string(),
            degree: "M.Sc. in Physics".to_string(),
            institution: "Sapienza".to_string(),
            location: "Rome, Italy".to_string(),
            thesis: Some("Neural Samplers".to_string()),
            ..Default::default()
        })
        .unwrap();
    let text = editor.section_content("education").unwrap();
    assert_eq!(text.matches("Neural Samplers").count(), 1);
    assert_eq!(text.matches("Thesis:").count(), 1);
}

#[test]
fn languages_replacement_and_emptying() {
    let (_dir, editor) = fixture_editor();
    let count = editor
        .update_languages(&["Italian - native".to_string(), "English - fluent".to_string()])
        .unwrap();
    assert_eq!(count, 2);

    let text = editor.section_content("languages").unwrap();
    let italian = text.find("Italian - native").unwrap();
    let english = text.find("English - fluent").unwrap();
    assert!(italian < english);
    assert_eq!(editor.list_sections().unwrap()["languages"].entry_count, 2);

    editor.update_languages(&[]).unwrap();
    assert_eq!(editor.list_sections().unwrap()["languages"].entry_count, 0);
}

#[test]
fn removing_a_nonexistent_publication_changes_nothing() {
    let (_dir, editor) = fixture_editor();
    let outcome = editor.remove_publication("nonexistent-paper").unwrap();
    assert_eq!(outcome, RemoveOutcome::NoMatch);
    assert_eq!(editor.list_sections().unwrap()["publications"].entry_count, 3);
}

#[test]
fn ambiguous_removal_reports_candidates_and_keeps_all_entries() {
    let (_dir, editor) = fixture_editor();
    let outcome = editor.remove_publication("quantrell").unwrap();
    match outcome {
        RemoveOutcome::Ambiguous { candidates } => {
            assert_eq!(candidates.len(), 2);
            assert!(candidates[0].contains("Flow Matching"));
            assert!(candidates[1].contains("Diffusion Guidance"));
        }
        other => panic!("expected Ambiguous, got {other:?}"),
    }
    assert_eq!(editor.list_sections().unwrap()["publications"].entry_count, 3);
}

#[test]
fn removal_match_is_case_insensitive() {
    let (_dir, editor) = fixture_editor();
    let outcome = editor.remove_publication("OLDER RESULTS").unwrap();
    assert!(matches!(outcome, RemoveOutcome::Removed { .. }));
    assert_eq!(editor.list_sections().unwrap()["publications"].entry_count, 2);
}

#[test]
fn missing_section_error_enumerates_known_ids() {
    let (_dir, editor) = fixture_editor();
    let err = editor.section_content("awards").err().expect("should miss");
    match &err {
        DocumentError::SectionMissing { known, .. } => {
            assert!(known.contains(&"publications".to_string()));
        }
        other => panic!("expected SectionMissing, got {other}"),
    }
    assert!(err.to_string().contains("languages"));
}

#[test]
fn profile_update_round_trip() {
    let (_dir, editor) = fixture_editor();
    assert_eq!(editor.profile().unwrap(), "Researcher in machine learning.");
    editor.update_profile("Now shipping samplers.").unwrap();
    assert_eq!(editor.profile().unwrap(), "Now shipping samplers.");
}

#[test]
fn work_experience_organization_is_linked_when_url_given() {
    let (_dir, editor) = fixture_editor();
    editor
        .add_work_experience(&WorkExperience {
            date_range: "Jan 2025 - Present".to_string(),
            job_title: "Research Engineer".to_string(),
            organization: "Helix Labs".to_string(),
            location: "Rome, Italy".to_string(),
            description: "Topic: amortized inference".to_string(),
            org_url: Some("https://helix.example".to_string()),
        })
        .unwrap();
    let raw = editor.raw_section("work-experience").unwrap();
    assert!(raw.contains(r#"<a href="https://helix.example">Helix Labs</a>"#));
}

#[test]
fn chronological_insert_lands_after_the_heading_when_section_is_empty() {
    let (_dir, editor) = fixture_editor();
    editor
        .add_work_experience(&WorkExperience {
            date_range: "2024".to_string(),
            job_title: "Consultant".to_string(),
            organization: "Acme".to_string(),
            location: "Milan, Italy".to_string(),
            description: "Tasks: forecasting".to_string(),
            org_url: None,
        })
        .unwrap();
    let text = editor.section_content("work-experience").unwrap();
    let heading = text.find("Work experience").unwrap();
    let entry = text.find("Consultant").unwrap();
    assert!(heading < entry);
}

#[test]
fn editing_a_missing_file_fails_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    let editor = CvEditor::new(&path);
    let err = editor.update_profile("x").err().expect("load should fail");
    assert!(matches!(err, DocumentError::NotFound(_)));
    assert!(!path.exists());
}

#[test]
fn parse_survives_a_serialize_round_trip_of_the_fixture() {
    let doc = Document::parse(FIXTURE).unwrap();
    let reparsed = Document::parse(&doc.serialize()).unwrap();
    assert_eq!(doc.list_sections(), reparsed.list_sections());
}
