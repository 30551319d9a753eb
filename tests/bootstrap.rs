use std::fs;

use ats_lens::nlp::bootstrap::{
    bootstrap_directory, bootstrap_record, LabeledRecord, LABEL_CERTIFICATION, LABEL_SKILL_PHRASE,
    LABEL_TITLE,
};

#[test]
fn certification_keywords_are_labeled() {
    let text = "AWS Certified Solutions Architect since 2021";
    let record = bootstrap_record(text);
    let cert_spans: Vec<String> = record
        .entities
        .iter()
        .filter(|(_, _, label)| label == LABEL_CERTIFICATION)
        .map(|(s, e, _)| text[*s..*e].to_lowercase())
        .collect();
    assert!(cert_spans.contains(&"certified".to_string()));
    assert!(cert_spans.contains(&"aws certified".to_string()));
}

#[test]
fn title_keywords_match_inside_compound_words() {
    let record = bootstrap_record("Senior Software Engineering Lead");
    let title = record
        .entities
        .iter()
        .find(|(_, _, label)| label == LABEL_TITLE)
        .expect("title span");
    assert_eq!(&record.text[title.0..title.1], "Engineering");
}

#[test]
fn skill_keywords_are_word_anchored() {
    let record = bootstrap_record("Wrote java services; no javascript here");
    let spans: Vec<&str> = record
        .entities
        .iter()
        .filter(|(_, _, label)| label == LABEL_SKILL_PHRASE)
        .map(|(s, e, _)| &record.text[*s..*e])
        .collect();
    assert_eq!(spans, vec!["java"]);
}

#[test]
fn overlapping_labels_are_kept() {
    // "aws certified" (CERTIFICATION) overlaps "aws" (SKILL_PHRASE).
    let record = bootstrap_record("aws certified engineer");
    let has_cert = record
        .entities
        .iter()
        .any(|(_, _, l)| l == LABEL_CERTIFICATION);
    let has_skill = record
        .entities
        .iter()
        .any(|(s, e, l)| l == LABEL_SKILL_PHRASE && &record.text[*s..*e] == "aws");
    assert!(has_cert && has_skill);
}

#[test]
fn directory_bootstrap_writes_one_json_record_per_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("resumes");
    fs::create_dir_all(&input).expect("input dir");
    fs::write(input.join("a.txt"), "Certified python developer").expect("write a");
    fs::write(input.join("b.txt"), "Java engineer with docker").expect("write b");
    fs::write(input.join("ignored.md"), "not a resume").expect("write md");

    let output = dir.path().join("labels.jsonl");
    let count = bootstrap_directory(&input, &output).expect("bootstrap");
    assert_eq!(count, 2);

    let content = fs::read_to_string(&output).expect("read output");
    let records: Vec<LabeledRecord> = content
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid record"))
        .collect();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(!record.entities.is_empty());
        for (start, end, _) in &record.entities {
            assert!(start < end && *end <= record.text.len());
        }
    }
}

#[test]
fn missing_directory_produces_empty_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("labels.jsonl");
    let count = bootstrap_directory(&dir.path().join("nope"), &output).expect("bootstrap");
    assert_eq!(count, 0);
    assert_eq!(fs::read_to_string(&output).expect("read").len(), 0);
}
