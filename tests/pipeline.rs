use std::fs;
use std::path::Path;

use ats_lens::config::Settings;
use ats_lens::error::AppError;
use ats_lens::nlp::custom::CustomNer;
use ats_lens::nlp::{Pipeline, ScoreInput};

fn settings(dir: &Path) -> Settings {
    Settings {
        data_dir: dir.to_path_buf(),
        skills_db: dir.join("skills_db.txt"),
        raw_resumes_dir: dir.join("raw_resumes"),
        labels_file: dir.join("custom_ner.jsonl"),
        model_file: dir.join("custom_ner.json"),
        fuzzy_threshold: 90.0,
        suggest_top_n: 5,
        train_iterations: 100,
    }
}

#[test]
fn extract_rejects_empty_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = Pipeline::init(settings(dir.path())).expect("pipeline");
    let err = pipeline.extract("   \n  ").expect_err("empty text is invalid");
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn extract_synthesizes_skills_section_from_found_skills() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = Pipeline::init(settings(dir.path())).expect("pipeline");
    let outcome = pipeline
        .extract("Jane Doe\nExperience\nBuilt services in Python and Docker")
        .expect("extract succeeds");
    assert_eq!(
        outcome.normalized_skills,
        vec!["docker".to_string(), "python".to_string()]
    );
    // No skills header in the text; the section is synthesized.
    assert_eq!(outcome.sections.skills.as_deref(), Some("docker, python"));
    assert!(outcome.sections.experience.is_some());
}

#[test]
fn score_requires_a_job_description() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = Pipeline::init(settings(dir.path())).expect("pipeline");
    let err = pipeline
        .score(&ScoreInput {
            job_description: "   ".to_string(),
            ..ScoreInput::default()
        })
        .expect_err("blank job description is invalid");
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn empty_resume_scores_neutrally() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = Pipeline::init(settings(dir.path())).expect("pipeline");
    let outcome = pipeline
        .score(&ScoreInput {
            resume_text: Some(String::new()),
            job_description: "We need python engineers".to_string(),
            ..ScoreInput::default()
        })
        .expect("score succeeds");
    assert_eq!(outcome.matched_skills, Vec::<String>::new());
    assert_eq!(outcome.details.components.semantic, 0.0);
    assert!((0.0..=100.0).contains(&outcome.score));
}

#[test]
fn analyze_reuses_extracted_skills() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = Pipeline::init(settings(dir.path())).expect("pipeline");
    let (extracted, score) = pipeline
        .analyze(
            "Experience\nShipped Python services packaged with Docker",
            Some("Looking for python and terraform"),
            None,
        )
        .expect("analyze succeeds");
    assert!(extracted.normalized_skills.contains(&"docker".to_string()));
    let score = score.expect("job description present");
    assert_eq!(score.matched_skills, vec!["python".to_string()]);
    assert!(score.missing_keywords.is_empty());
}

#[test]
fn analyze_without_job_description_skips_scoring() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = Pipeline::init(settings(dir.path())).expect("pipeline");
    let (extracted, score) = pipeline
        .analyze("Skills\nPython, Docker", None, None)
        .expect("analyze succeeds");
    assert!(!extracted.normalized_skills.is_empty());
    assert!(score.is_none());
}

#[test]
fn retrain_trains_persists_and_hot_swaps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = settings(dir.path());
    fs::create_dir_all(&cfg.raw_resumes_dir).expect("resumes dir");
    fs::write(
        cfg.raw_resumes_dir.join("a.txt"),
        "Certified python developer with docker experience",
    )
    .expect("write a");
    fs::write(
        cfg.raw_resumes_dir.join("b.txt"),
        "Java engineer and aws certified architect",
    )
    .expect("write b");

    let pipeline = Pipeline::init(cfg.clone()).expect("pipeline");
    assert!(!pipeline.has_custom_model());

    let report = pipeline.retrain().expect("retrain succeeds");
    assert_eq!(report.documents, 2);
    assert_eq!(report.heads, 3);
    assert!(pipeline.has_custom_model());
    assert!(CustomNer::load(&cfg.model_file).is_some());
}

#[test]
fn failed_retrain_keeps_the_active_model() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = settings(dir.path());
    fs::create_dir_all(&cfg.raw_resumes_dir).expect("resumes dir");
    fs::write(
        cfg.raw_resumes_dir.join("a.txt"),
        "Certified python developer with docker experience",
    )
    .expect("write a");

    let pipeline = Pipeline::init(cfg.clone()).expect("pipeline");
    pipeline.retrain().expect("first retrain succeeds");
    assert!(pipeline.has_custom_model());

    // No resumes left: bootstrap yields an empty store and training fails.
    fs::remove_dir_all(&cfg.raw_resumes_dir).expect("remove resumes");
    let err = pipeline.retrain().expect_err("retrain without data fails");
    assert!(matches!(err, AppError::Retrain(_)));
    assert!(pipeline.has_custom_model());
    assert!(CustomNer::load(&cfg.model_file).is_some());
}
