use ats_lens::nlp::skills::{contains_term, partial_ratio, SkillsEngine};

#[test]
fn extracts_known_skills_sorted() {
    let engine = SkillsEngine::with_vocab(vec!["python".into(), "aws".into()], 90.0);
    let found = engine.extract("Built APIs in Python and deployed on AWS", None);
    assert_eq!(found, vec!["aws".to_string(), "python".to_string()]);
}

#[test]
fn synonyms_canonicalize_and_are_a_fixed_point() {
    let engine = SkillsEngine::from_defaults(90.0);
    assert_eq!(engine.canonical("js"), "javascript");
    assert_eq!(engine.canonical("javascript"), "javascript");
    assert_eq!(engine.canonical("K8s"), "kubernetes");

    let found = engine.extract("Experience with js and k8s deployments", None);
    assert!(found.contains(&"javascript".to_string()));
    assert!(found.contains(&"kubernetes".to_string()));
    // Canonical forms only, no raw aliases.
    assert!(!found.contains(&"js".to_string()));
    assert!(!found.contains(&"k8s".to_string()));
}

#[test]
fn lowering_threshold_never_removes_matches() {
    let text = "Worked with Pythn Terravorm and Dockker across several teams";
    let vocab: Vec<String> = ["python", "terraform", "docker", "kafka"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let strict = SkillsEngine::with_vocab(vocab.clone(), 85.0).extract(text, None);
    let loose = SkillsEngine::with_vocab(vocab, 70.0).extract(text, None);
    for skill in &strict {
        assert!(loose.contains(skill), "{skill} lost when threshold lowered");
    }
    assert!(loose.len() >= strict.len());
}

#[test]
fn fuzzy_pass_recovers_near_misses() {
    let engine = SkillsEngine::with_vocab(vec!["kubernetes".into()], 85.0);
    let found = engine.extract("Operated kubernets clusters in production", None);
    assert_eq!(found, vec!["kubernetes".to_string()]);
}

#[test]
fn skills_section_scopes_exact_matching() {
    let engine = SkillsEngine::with_vocab(vec!["python".into(), "kafka".into()], 99.0);
    let full = "Summary mentions kafka pipelines\nSkills: python";
    let found = engine.extract(full, Some("python"));
    // kafka is outside the focused section and only reachable via the fuzzy
    // pass, which still sees the full text.
    assert!(found.contains(&"python".to_string()));
    assert!(found.contains(&"kafka".to_string()));
}

#[test]
fn term_boundaries_prevent_substring_leaks() {
    assert!(contains_term("shipping with go services", "go"));
    assert!(!contains_term("google cloud", "go"));
    assert!(!contains_term("json payloads", "js"));
    assert!(contains_term("c++ and node.js", "node.js"));
}

#[test]
fn partial_ratio_is_100_for_exact_presence() {
    assert!((partial_ratio("python", "we use python daily") - 100.0).abs() < f64::EPSILON);
    assert!(partial_ratio("python", "we use pythn daily") >= 80.0);
    assert!(partial_ratio("python", "") == 0.0);
}

#[test]
fn missing_vocabulary_falls_back_to_defaults() {
    let engine = SkillsEngine::load(std::path::Path::new("/nonexistent/skills.txt"), 90.0);
    let found = engine.extract("python and docker background", None);
    assert!(found.contains(&"python".to_string()));
    assert!(found.contains(&"docker".to_string()));
}
