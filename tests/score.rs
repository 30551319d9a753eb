use ats_lens::nlp::score::{compute_match_score, WEIGHTS};

fn skills(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn missing_required_skills_are_reported() {
    let required = skills(&["python", "terraform"]);
    let result = compute_match_score(
        &skills(&["python"]),
        "We need python and terraform experience",
        Some(&required),
        0.5,
    );
    assert_eq!(result.missing_keywords, vec!["terraform".to_string()]);
    assert!((result.components.required_cov - 0.5).abs() < 1e-9);
}

#[test]
fn no_required_skills_means_full_required_coverage() {
    let result = compute_match_score(&skills(&["python"]), "any job description", None, 0.0);
    assert!((result.components.required_cov - 1.0).abs() < 1e-9);
}

#[test]
fn total_is_bounded_and_components_are_unit_interval() {
    let many: Vec<String> = (0..40).map(|i| format!("skill{i}")).collect();
    let jd = many.join(" ");
    let required = skills(&["skill1", "skill2"]);
    let result = compute_match_score(&many, &jd, Some(&required), 1.0);
    assert!(result.total <= 100.0);
    assert!(result.total >= 0.0);
    for component in [
        result.components.skills_cov,
        result.components.required_cov,
        result.components.semantic,
        result.components.sections_cov,
    ] {
        assert!((0.0..=1.0).contains(&component), "component {component} out of range");
    }

    let empty = compute_match_score(&[], "unrelated posting", None, 0.0);
    assert!(empty.total >= 0.0 && empty.total <= 100.0);
    assert_eq!(empty.matched_skills, Vec::<String>::new());
}

#[test]
fn matched_skills_are_sorted_and_capped() {
    let result = compute_match_score(
        &skills(&["rust", "aws", "python"]),
        "Looking for python rust aws engineers",
        None,
        0.0,
    );
    assert_eq!(
        result.matched_skills,
        vec!["aws".to_string(), "python".to_string(), "rust".to_string()]
    );
    assert!((result.components.skills_cov - 3.0 / 20.0).abs() < 1e-9);
}

#[test]
fn semantic_input_is_clamped() {
    let result = compute_match_score(&[], "role", None, 7.5);
    assert!((result.components.semantic - 1.0).abs() < 1e-9);
    let negative = compute_match_score(&[], "role", None, -3.0);
    assert!(negative.components.semantic.abs() < 1e-9);
}

#[test]
fn section_mentions_earn_bonus() {
    let result = compute_match_score(
        &skills(&["python"]),
        "Experience and education required; skills in projects; see summary",
        None,
        0.0,
    );
    assert!((result.components.sections_cov - 1.0).abs() < 1e-9);
    assert_eq!(WEIGHTS.sections, 10);
}
