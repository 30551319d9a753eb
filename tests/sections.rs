use ats_lens::nlp::sections::split_sections;

#[test]
fn splits_headered_resume_into_sections() {
    let text = "Summary\nSeasoned backend engineer.\n\nWork Experience\nAcme Corp, 2019-2023\n\nSkills\nRust, Python, SQL\n\nEducation\nBSc Computer Science";
    let sections = split_sections(text);
    assert_eq!(sections.summary.as_deref(), Some("Seasoned backend engineer."));
    assert_eq!(sections.experience.as_deref(), Some("Acme Corp, 2019-2023"));
    assert_eq!(sections.skills.as_deref(), Some("Rust, Python, SQL"));
    assert_eq!(sections.education.as_deref(), Some("BSc Computer Science"));
    assert_eq!(sections.certifications, None);
    assert_eq!(sections.projects, None);
}

#[test]
fn zero_headers_yield_all_absent() {
    let sections = split_sections("just a plain paragraph with no recognizable headers at all");
    assert_eq!(sections, Default::default());
}

#[test]
fn aliases_canonicalize() {
    let text = "Objective\nFind a great role.\n\nTechnical Skills\nGo, Docker\n\nLicenses\nPE License\n\nPublications\nA paper";
    let sections = split_sections(text);
    assert_eq!(sections.summary.as_deref(), Some("Find a great role."));
    assert_eq!(sections.skills.as_deref(), Some("Go, Docker"));
    assert_eq!(sections.certifications.as_deref(), Some("PE License"));
    assert_eq!(sections.projects.as_deref(), Some("A paper"));
}

#[test]
fn first_non_empty_body_wins() {
    let text = "Summary\n\nObjective\nSeeking a senior role.";
    let sections = split_sections(text);
    assert_eq!(sections.summary.as_deref(), Some("Seeking a senior role."));
}

#[test]
fn headers_allow_trailing_punctuation() {
    let text = "Skills: Python, Terraform\nExperience -\nShipped things.";
    let sections = split_sections(text);
    assert!(sections.skills.is_some());
    assert_eq!(sections.experience.as_deref(), Some("Shipped things."));
}

#[test]
fn embedded_words_do_not_match_headers() {
    let sections = split_sections("experienced in sales\nskillset oriented");
    assert_eq!(sections, Default::default());
}
