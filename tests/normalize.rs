use ats_lens::nlp::preprocess::{clean_text, detect_language, CleanOptions};
use proptest::prelude::*;

fn default_opts() -> CleanOptions {
    CleanOptions::default()
}

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(clean_text("", &default_opts()), "");
}

#[test]
fn bullets_become_dashes_and_whitespace_collapses() {
    let out = clean_text("Skills\n• Python   \t• Rust", &default_opts());
    assert_eq!(out, "skills\n - python - rust");
}

#[test]
fn control_characters_are_replaced() {
    let out = clean_text("hello\u{0007}world", &default_opts());
    assert_eq!(out, "hello world");
}

#[test]
fn carriage_returns_and_blank_runs_collapse() {
    let out = clean_text("a\r\n\r\n\r\n\r\nb", &default_opts());
    assert_eq!(out, "a\n\nb");
}

#[test]
fn blank_lines_holding_only_tabs_collapse_in_one_pass() {
    let out = clean_text("a\n\t\n\nA", &default_opts());
    assert_eq!(out, "a\n\na");
    assert_eq!(clean_text(&out, &default_opts()), out);
}

#[test]
fn keep_case_preserves_casing() {
    let opts = CleanOptions {
        keep_case: true,
        ..CleanOptions::default()
    };
    assert_eq!(clean_text("Jane Doe", &opts), "Jane Doe");
    assert_eq!(clean_text("Jane Doe", &default_opts()), "jane doe");
}

#[test]
fn stopwords_are_removed_when_requested() {
    let opts = CleanOptions {
        remove_stopwords: true,
        ..CleanOptions::default()
    };
    let out = clean_text("worked on the backend for a bank", &opts);
    assert_eq!(out, "worked backend bank");
}

#[test]
fn stemming_reduces_inflected_forms() {
    let opts = CleanOptions {
        lemmatize: true,
        ..CleanOptions::default()
    };
    let out = clean_text("running tested", &opts);
    assert_eq!(out, "run test");
}

#[test]
fn language_detection_never_fails() {
    assert_eq!(
        detect_language("This is a perfectly ordinary English paragraph about software."),
        "eng"
    );
    // Too little signal degrades to the sentinel, not an error.
    assert_eq!(detect_language(""), "unknown");
}

proptest! {
    #[test]
    fn normalization_is_idempotent(text in r"[ -~\t\n•·→➤]{0,200}") {
        let opts = default_opts();
        let once = clean_text(&text, &opts);
        let twice = clean_text(&once, &opts);
        prop_assert_eq!(once, twice);
    }
}
