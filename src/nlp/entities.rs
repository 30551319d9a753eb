//! Entity bundle assembly: deterministic contact patterns, the general NER
//! and the optional custom weakly-supervised model.

use std::collections::HashSet;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use phonenumber::{country, Mode};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::nlp::custom::CustomNer;
use crate::nlp::ner::{Ner, NerLabel};

/// Extracted entities grouped by category. Ordered and de-duplicated;
/// custom-model categories are empty when no model is active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    pub names: Vec<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub organizations: Vec<String>,
    pub dates: Vec<String>,
    pub locations: Vec<String>,
    pub certifications: Vec<String>,
    pub titles: Vec<String>,
    pub skill_phrases: Vec<String>,
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").expect("valid regex"));

static PHONE_CANDIDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{6,}\d").expect("valid regex"));

const DEFAULT_PHONE_REGION: country::Id = country::US;

static ORG_BLACKLIST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["spring framework", "kubernetes", "junit", "docker", "git"]
        .into_iter()
        .collect()
});

/// Order-preserving de-duplication of trimmed, non-empty values.
pub fn dedup_preserve<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: IndexSet<String> = IndexSet::new();
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            seen.insert(trimmed.to_string());
        }
    }
    seen.into_iter().collect()
}

/// Extract the full entity bundle from (near-raw) text.
pub fn extract_entities(text: &str, ner: &dyn Ner, custom: Option<&CustomNer>) -> Entities {
    let emails = dedup_preserve(EMAIL_RE.find_iter(text).map(|m| m.as_str().to_string()));
    let phones = extract_phones(text);

    let mut names = Vec::new();
    let mut organizations = Vec::new();
    let mut dates = Vec::new();
    let mut locations = Vec::new();
    for span in ner.extract(text) {
        match span.label {
            NerLabel::Person => names.push(span.text),
            NerLabel::Organization => organizations.push(span.text),
            NerLabel::Date => dates.push(span.text),
            NerLabel::Location => locations.push(span.text),
        }
    }

    let mut certifications = Vec::new();
    let mut titles = Vec::new();
    let mut skill_phrases = Vec::new();
    if let Some(model) = custom {
        for span in model.predict(text) {
            match span.label.as_str() {
                "CERTIFICATION" => certifications.push(span.text),
                "TITLE" => titles.push(span.text),
                "SKILL_PHRASE" => skill_phrases.push(span.text),
                _ => {}
            }
        }
    }

    Entities {
        names: dedup_preserve(clean_names(names)),
        emails,
        phones,
        organizations: dedup_preserve(clean_orgs(organizations)),
        dates: dedup_preserve(dates),
        locations: dedup_preserve(locations),
        certifications: dedup_preserve(certifications),
        titles: dedup_preserve(titles),
        skill_phrases: dedup_preserve(skill_phrases),
    }
}

/// Keep names with 2-4 whitespace tokens that do not leak the skills header.
fn clean_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| {
            let tokens = name.split_whitespace().count();
            (2..=4).contains(&tokens) && !name.to_lowercase().starts_with("skills")
        })
        .collect()
}

/// Drop known false positives and trivially short organization strings.
fn clean_orgs(orgs: Vec<String>) -> Vec<String> {
    orgs.into_iter()
        .filter(|org| !ORG_BLACKLIST.contains(org.to_lowercase().as_str()) && org.len() > 2)
        .collect()
}

/// Replace exotic whitespace, dash and parenthesis variants that routinely
/// break phone grammars.
fn normalize_phone_chars(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{2009}' | '\u{2002}' => ' ',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{FF08}' => '(',
            '\u{FF09}' => ')',
            other => other,
        })
        .collect()
}

/// Region-aware phone extraction: candidates parsed with the default region
/// first, then a no-region pass for explicit country-code numbers; output is
/// E.164, de-duplicated. Strict metadata validation rejects reserved ranges
/// common in resumes (US 555 exchanges), so when the valid passes find
/// nothing a relaxed pass accepts parsed numbers of plausible length.
fn extract_phones(text: &str) -> Vec<String> {
    let normalized = normalize_phone_chars(text);
    for strict in [true, false] {
        for region in [Some(DEFAULT_PHONE_REGION), None] {
            let phones = parse_candidates(&normalized, region, strict);
            if !phones.is_empty() {
                return dedup_preserve(phones);
            }
        }
    }
    Vec::new()
}

fn parse_candidates(text: &str, region: Option<country::Id>, strict: bool) -> Vec<String> {
    PHONE_CANDIDATE_RE
        .find_iter(text)
        .filter_map(|m| {
            let number = phonenumber::parse(region, m.as_str()).ok()?;
            let keep = if strict {
                phonenumber::is_valid(&number)
            } else {
                plausible_length(&number)
            };
            keep.then(|| phonenumber::format(&number).mode(Mode::E164).to_string())
        })
        .collect()
}

// 10-15 national digits: keeps full numbers with an area code and rejects
// the 8-digit year ranges the candidate regex also picks up.
fn plausible_length(number: &phonenumber::PhoneNumber) -> bool {
    let digits = number.national().value().to_string().len();
    (10..=15).contains(&digits)
}
