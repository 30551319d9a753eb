//! General-purpose NER behind a trait seam. The default implementation is
//! rule/gazetteer based; swap with a statistical backend when enabled.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

/// Entity categories recognized by the general model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NerLabel {
    Person,
    Organization,
    Date,
    Location,
}

/// Extracted entity span with byte offsets relative to the source text.
#[derive(Debug, Clone)]
pub struct NerSpan {
    pub start: usize,
    pub end: usize,
    pub label: NerLabel,
    pub text: String,
}

/// Trait for NER implementations.
pub trait Ner: Send + Sync {
    fn extract(&self, text: &str) -> Vec<NerSpan>;
}

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}\b",
        )
        .expect("valid regex"),
        Regex::new(r"\b(19|20)\d{2}\s*[-–]\s*((19|20)\d{2}|[Pp]resent)\b").expect("valid regex"),
        Regex::new(r"\b\d{1,2}/(19|20)\d{2}\b").expect("valid regex"),
        Regex::new(r"\b(19|20)\d{2}\b").expect("valid regex"),
    ]
});

static ORG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:[A-Z][A-Za-z&.]+[ \t]+)*(?:Inc|LLC|Ltd|Corp|Corporation|Company|Group|Technologies|Solutions|Systems|Labs|Software|Consulting|University|College|Institute)\b\.?",
    )
    .expect("valid regex")
});

static PERSON_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+(?:[ \t][A-Z][a-z]+){1,3}\b").expect("valid regex"));

const LOCATION_TERMS: &[&str] = &[
    "new york",
    "san francisco",
    "seattle",
    "austin",
    "boston",
    "chicago",
    "london",
    "berlin",
    "paris",
    "amsterdam",
    "bangalore",
    "mumbai",
    "toronto",
    "sydney",
    "singapore",
    "remote",
    "california",
    "texas",
    "washington",
    "united states",
    "united kingdom",
    "germany",
    "india",
    "canada",
    "australia",
];

struct GazetteerNer;

impl Ner for GazetteerNer {
    fn extract(&self, text: &str) -> Vec<NerSpan> {
        let mut spans = Vec::new();
        for pattern in DATE_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                if overlaps(&spans, m.start(), m.end()) {
                    continue;
                }
                spans.push(span(text, m.start(), m.end(), NerLabel::Date));
            }
        }
        for m in ORG_PATTERN.find_iter(text) {
            if overlaps(&spans, m.start(), m.end()) {
                continue;
            }
            spans.push(span(text, m.start(), m.end(), NerLabel::Organization));
        }
        spans.extend(find_locations(text, &spans));
        // Person candidates last so orgs, dates and locations claim their
        // spans first; downstream filters prune the rest.
        let claimed = spans.clone();
        for m in PERSON_PATTERN.find_iter(text) {
            if overlaps(&claimed, m.start(), m.end()) {
                continue;
            }
            spans.push(span(text, m.start(), m.end(), NerLabel::Person));
        }
        spans
    }
}

fn span(text: &str, start: usize, end: usize, label: NerLabel) -> NerSpan {
    NerSpan {
        start,
        end,
        label,
        text: text[start..end].to_string(),
    }
}

fn overlaps(spans: &[NerSpan], start: usize, end: usize) -> bool {
    spans.iter().any(|s| start < s.end && s.start < end)
}

fn find_locations(text: &str, claimed: &[NerSpan]) -> Vec<NerSpan> {
    let lower = text.to_lowercase();
    let mut spans = Vec::new();
    for term in LOCATION_TERMS {
        let mut from = 0;
        while let Some(pos) = lower[from..].find(term) {
            let start = from + pos;
            let end = start + term.len();
            from = end;
            let boundary_ok = lower[..start].chars().next_back().map_or(true, |c| !c.is_alphanumeric())
                && lower[end..].chars().next().map_or(true, |c| !c.is_alphanumeric());
            // Offsets come from the lowercased copy; they can drift from the
            // original when case folding changes byte lengths.
            let Some(original) = text.get(start..end) else {
                continue;
            };
            if boundary_ok && !overlaps(claimed, start, end) && !overlaps(&spans, start, end) {
                spans.push(NerSpan {
                    start,
                    end,
                    label: NerLabel::Location,
                    text: original.to_string(),
                });
            }
        }
    }
    spans
}

/// Load the gazetteer-backed NER implementation.
pub fn load_model() -> Arc<dyn Ner> {
    Arc::new(GazetteerNer) as Arc<dyn Ner>
}
