//! Resume section segmentation based on line-anchored header phrases.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical section bodies; `None` means "no evidence", not "empty".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sections {
    pub summary: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub certifications: Option<String>,
    pub projects: Option<String>,
}

/// Header aliases in fixed declaration order; ties at the same offset resolve
/// by this order.
const HEADERS: &[(&str, Canonical)] = &[
    ("education", Canonical::Education),
    ("experience", Canonical::Experience),
    ("work experience", Canonical::Experience),
    ("professional experience", Canonical::Experience),
    ("skills", Canonical::Skills),
    ("technical skills", Canonical::Skills),
    ("competencies", Canonical::Skills),
    ("core skills", Canonical::Skills),
    ("tech stack", Canonical::Skills),
    ("summary", Canonical::Summary),
    ("profile", Canonical::Summary),
    ("objective", Canonical::Summary),
    ("certifications", Canonical::Certifications),
    ("licenses", Canonical::Certifications),
    ("projects", Canonical::Projects),
    ("publications", Canonical::Projects),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Canonical {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
}

static HEADER_PATTERNS: Lazy<Vec<(Regex, Canonical)>> = Lazy::new(|| {
    HEADERS
        .iter()
        .map(|(alias, canonical)| {
            let pattern = format!(r"(?im)^[ \t]*{}\b[ \t]*[:\-]?[^\n]*$", regex::escape(alias));
            (Regex::new(&pattern).expect("valid header regex"), *canonical)
        })
        .collect()
});

#[derive(Debug)]
struct HeaderHit {
    start: usize,
    line_end: usize,
    decl_idx: usize,
    canonical: Canonical,
}

/// Slice normalized text into named sections. Zero recognized headers yield
/// all-absent sections.
pub fn split_sections(text: &str) -> Sections {
    let mut hits: Vec<HeaderHit> = Vec::new();
    for (decl_idx, (pattern, canonical)) in HEADER_PATTERNS.iter().enumerate() {
        for m in pattern.find_iter(text) {
            hits.push(HeaderHit {
                start: m.start(),
                line_end: m.end(),
                decl_idx,
                canonical: *canonical,
            });
        }
    }
    hits.sort_by_key(|h| (h.start, h.decl_idx));
    hits.dedup_by_key(|h| h.start);

    let mut sections = Sections::default();
    for (i, hit) in hits.iter().enumerate() {
        let end = hits.get(i + 1).map_or(text.len(), |next| next.start);
        let body_start = hit.line_end.min(end);
        let body = text[body_start..end].trim().to_string();
        let slot = match hit.canonical {
            Canonical::Summary => &mut sections.summary,
            Canonical::Experience => &mut sections.experience,
            Canonical::Education => &mut sections.education,
            Canonical::Skills => &mut sections.skills,
            Canonical::Certifications => &mut sections.certifications,
            Canonical::Projects => &mut sections.projects,
        };
        // First non-empty body per canonical name wins.
        let filled = slot.as_ref().is_some_and(|s| !s.is_empty());
        if !filled {
            *slot = Some(body);
        }
    }
    sections
}
