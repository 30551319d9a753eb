//! Text normalization, tokenization and language detection.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

static CTRL: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{0000}-\u{0008}\u{000B}\u{000C}\u{000E}-\u{001F}]").expect("valid regex"));
static BULLETS: Lazy<Regex> = Lazy::new(|| Regex::new("[•·●■▪▶►⦿◆]").expect("valid regex"));
static ARROWS: Lazy<Regex> = Lazy::new(|| Regex::new("[➔→⇒➤➣➢]").expect("valid regex"));
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static HSPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid regex"));
static TRAILING: Lazy<Regex> = Lazy::new(|| Regex::new(r" +\n").expect("valid regex"));

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
        "by", "as", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "can",
        "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me",
        "him", "her", "us", "them", "my", "your", "our", "their", "its", "from", "into",
        "about", "over", "under", "up", "down", "out", "so", "than", "then", "there", "here",
        "when", "where", "which", "who", "what", "how", "not", "no", "also", "such",
    ]
    .into_iter()
    .collect()
});

/// Post-processing toggles for [`clean_text`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    /// Preserve the original casing instead of case-folding.
    pub keep_case: bool,
    /// Drop English stop words after normalization.
    pub remove_stopwords: bool,
    /// Reduce tokens to their stem (approximation of lemmatization).
    pub lemmatize: bool,
}

/// Normalize raw text: NFKC, control-character and glyph cleanup, whitespace
/// collapsing and optional case folding / stop-word removal / stemming.
///
/// Pure and idempotent under default options; safe to call concurrently.
pub fn clean_text(text: &str, opts: &CleanOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out: String = text.nfkc().collect();
    out = CTRL.replace_all(&out, " ").into_owned();
    out = BULLETS.replace_all(&out, " - ").into_owned();
    out = ARROWS.replace_all(&out, " - ").into_owned();
    out = out.replace('\r', "\n");
    // Blank lines holding only spaces or tabs must be emptied before
    // newline runs collapse.
    out = HSPACE.replace_all(&out, " ").into_owned();
    out = TRAILING.replace_all(&out, "\n").into_owned();
    out = BLANK_RUNS.replace_all(&out, "\n\n").into_owned();
    out = out.trim().to_string();
    if !opts.keep_case {
        out = out.to_lowercase();
    }

    if opts.remove_stopwords || opts.lemmatize {
        let tokens: Vec<String> = out
            .split_whitespace()
            .filter(|tok| {
                !(opts.remove_stopwords && STOP_WORDS.contains(tok.to_lowercase().as_str()))
            })
            .map(|tok| {
                if opts.lemmatize {
                    STEMMER.stem(&tok.to_lowercase()).into_owned()
                } else {
                    tok.to_string()
                }
            })
            .collect();
        out = tokens.join(" ");
    }

    out
}

/// Best-effort language detection; `"unknown"` when no confident signal.
pub fn detect_language(text: &str) -> String {
    match whatlang::detect(text) {
        Some(info) => info.lang().code().to_string(),
        None => "unknown".to_string(),
    }
}

/// A token with byte offsets into its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Split text into word-like tokens, keeping byte offsets. Characters common
/// inside technical terms (`.`, `+`, `#`, `/`, `-`) stay part of a token.
pub fn tokenize_spans(text: &str) -> Vec<Token> {
    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '.' | '+' | '#' | '/' | '-')
    }

    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (idx, ch) in text.char_indices() {
        if is_word_char(ch) {
            if start.is_none() {
                start = Some(idx);
            }
        } else if let Some(s) = start.take() {
            tokens.push(Token {
                text: text[s..idx].to_string(),
                start: s,
                end: idx,
            });
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: text[s..].to_string(),
            start: s,
            end: text.len(),
        });
    }
    tokens
}
