//! Custom weakly-supervised entity model: token-level logistic heads trained
//! from bootstrapped pseudo-labels, persisted as a JSON artifact and served
//! through an atomically swappable slot.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use linfa::dataset::DatasetBase;
use linfa::prelude::{Fit, Predict};
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::nlp::bootstrap::{
    LabeledRecord, LABEL_CERTIFICATION, LABEL_SKILL_PHRASE, LABEL_TITLE,
};
use crate::nlp::embeddings::fnv1a;
use crate::nlp::preprocess::{tokenize_spans, Token};

/// Label families, in overlap-resolution priority order.
pub const LABELS: [&str; 3] = [LABEL_CERTIFICATION, LABEL_TITLE, LABEL_SKILL_PHRASE];

const FEATURE_DIM: usize = 256;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no usable training examples")]
    NoTrainingData,
    #[error("invalid labeled record: {0}")]
    BadLabelData(String),
    #[error("training failed for {label}: {message}")]
    Training { label: String, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("artifact serialization failed: {0}")]
    Artifact(#[from] serde_json::Error),
}

/// One binary logistic head: decision is `sigmoid(w . x + b) >= 0.5`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelHead {
    pub label: String,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

/// Persisted custom entity recognizer. Opaque to callers; exactly one
/// instance is active at a time via [`ModelSlot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomNer {
    pub created_at: DateTime<Utc>,
    pub feature_dim: usize,
    pub heads: Vec<LabelHead>,
}

/// Entity span predicted by the custom model.
#[derive(Debug, Clone)]
pub struct CustomSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub text: String,
}

impl CustomNer {
    /// Predict label spans over text: classify tokens per head, pick the
    /// highest-probability label above 0.5, then merge adjacent same-label
    /// tokens into spans.
    pub fn predict(&self, text: &str) -> Vec<CustomSpan> {
        let tokens = tokenize_spans(text);
        let mut token_labels: Vec<Option<&str>> = Vec::with_capacity(tokens.len());
        for idx in 0..tokens.len() {
            let features = featurize(&tokens, idx);
            let mut best: Option<(&str, f64)> = None;
            for head in &self.heads {
                let prob = sigmoid(score(&head.weights, head.intercept, &features));
                if prob >= 0.5 && best.map_or(true, |(_, p)| prob > p) {
                    best = Some((head.label.as_str(), prob));
                }
            }
            token_labels.push(best.map(|(label, _)| label));
        }

        let mut spans = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let Some(label) = token_labels[i] else {
                i += 1;
                continue;
            };
            let start = tokens[i].start;
            let mut end = tokens[i].end;
            let mut j = i + 1;
            while j < tokens.len() && token_labels[j] == Some(label) {
                end = tokens[j].end;
                j += 1;
            }
            spans.push(CustomSpan {
                start,
                end,
                label: label.to_string(),
                text: text[start..end].to_string(),
            });
            i = j;
        }
        spans
    }

    /// Persist the artifact as JSON.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(file, self)?;
        info!(path = %path.display(), heads = self.heads.len(), "saved custom model");
        Ok(())
    }

    /// Load a previously persisted artifact; absent or empty locations yield
    /// `None`, never an error.
    pub fn load(path: &Path) -> Option<CustomNer> {
        let metadata = std::fs::metadata(path).ok()?;
        if metadata.len() == 0 {
            return None;
        }
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(model) => Some(model),
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring unreadable custom model artifact");
                None
            }
        }
    }
}

/// Atomically swappable reference to the active custom model. Readers see
/// the old or new model in full, never a partially replaced state.
pub struct ModelSlot {
    inner: ArcSwapOption<CustomNer>,
}

impl ModelSlot {
    pub fn empty() -> Self {
        Self {
            inner: ArcSwapOption::from(None),
        }
    }

    /// Initialise from a persisted artifact when one exists.
    pub fn from_disk(path: &Path) -> Self {
        let slot = Self::empty();
        if let Some(model) = CustomNer::load(path) {
            info!(path = %path.display(), "loaded custom model");
            slot.replace(model);
        }
        slot
    }

    pub fn current(&self) -> Option<Arc<CustomNer>> {
        self.inner.load_full()
    }

    pub fn replace(&self, model: CustomNer) {
        self.inner.store(Some(Arc::new(model)));
    }
}

/// Train one logistic head per label from a JSONL store of weakly labeled
/// records. Overlapping weak spans resolve deterministically: longest span
/// wins, ties by label priority then start offset. Spans that do not align
/// to token boundaries are discarded.
pub fn train_custom_ner(labels_file: &Path, iterations: u64) -> Result<CustomNer, ModelError> {
    let content = std::fs::read_to_string(labels_file)?;
    let mut records = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: LabeledRecord = serde_json::from_str(line)
            .map_err(|err| ModelError::BadLabelData(format!("line {}: {err}", lineno + 1)))?;
        records.push(record);
    }

    let mut feature_rows: Vec<Vec<usize>> = Vec::new();
    let mut label_flags: Vec<[bool; 3]> = Vec::new();
    for record in &records {
        let tokens = tokenize_spans(&record.text);
        if tokens.is_empty() {
            continue;
        }
        let resolved = resolve_overlaps(&record.text, &record.entities);
        let mut flags = vec![[false; 3]; tokens.len()];
        for (start, end, label_idx) in resolved {
            let Some(range) = align_to_tokens(&tokens, start, end) else {
                continue;
            };
            for flag in flags.iter_mut().take(range.1 + 1).skip(range.0) {
                flag[label_idx] = true;
            }
        }
        for idx in 0..tokens.len() {
            feature_rows.push(featurize(&tokens, idx));
            label_flags.push(flags[idx]);
        }
    }

    if feature_rows.is_empty() {
        return Err(ModelError::NoTrainingData);
    }

    let x = build_matrix(&feature_rows);
    let mut heads = Vec::new();
    for (label_idx, label) in LABELS.iter().enumerate() {
        let targets: Vec<i32> = label_flags
            .iter()
            .map(|flags| i32::from(flags[label_idx]))
            .collect();
        let positives = targets.iter().filter(|t| **t == 1).count();
        if positives == 0 || positives == targets.len() {
            warn!(label, positives, "skipping label without both classes");
            continue;
        }
        let y = Array1::from(targets);
        let dataset: DatasetBase<_, _> = DatasetBase::new(x.clone(), y);
        let fitted = LogisticRegression::default()
            .max_iterations(iterations)
            .fit(&dataset)
            .map_err(|err| ModelError::Training {
                label: (*label).to_string(),
                message: err.to_string(),
            })?;

        let mut weights: Vec<f64> = fitted.params().iter().copied().collect();
        let mut intercept = fitted.intercept();
        // Orient the extracted weights so our own scorer agrees with the
        // fitted model's decisions.
        let predictions = fitted.predict(&dataset);
        let mut agree = 0usize;
        for (row, pred) in feature_rows.iter().zip(predictions.iter()) {
            let own = score(&weights, intercept, row) > 0.0;
            if own == (*pred == 1) {
                agree += 1;
            }
        }
        if agree * 2 < feature_rows.len() {
            for w in &mut weights {
                *w = -*w;
            }
            intercept = -intercept;
        }

        heads.push(LabelHead {
            label: (*label).to_string(),
            weights,
            intercept,
        });
    }

    if heads.is_empty() {
        return Err(ModelError::NoTrainingData);
    }

    info!(
        examples = feature_rows.len(),
        heads = heads.len(),
        iterations,
        "trained custom model"
    );
    Ok(CustomNer {
        created_at: Utc::now(),
        feature_dim: FEATURE_DIM,
        heads,
    })
}

/// Resolve overlapping weak spans: longest wins, ties by label priority then
/// start offset. Returns `(start, end, label_index)` triples.
fn resolve_overlaps(text: &str, entities: &[(usize, usize, String)]) -> Vec<(usize, usize, usize)> {
    let mut candidates: Vec<(usize, usize, usize)> = entities
        .iter()
        .filter_map(|(start, end, label)| {
            let label_idx = LABELS.iter().position(|l| l == label)?;
            if *start < *end && *end <= text.len() {
                Some((*start, *end, label_idx))
            } else {
                None
            }
        })
        .collect();
    candidates.sort_by(|a, b| {
        (b.1 - b.0)
            .cmp(&(a.1 - a.0))
            .then(a.2.cmp(&b.2))
            .then(a.0.cmp(&b.0))
    });

    let mut claimed: HashSet<usize> = HashSet::new();
    let mut resolved = Vec::new();
    for (start, end, label_idx) in candidates {
        if (start..end).any(|pos| claimed.contains(&pos)) {
            continue;
        }
        claimed.extend(start..end);
        resolved.push((start, end, label_idx));
    }
    resolved
}

/// Map a character span onto a token index range; spans that do not line up
/// with token boundaries are rejected.
fn align_to_tokens(tokens: &[Token], start: usize, end: usize) -> Option<(usize, usize)> {
    let first = tokens.iter().position(|t| t.start == start)?;
    let last = tokens.iter().position(|t| t.end == end)?;
    (first <= last).then_some((first, last))
}

/// Sparse binary features for one token: hashed lexical identity, affixes,
/// neighbours and shape cues.
fn featurize(tokens: &[Token], idx: usize) -> Vec<usize> {
    let token = &tokens[idx];
    let lower = token.text.to_lowercase();
    let mut active = Vec::with_capacity(8);
    let mut push = |key: String| {
        active.push((fnv1a(key.as_bytes()) % FEATURE_DIM as u64) as usize);
    };

    push(format!("w={lower}"));
    let chars: Vec<char> = lower.chars().collect();
    if chars.len() >= 3 {
        let suffix: String = chars[chars.len() - 3..].iter().collect();
        push(format!("suf={suffix}"));
        let prefix: String = chars[..3].iter().collect();
        push(format!("pre={prefix}"));
    }
    if let Some(prev) = idx.checked_sub(1).and_then(|i| tokens.get(i)) {
        push(format!("prev={}", prev.text.to_lowercase()));
    }
    if let Some(next) = tokens.get(idx + 1) {
        push(format!("next={}", next.text.to_lowercase()));
    }
    if token.text.chars().any(|c| c.is_ascii_digit()) {
        push("shape=digit".to_string());
    }
    if token.text.chars().next().is_some_and(|c| c.is_uppercase()) {
        push("shape=cap".to_string());
    }
    if token.text.contains('/') || token.text.contains('.') {
        push("shape=compound".to_string());
    }

    active.sort_unstable();
    active.dedup();
    active
}

fn build_matrix(rows: &[Vec<usize>]) -> Array2<f64> {
    let mut matrix = Array2::<f64>::zeros((rows.len(), FEATURE_DIM));
    for (row_idx, active) in rows.iter().enumerate() {
        for &feature in active {
            matrix[[row_idx, feature]] = 1.0;
        }
    }
    matrix
}

fn score(weights: &[f64], intercept: f64, active: &[usize]) -> f64 {
    active
        .iter()
        .map(|&feature| weights.get(feature).copied().unwrap_or(0.0))
        .sum::<f64>()
        + intercept
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
