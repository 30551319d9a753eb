//! Embedding backend, semantic similarity and term suggestions.
//!
//! With the `embeddings` feature the backend is a MiniLM model via fastembed;
//! otherwise a deterministic hashed bag-of-tokens projection keeps the same
//! contract without model downloads.

use anyhow::Result;
use indexmap::IndexSet;

#[cfg(feature = "embeddings")]
use fastembed::TextEmbedding;

use crate::nlp::preprocess::{clean_text, CleanOptions};

#[cfg(not(feature = "embeddings"))]
const HASHED_DIM: usize = 384;

/// Shared embedding model; loaded once, read-only afterwards.
pub struct Embedder {
    #[cfg(feature = "embeddings")]
    model: TextEmbedding,
}

impl Embedder {
    pub fn init() -> Result<Self> {
        #[cfg(feature = "embeddings")]
        {
            let model = TextEmbedding::try_new(Default::default())?;
            Ok(Self { model })
        }
        #[cfg(not(feature = "embeddings"))]
        Ok(Self {})
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        #[cfg(feature = "embeddings")]
        {
            Ok(self.model.embed(texts.to_vec(), None)?)
        }
        #[cfg(not(feature = "embeddings"))]
        Ok(texts.iter().map(|t| hashed_embedding(t)).collect())
    }

    /// Cosine similarity of the two texts, clamped to [0, 1]. Empty input on
    /// either side yields exactly 0.0.
    pub fn similarity(&self, resume_text: &str, jd_text: &str) -> Result<f64> {
        if resume_text.trim().is_empty() || jd_text.trim().is_empty() {
            return Ok(0.0);
        }
        let opts = CleanOptions {
            keep_case: false,
            remove_stopwords: true,
            lemmatize: true,
        };
        let resume_clean = clean_text(resume_text, &opts);
        let jd_clean = clean_text(jd_text, &opts);
        if resume_clean.is_empty() || jd_clean.is_empty() {
            return Ok(0.0);
        }
        let vectors = self.embed_batch(&[&resume_clean, &jd_clean])?;
        let sim = cosine(&vectors[0], &vectors[1]);
        Ok(sim.clamp(0.0, 1.0))
    }

    /// Rank job-description terms absent from the candidate skill set by
    /// embedding proximity to the aggregate skill embedding. Ties keep the
    /// original token order.
    pub fn suggest_terms(
        &self,
        resume_skills: &[String],
        jd_text: &str,
        top_n: usize,
    ) -> Result<Vec<String>> {
        if jd_text.trim().is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }
        let opts = CleanOptions {
            keep_case: false,
            remove_stopwords: true,
            lemmatize: true,
        };
        let jd_clean = clean_text(jd_text, &opts);
        let jd_tokens: IndexSet<String> =
            jd_clean.split_whitespace().map(|t| t.to_string()).collect();

        let candidates: IndexSet<String> =
            resume_skills.iter().map(|s| s.to_lowercase()).collect();
        let remaining: Vec<String> = jd_tokens
            .into_iter()
            .filter(|tok| !candidates.contains(tok))
            .collect();
        if remaining.is_empty() {
            return Ok(Vec::new());
        }

        let mut sorted_skills: Vec<&str> = candidates.iter().map(String::as_str).collect();
        sorted_skills.sort_unstable();
        let aggregate = if sorted_skills.is_empty() {
            " ".to_string()
        } else {
            sorted_skills.join(" ")
        };

        let mut inputs: Vec<&str> = remaining.iter().map(String::as_str).collect();
        inputs.push(&aggregate);
        let mut vectors = self.embed_batch(&inputs)?;
        let skill_vec = vectors.pop().unwrap_or_default();

        let mut ranked: Vec<(String, f64)> = remaining
            .into_iter()
            .zip(vectors)
            .map(|(tok, vec)| {
                let sim = cosine(&skill_vec, &vec);
                (tok, sim)
            })
            .collect();
        // Stable sort keeps original token order for ties.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked.into_iter().take(top_n).map(|(tok, _)| tok).collect())
    }
}

/// Deterministic L2-normalized hashed bag-of-tokens vector.
#[cfg(not(feature = "embeddings"))]
fn hashed_embedding(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; HASHED_DIM];
    for token in text.split_whitespace() {
        let bucket = (fnv1a(token.as_bytes()) % HASHED_DIM as u64) as usize;
        vector[bucket] += 1.0;
    }
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}

/// Stable 64-bit FNV-1a hash; must not depend on process-randomized hashers.
pub(crate) fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum::<f64>();
    let norm_a = a.iter().map(|v| f64::from(*v) * f64::from(*v)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|v| f64::from(*v) * f64::from(*v)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
