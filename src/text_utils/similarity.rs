use super::split::split_text_into_word_set;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lexical overlap score between two adjacent sentences, in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMeasure {
    /// `|A ∩ B| / |A ∪ B|`
    #[default]
    Jaccard,
    /// `|A ∩ B| / min(|A|, |B|)`. Scores short sentences against long ones higher.
    Overlap,
}

impl SimilarityMeasure {
    pub fn score(&self, a: &str, b: &str) -> f32 {
        self.score_sets(&split_text_into_word_set(a), &split_text_into_word_set(b))
    }

    /// Scores precomputed word sets. Either set being empty scores 0.
    pub fn score_sets(&self, a: &HashSet<String>, b: &HashSet<String>) -> f32 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let intersection = a.intersection(b).count();
        let denominator = match self {
            Self::Jaccard => a.len() + b.len() - intersection,
            Self::Overlap => a.len().min(b.len()),
        };
        intersection as f32 / denominator as f32
    }
}

/// Jaccard similarity of the lower-cased word sets of two sentences.
pub fn sentence_similarity(a: &str, b: &str) -> f32 {
    SimilarityMeasure::Jaccard.score(a, b)
}
