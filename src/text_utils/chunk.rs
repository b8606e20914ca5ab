use super::{
    similarity::SimilarityMeasure,
    split::{split_text_into_sentences, split_text_into_word_set},
};
use crate::{bail, Result};
use serde::{Deserialize, Serialize};

/// Chunks whose trimmed length is at most this many characters are dropped.
pub const MIN_CHUNK_CHARS: usize = 5;
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;
pub const DEFAULT_CHUNK_SIZE: usize = 600;
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;
/// A window is cut back to a `". "` found within this many trailing characters.
pub const DEFAULT_SNAP_WINDOW: usize = 50;

/// Groups adjacent sentences into chunks, breaking where the lexical overlap of a
/// sentence with its predecessor is not above `threshold`.
pub fn chunk_by_similarity(text: &str, threshold: f32) -> Vec<String> {
    SimilarityChunker::new().threshold(threshold).run(text)
}

/// Cuts `text` into windows of at most `chunk_size` characters, each starting
/// `overlap` characters before the previous one ended.
pub fn chunk_fixed_size(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    FixedSizeChunker::new()
        .chunk_size(chunk_size)
        .overlap(overlap)
        .run(text)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityChunker {
    pub threshold: f32,
    pub measure: SimilarityMeasure,
}

impl Default for SimilarityChunker {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            measure: SimilarityMeasure::default(),
        }
    }
}

impl SimilarityChunker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn measure(mut self, measure: SimilarityMeasure) -> Self {
        self.measure = measure;
        self
    }

    pub fn run(&self, text: &str) -> Vec<String> {
        let sentences = split_text_into_sentences(text);
        let Some(first) = sentences.first() else {
            return Vec::new();
        };
        let word_sets: Vec<_> = sentences
            .iter()
            .map(|sentence| split_text_into_word_set(sentence))
            .collect();

        let mut chunks = Vec::new();
        let mut current_chunk = vec![*first];
        for i in 1..sentences.len() {
            let score = self.measure.score_sets(&word_sets[i - 1], &word_sets[i]);
            if score > self.threshold {
                current_chunk.push(sentences[i]);
            } else {
                chunks.push(current_chunk.join(" "));
                current_chunk = vec![sentences[i]];
            }
        }
        chunks.push(current_chunk.join(" "));

        let chunks: Vec<String> = chunks
            .iter()
            .filter_map(|chunk| keep_chunk(chunk))
            .collect();
        tracing::debug!(
            sentences = sentences.len(),
            chunks = chunks.len(),
            threshold = self.threshold,
            "similarity chunking done"
        );
        chunks
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedSizeChunker {
    pub chunk_size: usize,
    pub overlap: usize,
    pub snap_window: usize,
}

impl Default for FixedSizeChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
            snap_window: DEFAULT_SNAP_WINDOW,
        }
    }
}

impl FixedSizeChunker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn snap_window(mut self, snap_window: usize) -> Self {
        self.snap_window = snap_window;
        self
    }

    /// An overlap of a whole window or more would never move the cursor forward.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            bail!("chunk_size must be greater than 0");
        }
        if self.overlap >= self.chunk_size {
            bail!(
                "overlap must be smaller than chunk_size. overlap: {}, chunk_size: {}",
                self.overlap,
                self.chunk_size
            );
        }
        Ok(())
    }

    pub fn run(&self, text: &str) -> Result<Vec<String>> {
        self.validate()?;

        // Byte offset of every char boundary, so the window is measured in characters.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let text_len = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < text_len {
            let mut end = start + self.chunk_size;
            let mut window = &text[boundaries[start]..boundaries[end.min(text_len)]];

            if end < text_len {
                if let Some(period_byte) = window.rfind(". ") {
                    let period = window[..period_byte].chars().count();
                    if period + self.snap_window > self.chunk_size {
                        window = &window[..=period_byte];
                        end = start + period + 1;
                    }
                }
            }

            if let Some(chunk) = keep_chunk(window) {
                chunks.push(chunk);
            }

            // A snapped window shorter than the overlap must still advance.
            let next_start = end.saturating_sub(self.overlap).max(start + 1);
            if next_start >= text_len {
                break;
            }
            start = next_start;
        }

        tracing::debug!(
            text_len,
            chunks = chunks.len(),
            chunk_size = self.chunk_size,
            overlap = self.overlap,
            "fixed size chunking done"
        );
        Ok(chunks)
    }
}

/// The segmentation policy applied after cleaning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextChunker {
    Similarity(SimilarityChunker),
    FixedSize(FixedSizeChunker),
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::Similarity(SimilarityChunker::default())
    }
}

impl TextChunker {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Similarity(_) => Ok(()),
            Self::FixedSize(chunker) => chunker.validate(),
        }
    }

    pub fn run(&self, text: &str) -> Result<Vec<String>> {
        match self {
            Self::Similarity(chunker) => Ok(chunker.run(text)),
            Self::FixedSize(chunker) => chunker.run(text),
        }
    }
}

fn keep_chunk(chunk: &str) -> Option<String> {
    let trimmed = chunk.trim();
    (trimmed.chars().count() > MIN_CHUNK_CHARS).then(|| trimmed.to_owned())
}
