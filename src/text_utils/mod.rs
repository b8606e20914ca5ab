pub mod chunk;
pub mod clean_text;
pub mod noise;
pub mod similarity;
pub mod split;
#[cfg(test)]
pub mod test_text;

pub use chunk::{
    chunk_by_similarity, chunk_fixed_size, FixedSizeChunker, SimilarityChunker, TextChunker,
};
pub use clean_text::{normalize, Newlines, TextCleaner};
pub use noise::{NoisePattern, NoisePatterns};
pub use similarity::{sentence_similarity, SimilarityMeasure};
pub use split::split_text_into_sentences;
