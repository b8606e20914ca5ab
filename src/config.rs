use crate::{
    anyhow,
    text_utils::{
        FixedSizeChunker, Newlines, NoisePatterns, SimilarityChunker, TextChunker, TextCleaner,
    },
    Result,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    #[default]
    Similarity,
    FixedSize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoisePatternConfig {
    pub pattern: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub newlines: Newlines,
    pub remove_non_basic_ascii: bool,
    /// Appended after the built-in noise table.
    pub extra_noise_patterns: Vec<NoisePatternConfig>,
}

/// Settings for the cleaner and the chunker, as read from a TOML file.
///
/// ```toml
/// strategy = "fixed_size"
///
/// [fixed_size]
/// chunk_size = 800
/// overlap = 120
///
/// [[cleaner.extra_noise_patterns]]
/// pattern = 'scanned with \w+'
/// description = "scanner signature"
/// ```
///
/// Every key is optional and falls back to the engine defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    pub strategy: ChunkStrategy,
    pub similarity: SimilarityChunker,
    pub fixed_size: FixedSizeChunker,
    pub cleaner: CleanerConfig,
}

impl ChunkerConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read config {}: {e}", path.display()))?;
        Self::from_toml_str(&contents)
            .map_err(|e| anyhow!("invalid config {}: {e}", path.display()))
    }

    /// Checks both chunker sections, not only the selected one.
    pub fn validate(&self) -> Result<()> {
        self.fixed_size.validate()?;
        self.text_cleaner()?;
        Ok(())
    }

    /// Validates and builds the cleaner and the chunker, compiling the noise
    /// patterns once.
    pub fn build(&self) -> Result<(TextCleaner, TextChunker)> {
        let cleaner = self.text_cleaner()?;
        self.fixed_size.validate()?;
        Ok((cleaner, self.text_chunker()))
    }

    pub fn text_cleaner(&self) -> Result<TextCleaner> {
        let noise = self
            .cleaner
            .extra_noise_patterns
            .iter()
            .try_fold(NoisePatterns::default(), |noise, extra| {
                noise.with_pattern(&extra.pattern, &extra.description)
            })?;
        let mut cleaner = TextCleaner::new().noise_patterns(noise);
        cleaner = match self.cleaner.newlines {
            Newlines::Space => cleaner.reduce_newlines_to_single_space(),
            Newlines::Single => cleaner.reduce_newlines_to_single_newline(),
        };
        if self.cleaner.remove_non_basic_ascii {
            cleaner = cleaner.remove_non_basic_ascii();
        }
        Ok(cleaner)
    }

    pub fn text_chunker(&self) -> TextChunker {
        match self.strategy {
            ChunkStrategy::Similarity => TextChunker::Similarity(self.similarity),
            ChunkStrategy::FixedSize => TextChunker::FixedSize(self.fixed_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_utils::{chunk, SimilarityMeasure};

    #[test]
    fn test_defaults_match_engine() {
        let config = ChunkerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ChunkerConfig::default());
        assert_eq!(config.strategy, ChunkStrategy::Similarity);
        assert_eq!(config.similarity.threshold, chunk::DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(config.similarity.measure, SimilarityMeasure::Jaccard);
        assert_eq!(config.fixed_size.chunk_size, chunk::DEFAULT_CHUNK_SIZE);
        assert_eq!(config.fixed_size.overlap, chunk::DEFAULT_CHUNK_OVERLAP);
        assert_eq!(config.fixed_size.snap_window, chunk::DEFAULT_SNAP_WINDOW);
        assert_eq!(config.cleaner.newlines, Newlines::Single);
        assert_eq!(
            config.text_chunker(),
            TextChunker::Similarity(SimilarityChunker::default())
        );
    }

    #[test]
    fn test_overrides() {
        let config = ChunkerConfig::from_toml_str(
            r#"
            strategy = "fixed_size"

            [similarity]
            measure = "overlap"

            [fixed_size]
            chunk_size = 800
            overlap = 120

            [cleaner]
            newlines = "space"
            remove_non_basic_ascii = true
            "#,
        )
        .unwrap();
        assert_eq!(config.similarity.measure, SimilarityMeasure::Overlap);
        assert_eq!(config.similarity.threshold, chunk::DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(
            config.text_chunker(),
            TextChunker::FixedSize(FixedSizeChunker::new().chunk_size(800).overlap(120))
        );
        let (cleaner, chunker) = config.build().unwrap();
        assert_eq!(cleaner.newlines, Newlines::Space);
        assert!(cleaner.remove_non_basic_ascii);
        assert_eq!(chunker, config.text_chunker());
    }

    #[test]
    fn test_extra_noise_patterns() {
        let config = ChunkerConfig::from_toml_str(
            r#"
            [[cleaner.extra_noise_patterns]]
            pattern = 'scanned with \w+'
            description = "scanner signature"
            "#,
        )
        .unwrap();
        let cleaner = config.text_cleaner().unwrap();
        assert_eq!(cleaner.noise.len(), NoisePatterns::default().len() + 1);
        assert_eq!(
            cleaner.run("Scanned with CamScanner\nLecture one."),
            "Lecture one."
        );
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let err = ChunkerConfig::from_toml_str(
            r#"
            [fixed_size]
            chunk_size = 100
            overlap = 100
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("overlap"));

        let err = ChunkerConfig::from_toml_str(
            r#"
            [[cleaner.extra_noise_patterns]]
            pattern = '(unclosed'
            description = "broken"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("broken"));

        assert!(ChunkerConfig::from_toml_str("strategy = \"sliding\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ChunkerConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
