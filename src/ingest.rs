use crate::{
    anyhow, bail,
    config::ChunkerConfig,
    text_utils::{TextChunker, TextCleaner},
    Result,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

/// Source name given to text submitted directly rather than as a file.
pub const MANUAL_INPUT_SOURCE: &str = "manual_input";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceContent {
    Text(String),
    Bytes(Vec<u8>),
}

/// One named input to the ingestion pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub content: SourceContent,
}

impl SourceDocument {
    pub fn manual<T: Into<String>>(text: T) -> Self {
        Self::text(MANUAL_INPUT_SOURCE, text)
    }

    pub fn text<N: Into<String>, T: Into<String>>(name: N, text: T) -> Self {
        Self {
            name: name.into(),
            content: SourceContent::Text(text.into()),
        }
    }

    /// File contents as uploaded. Decoded as UTF-8 when the source is chunked.
    pub fn file<N: Into<String>>(name: N, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content: SourceContent::Bytes(bytes),
        }
    }

    pub fn extract_text(&self) -> Result<Cow<'_, str>> {
        match &self.content {
            SourceContent::Text(text) => Ok(Cow::Borrowed(text.as_str())),
            SourceContent::Bytes(bytes) => {
                if self.name.to_lowercase().ends_with(".pdf") {
                    bail!("{}: PDF sources must be extracted to text first", self.name);
                }
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| anyhow!("{}: not valid UTF-8: {e}", self.name))?;
                Ok(Cow::Borrowed(text))
            }
        }
    }
}

/// A chunk ready for the vector store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: Uuid,
    pub source: String,
    /// Position of the chunk within its source, starting at 0.
    pub chunk_index: usize,
    pub text: String,
}

/// Cleans and chunks named sources into [`ChunkRecord`]s.
#[derive(Clone, Debug, Default)]
pub struct Ingestor {
    cleaner: TextCleaner,
    chunker: TextChunker,
}

impl Ingestor {
    pub fn new(cleaner: TextCleaner, chunker: TextChunker) -> Result<Self> {
        chunker.validate()?;
        Ok(Self { cleaner, chunker })
    }

    pub fn from_config(config: &ChunkerConfig) -> Result<Self> {
        let (cleaner, chunker) = config.build()?;
        Self::new(cleaner, chunker)
    }

    pub fn chunk_source(&self, source: &SourceDocument) -> Result<Vec<ChunkRecord>> {
        let raw_text = source.extract_text()?;
        let cleaned = self.cleaner.run(&raw_text);
        let chunks = self.chunker.run(&cleaned)?;
        tracing::debug!(source = %source.name, chunks = chunks.len(), "source chunked");

        Ok(chunks
            .into_iter()
            .enumerate()
            .map(|(chunk_index, text)| ChunkRecord {
                id: Uuid::new_v4(),
                source: source.name.clone(),
                chunk_index,
                text,
            })
            .collect())
    }

    /// Chunks every source in parallel, keeping input order. A source that fails is
    /// logged and skipped; the call only fails when no source produced a chunk.
    pub fn ingest(&self, sources: &[SourceDocument]) -> Result<Vec<ChunkRecord>> {
        let results: Vec<Result<Vec<ChunkRecord>>> = sources
            .par_iter()
            .map(|source| self.chunk_source(source))
            .collect();

        let mut records = Vec::new();
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(chunks) if chunks.is_empty() => {
                    tracing::warn!(source = %source.name, "no usable content");
                }
                Ok(chunks) => records.extend(chunks),
                Err(e) => {
                    tracing::warn!(source = %source.name, error = %e, "skipping source");
                }
            }
        }

        if records.is_empty() {
            bail!("no chunks could be generated from the input");
        }
        tracing::info!(
            sources = sources.len(),
            chunks = records.len(),
            "ingestion complete"
        );
        Ok(records)
    }
}
