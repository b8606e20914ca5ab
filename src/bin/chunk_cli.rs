use anyhow::{bail, Result};
use doc_chunker::{
    config::{ChunkStrategy, ChunkerConfig},
    ingest::{Ingestor, SourceDocument},
};
use std::io::Write;

// cargo run --bin chunk_cli -- --strategy fixed_size --chunk-size 800 notes.txt

pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = clap::Command::new("chunk_cli")
        .version("0.1")
        .about("Cleans extracted text and prints one JSON chunk record per line")
        .arg(
            clap::Arg::new("files")
                .help("UTF-8 text files to chunk")
                .num_args(0..),
        )
        .arg(
            clap::Arg::new("text")
                .help("Text to chunk as the manual_input source")
                .long("text"),
        )
        .arg(
            clap::Arg::new("config")
                .help("TOML config file, defaults to $CHUNKER_CONFIG")
                .long("config"),
        )
        .arg(
            clap::Arg::new("strategy")
                .help("Chunking strategy")
                .long("strategy")
                .value_parser(["similarity", "fixed_size"]),
        )
        .arg(
            clap::Arg::new("threshold")
                .help("Similarity threshold")
                .long("threshold")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(
            clap::Arg::new("chunk_size")
                .help("Fixed-size window in characters")
                .long("chunk-size")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("overlap")
                .help("Fixed-size overlap in characters")
                .long("overlap")
                .value_parser(clap::value_parser!(usize)),
        )
        .get_matches();

    dotenv::dotenv().ok();
    let config_path = matches
        .get_one::<String>("config")
        .cloned()
        .or_else(|| dotenv::var("CHUNKER_CONFIG").ok());
    let mut config = match config_path {
        Some(path) => {
            let config = ChunkerConfig::from_file(&path)?;
            tracing::info!(path = %path, "loaded chunker config");
            config
        }
        None => ChunkerConfig::default(),
    };

    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.strategy = match strategy.as_str() {
            "fixed_size" => ChunkStrategy::FixedSize,
            _ => ChunkStrategy::Similarity,
        };
    }
    if let Some(threshold) = matches.get_one::<f32>("threshold") {
        config.similarity.threshold = *threshold;
    }
    if let Some(chunk_size) = matches.get_one::<usize>("chunk_size") {
        config.fixed_size.chunk_size = *chunk_size;
    }
    if let Some(overlap) = matches.get_one::<usize>("overlap") {
        config.fixed_size.overlap = *overlap;
    }
    let ingestor = Ingestor::from_config(&config)?;

    let mut sources = Vec::new();
    if let Some(text) = matches.get_one::<String>("text") {
        sources.push(SourceDocument::manual(text.as_str()));
    }
    for path in matches.get_many::<String>("files").into_iter().flatten() {
        match std::fs::read(path) {
            Ok(bytes) => sources.push(SourceDocument::file(path.as_str(), bytes)),
            Err(e) => tracing::warn!(path = %path, error = %e, "failed to read file"),
        }
    }
    if sources.is_empty() {
        bail!("no content provided, pass files or --text");
    }

    let records = ingestor.ingest(&sources)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }
    Ok(())
}
