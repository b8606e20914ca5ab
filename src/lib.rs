pub mod config;
pub mod ingest;
pub mod text_utils;

pub(crate) use anyhow::{anyhow, bail, Result};
