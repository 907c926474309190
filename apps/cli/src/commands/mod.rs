pub mod inspect;
pub mod render;

use crate::args::STDIN;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};

/// Reads `source` from disk, or standard input for `-`.
pub(crate) fn read_source(source: &str) -> Result<String> {
    if source == STDIN {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("Failed to read standard input")?;
        return Ok(text);
    }
    fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))
}
