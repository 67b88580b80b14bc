use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use sumstats_core::{Callset, CallsetDocument};

pub fn load_callset(path: &Path) -> Result<Callset> {
    let file =
        File::open(path).with_context(|| format!("Failed to open callset {}", path.display()))?;
    CallsetDocument::load(BufReader::new(file))
        .with_context(|| format!("Failed to load callset {}", path.display()))
}

pub fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {what} {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {what} {}", path.display()))
}

/// Write to `output`, or to stdout when no file is given.
pub fn write_output(content: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Results written to: {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
