use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$SPENDLENS_HOME`, or `~/.spendlens`
pub fn spendlens_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SPENDLENS_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendlens"))
}

pub fn ensure_spendlens_home() -> Result<PathBuf> {
    let dir = spendlens_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
