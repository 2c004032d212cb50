//! Flat JSON documents on disk: prompt templates and the seed inbox

mod inbox;
mod prompts;

pub use inbox::{load_inbox, seed_inbox};
pub use prompts::{PromptKind, PromptSet, PromptStore};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

fn write_if_absent(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Seeded {}", path.display());
    Ok(true)
}
