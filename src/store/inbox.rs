//! Read-only seed inbox

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::write_if_absent;
use crate::mail::EmailRecord;

const MOCK_INBOX: &str = include_str!("../../data/mock_inbox.json");

/// Load the inbox document: a JSON array of records, order preserved
pub fn load_inbox(path: &Path) -> Result<Vec<EmailRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inbox file: {}", path.display()))?;

    let emails: Vec<EmailRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse inbox file: {}", path.display()))?;

    tracing::info!("Loaded {} emails from {}", emails.len(), path.display());
    Ok(emails)
}

/// Write the bundled mock inbox if the document does not exist yet
pub fn seed_inbox(path: &Path) -> Result<bool> {
    write_if_absent(path, MOCK_INBOX)
}
