//! Prompt templates persisted as a flat JSON document

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::write_if_absent;

const DEFAULT_PROMPTS: &str = include_str!("../../data/prompts.json");

/// The three user-editable templates. Field names are the persisted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSet {
    pub categorization_prompt: String,
    pub action_item_prompt: String,
    pub auto_reply_prompt: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptKind {
    #[default]
    Categorization,
    ActionItem,
    AutoReply,
}

impl PromptKind {
    pub const ALL: [PromptKind; 3] = [Self::Categorization, Self::ActionItem, Self::AutoReply];

    pub fn label(self) -> &'static str {
        match self {
            Self::Categorization => "Categorization Prompt",
            Self::ActionItem => "Action Item Prompt",
            Self::AutoReply => "Auto-Reply Prompt",
        }
    }
}

impl PromptSet {
    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Categorization => &self.categorization_prompt,
            PromptKind::ActionItem => &self.action_item_prompt,
            PromptKind::AutoReply => &self.auto_reply_prompt,
        }
    }

    pub fn get_mut(&mut self, kind: PromptKind) -> &mut String {
        match kind {
            PromptKind::Categorization => &mut self.categorization_prompt,
            PromptKind::ActionItem => &mut self.action_item_prompt,
            PromptKind::AutoReply => &mut self.auto_reply_prompt,
        }
    }
}

/// Reads and overwrites the prompt document. There are no partial updates:
/// every save replaces the whole file.
#[derive(Debug, Clone)]
pub struct PromptStore {
    path: PathBuf,
}

impl PromptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<PromptSet> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read prompts file: {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse prompts file: {}", self.path.display()))
    }

    pub fn save(&self, prompts: &PromptSet) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let mut content = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut content, formatter);
        prompts
            .serialize(&mut serializer)
            .context("Failed to serialize prompts")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write prompts file: {}", self.path.display()))?;

        tracing::info!("Saved prompts to {}", self.path.display());
        Ok(())
    }

    /// Write the built-in templates if the document does not exist yet.
    /// Returns true when a file was written.
    pub fn seed(&self) -> Result<bool> {
        write_if_absent(&self.path, DEFAULT_PROMPTS)
    }
}
