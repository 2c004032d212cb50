//! Per-run session context: the loaded inbox, processing results and drafts

use chrono::Local;
use thiserror::Error;

use crate::ai::prompts;
use crate::mail::{Draft, EmailRecord, ProcessedResult, SavedDraft};

/// An action was attempted before its preconditions were met
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Load the inbox first.")]
    InboxNotLoaded,
    #[error("Process at least 1 email first.")]
    NothingProcessed,
    #[error("Draft a reply first.")]
    NoCurrentDraft,
    #[error("Type a question first.")]
    EmptyQuestion,
    #[error("No email at position {0}")]
    NoSuchEmail(usize),
}

impl SessionError {
    /// Guidance is shown as a hint rather than an error
    pub fn is_guidance(&self) -> bool {
        !matches!(self, Self::NoSuchEmail(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    emails: Vec<EmailRecord>,
    loaded: bool,
    processed: Vec<ProcessedResult>,
    current_draft: Option<Draft>,
    saved_drafts: Vec<SavedDraft>,
}

impl Session {
    /// Replace the loaded email list. Results and drafts are kept.
    pub fn load_inbox(&mut self, emails: Vec<EmailRecord>) {
        self.emails = emails;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn emails(&self) -> &[EmailRecord] {
        &self.emails
    }

    pub fn email(&self, index: usize) -> Result<&EmailRecord, SessionError> {
        if !self.loaded {
            return Err(SessionError::InboxNotLoaded);
        }
        self.emails
            .get(index)
            .ok_or(SessionError::NoSuchEmail(index))
    }

    /// Append a result; reprocessing the same email appends another one
    pub fn record_processed(&mut self, result: ProcessedResult) {
        self.processed.push(result);
    }

    pub fn processed(&self) -> &[ProcessedResult] {
        &self.processed
    }

    pub fn processed_at(&self, index: usize) -> Result<&ProcessedResult, SessionError> {
        if self.processed.is_empty() {
            return Err(SessionError::NothingProcessed);
        }
        self.processed
            .get(index)
            .ok_or(SessionError::NoSuchEmail(index))
    }

    pub fn is_processed(&self, email: &EmailRecord) -> bool {
        self.result_for(email).is_some()
    }

    /// Latest result recorded for `email`
    pub fn result_for(&self, email: &EmailRecord) -> Option<&ProcessedResult> {
        self.processed.iter().rev().find(|r| &r.email == email)
    }

    pub fn set_current_draft(&mut self, draft: Draft) {
        self.current_draft = Some(draft);
    }

    pub fn current_draft(&self) -> Option<&Draft> {
        self.current_draft.as_ref()
    }

    pub fn current_draft_mut(&mut self) -> Option<&mut Draft> {
        self.current_draft.as_mut()
    }

    /// Copy the current draft, with its edits, into the saved list
    pub fn save_current_draft(&mut self) -> Result<&SavedDraft, SessionError> {
        let draft = self
            .current_draft
            .clone()
            .ok_or(SessionError::NoCurrentDraft)?;
        self.saved_drafts.push(SavedDraft {
            draft,
            saved_at: Local::now(),
        });
        self.saved_drafts
            .last()
            .ok_or(SessionError::NoCurrentDraft)
    }

    pub fn saved_drafts(&self) -> &[SavedDraft] {
        &self.saved_drafts
    }

    /// Aggregate text of every processed email, for inbox-wide questions
    pub fn inbox_digest(&self) -> Result<String, SessionError> {
        if self.processed.is_empty() {
            return Err(SessionError::NothingProcessed);
        }
        Ok(prompts::inbox_digest(self.processed.iter().map(|r| &r.email)))
    }
}
