//! Application state types
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.

use std::time::Instant;

use aho_corasick::AhoCorasick;

use super::session::Session;
use crate::ai::{AiAction, AnswerScope};
use crate::constants::ERROR_TTL_SECS;
use crate::input::KeybindingEntry;
use crate::mail::EmailRecord;
use crate::store::{PromptKind, PromptSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Inbox,
    Agent,
    Drafts,
    Prompts,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Self::Inbox, Self::Agent, Self::Drafts, Self::Prompts];

    pub fn title(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Agent => "Agent",
            Self::Drafts => "Drafts",
            Self::Prompts => "Prompts",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Inbox => Self::Agent,
            Self::Agent => Self::Drafts,
            Self::Drafts => Self::Prompts,
            Self::Prompts => Self::Inbox,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Inbox => Self::Prompts,
            Self::Agent => Self::Inbox,
            Self::Drafts => Self::Agent,
            Self::Prompts => Self::Drafts,
        }
    }
}

/// What a question in the Agent tab is about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgentScope {
    #[default]
    ThisEmail,
    Inbox,
}

impl AgentScope {
    pub fn toggle(self) -> Self {
        match self {
            Self::ThisEmail => Self::Inbox,
            Self::Inbox => Self::ThisEmail,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ThisEmail => "This email",
            Self::Inbox => "Entire inbox",
        }
    }
}

/// Which text buffer keystrokes go to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Question,
    DraftSubject,
    DraftBody,
    Prompt,
}

impl EditField {
    pub fn is_draft(self) -> bool {
        matches!(self, Self::DraftSubject | Self::DraftBody)
    }
}

/// Modal overlay state - only one can be active at a time
#[derive(Debug, Clone, Default)]
pub enum ModalState {
    #[default]
    None,
    Search,
    Help {
        keybindings: Vec<KeybindingEntry>,
        scroll: usize,
    },
}

impl ModalState {
    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search)
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help { .. })
    }
}

/// The AI request currently in flight, if any
#[derive(Debug, Clone, Copy)]
pub struct PendingRequest {
    pub action: AiAction,
    pub started: Instant,
}

/// Pending request, error, and status message state
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub pending: Option<PendingRequest>,
    pub error: Option<String>,
    pub error_time: Option<Instant>,
    pub message: String,
    /// Persists after error bar expires - shown as indicator in status bar
    pub has_unacknowledged_error: bool,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.error_time = Some(Instant::now());
        self.has_unacknowledged_error = true;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_time = None;
    }

    /// Acknowledge the error indicator (clear the persistent flag)
    pub fn acknowledge_error(&mut self) {
        self.has_unacknowledged_error = false;
    }

    /// Clear error if TTL expired. Returns true if error was cleared.
    pub fn clear_error_if_expired(&mut self) -> bool {
        if let Some(time) = self.error_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.clear_error();
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }

    pub fn start_request(&mut self, action: AiAction) {
        self.pending = Some(PendingRequest {
            action,
            started: Instant::now(),
        });
    }

    pub fn finish_request(&mut self) {
        self.pending = None;
    }
}

/// Case-insensitive subject/sender filter for the inbox list
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    /// Indices into the loaded emails; None when no filter is active
    pub matches: Option<Vec<usize>>,
}

#[derive(Debug, Clone, Default)]
pub struct InboxViewState {
    /// Position in the visible (filtered) list
    pub selected: usize,
    pub search: SearchState,
}

/// The last answer shown in the Agent tab
#[derive(Debug, Clone)]
pub struct AnswerView {
    pub scope: AnswerScope,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default)]
pub struct AgentViewState {
    /// Index into the processed results
    pub selected: usize,
    pub scope: AgentScope,
    pub question: String,
    pub answer: Option<AnswerView>,
}

#[derive(Debug, Clone, Default)]
pub struct DraftsViewState {
    /// Index into the processed results
    pub selected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PromptsViewState {
    pub selected: usize,
    /// Working copy; persisted only on save
    pub prompts: PromptSet,
    /// Working copy differs from what was last loaded or saved
    pub modified: bool,
}

impl PromptsViewState {
    pub fn selected_kind(&self) -> PromptKind {
        PromptKind::ALL[self.selected.min(PromptKind::ALL.len() - 1)]
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tab: Tab,
    pub session: Session,

    // Per-tab view state
    pub inbox: InboxViewState,
    pub agent: AgentViewState,
    pub drafts: DraftsViewState,
    pub prompts: PromptsViewState,

    /// Text field receiving keystrokes, if any
    pub editing: Option<EditField>,

    // Modal overlay state (search, help)
    pub modal: ModalState,

    // Status state (pending request, error, status message)
    pub status: StatusState,

    // UI settings
    pub split_ratio: u16,
    /// Whether a completion client is configured
    pub ai_available: bool,
}

impl AppState {
    /// Indices of emails shown in the inbox list, in inbox order
    pub fn visible_email_indices(&self) -> Vec<usize> {
        match &self.inbox.search.matches {
            Some(matches) => matches.clone(),
            None => (0..self.session.emails().len()).collect(),
        }
    }

    /// Index into the loaded emails of the inbox selection
    pub fn selected_email_index(&self) -> Option<usize> {
        self.visible_email_indices()
            .get(self.inbox.selected)
            .copied()
    }

    pub fn selected_email(&self) -> Option<&EmailRecord> {
        self.selected_email_index()
            .and_then(|i| self.session.emails().get(i))
    }

    /// Recompute the inbox filter from the current query
    pub fn update_search(&mut self) {
        self.inbox.search.matches = compute_matches(&self.inbox.search.query, self.session.emails());
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.inbox.search.query.clear();
        self.inbox.search.matches = None;
        self.clamp_selection();
    }

    /// Number of rows in the current tab's list
    pub fn list_len(&self) -> usize {
        match self.tab {
            Tab::Inbox => self.visible_email_indices().len(),
            Tab::Agent | Tab::Drafts => self.session.processed().len(),
            Tab::Prompts => PromptKind::ALL.len(),
        }
    }

    fn selected_mut(&mut self) -> &mut usize {
        match self.tab {
            Tab::Inbox => &mut self.inbox.selected,
            Tab::Agent => &mut self.agent.selected,
            Tab::Drafts => &mut self.drafts.selected,
            Tab::Prompts => &mut self.prompts.selected,
        }
    }

    /// Move the current tab's selection by `delta`, clamped to the list
    pub fn move_selection(&mut self, delta: isize) {
        let max = self.list_len().saturating_sub(1);
        let selected = self.selected_mut();
        *selected = selected.saturating_add_signed(delta).min(max);
    }

    pub fn select_first(&mut self) {
        *self.selected_mut() = 0;
    }

    pub fn select_last(&mut self) {
        let last = self.list_len().saturating_sub(1);
        *self.selected_mut() = last;
    }

    /// Keep every tab's selection inside its list
    pub fn clamp_selection(&mut self) {
        let visible = self.visible_email_indices().len();
        let processed = self.session.processed().len();
        self.inbox.selected = self.inbox.selected.min(visible.saturating_sub(1));
        self.agent.selected = self.agent.selected.min(processed.saturating_sub(1));
        self.drafts.selected = self.drafts.selected.min(processed.saturating_sub(1));
    }

    pub fn is_pending(&self) -> bool {
        self.status.pending.is_some()
    }

    // Delegate methods to StatusState
    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }

    pub fn clear_error_if_expired(&mut self) -> bool {
        self.status.clear_error_if_expired()
    }

    pub fn acknowledge_error(&mut self) {
        self.status.acknowledge_error();
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }
}

fn compute_matches(query: &str, emails: &[EmailRecord]) -> Option<Vec<usize>> {
    if query.is_empty() {
        return None;
    }

    let ac = match AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build([query])
    {
        Ok(ac) => ac,
        Err(e) => {
            tracing::warn!("Invalid search pattern: {}", e);
            return None;
        }
    };

    Some(
        emails
            .iter()
            .enumerate()
            .filter(|(_, email)| ac.is_match(&email.subject) || ac.is_match(&email.sender))
            .map(|(i, _)| i)
            .collect(),
    )
}
