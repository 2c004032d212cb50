//! Action handlers for user input
//!
//! This module is split into focused submodules:
//! - `navigation`: Movement, tabs and the help overlay
//! - `input`: Text input handling
//! - `ai`: Sending requests to the AI actor
//! - `inbox`, `agent`, `drafts`, `prompts`: Per-tab operations

mod agent;
mod ai;
mod drafts;
mod inbox;
mod input;
mod navigation;
mod prompts;

use crate::app::state::{EditField, ModalState, Tab};
use crate::input::Action;

use super::App;

impl App {
    pub(crate) fn handle_action(&mut self, action: Action) {
        match action {
            // Navigation
            Action::Up => {
                if self.state.modal.is_help() {
                    self.help_scroll_up();
                } else {
                    self.state.move_selection(-1);
                }
            }
            Action::Down => {
                if self.state.modal.is_help() {
                    self.help_scroll_down();
                } else {
                    self.state.move_selection(1);
                }
            }
            Action::Top => self.state.select_first(),
            Action::Bottom => self.state.select_last(),
            Action::PageUp => self.state.move_selection(-10),
            Action::PageDown => self.state.move_selection(10),

            // Tabs
            Action::NextTab => self.switch_tab(self.state.tab.next()),
            Action::PrevTab => self.switch_tab(self.state.tab.prev()),
            Action::GoInbox => self.switch_tab(Tab::Inbox),
            Action::GoAgent => self.switch_tab(Tab::Agent),
            Action::GoDrafts => self.switch_tab(Tab::Drafts),
            Action::GoPrompts => self.switch_tab(Tab::Prompts),

            Action::Open => match (self.state.editing, self.state.tab) {
                (Some(EditField::Question), _) => self.send_question(),
                (_, Tab::Inbox) => self.process_selected(),
                (_, Tab::Agent) => self.start_question(),
                (_, Tab::Drafts) => self.edit_draft(),
                (_, Tab::Prompts) => self.edit_prompt(),
            },
            Action::Back => self.go_back(),
            Action::Quit => {} // Handled in event loop

            // Inbox
            Action::LoadInbox => self.load_inbox(),
            Action::Process if self.state.tab == Tab::Inbox => self.process_selected(),
            Action::Search if self.state.tab == Tab::Inbox => {
                self.state.modal = ModalState::Search;
            }

            // Agent
            Action::ToggleScope if self.state.tab == Tab::Agent => self.toggle_scope(),
            Action::AskQuestion if self.state.tab == Tab::Agent => self.start_question(),

            // Drafts and prompts
            Action::DraftReply if self.state.tab == Tab::Drafts => self.draft_reply(),
            Action::Edit => match self.state.tab {
                Tab::Drafts => self.edit_draft(),
                Tab::Prompts => self.edit_prompt(),
                _ => {}
            },
            Action::Save => match self.state.tab {
                Tab::Drafts => self.save_draft(),
                Tab::Prompts => self.save_prompts(),
                _ => {}
            },
            Action::Reload if self.state.tab == Tab::Prompts => self.reload_prompts(),

            // Editing
            Action::NextField => self.next_draft_field(),
            Action::Cancel => {
                if self.state.modal.is_search() {
                    self.state.clear_search();
                    self.state.modal = ModalState::None;
                } else {
                    self.state.editing = None;
                }
            }

            // Help
            Action::Help => self.toggle_help(),

            // Tab-specific keys pressed on another tab
            Action::Process
            | Action::Search
            | Action::ToggleScope
            | Action::AskQuestion
            | Action::DraftReply
            | Action::Reload => {}
        }
    }
}
