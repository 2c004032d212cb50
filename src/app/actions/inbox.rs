//! Inbox tab: loading the seed inbox and processing emails

use crate::ai::{AiAction, AiCommand};
use crate::app::session::SessionError;
use crate::store;

use super::super::App;

impl App {
    pub(crate) fn load_inbox(&mut self) {
        match store::load_inbox(&self.inbox_path) {
            Ok(emails) => {
                let count = emails.len();
                self.state.session.load_inbox(emails);
                self.state.clear_search();
                self.state.inbox.selected = 0;
                self.state.set_status(format!("Loaded {} emails", count));
            }
            Err(e) => {
                tracing::error!("Failed to load inbox: {:#}", e);
                self.state.set_error(format!("Failed to load inbox: {:#}", e));
            }
        }
    }

    /// Categorize and extract action items for the selected email,
    /// using the prompts as currently persisted
    pub(crate) fn process_selected(&mut self) {
        if !self.state.session.is_loaded() {
            self.report(SessionError::InboxNotLoaded);
            return;
        }
        let Some(index) = self.state.selected_email_index() else {
            self.state.set_status("No email selected");
            return;
        };
        let email = match self.state.session.email(index) {
            Ok(email) => email.clone(),
            Err(e) => {
                self.report(e);
                return;
            }
        };
        let prompts = match self.prompt_store.load() {
            Ok(prompts) => prompts,
            Err(e) => {
                self.state.set_error(format!("Failed to load prompts: {:#}", e));
                return;
            }
        };

        let subject = email.subject.clone();
        if self.send_ai_command(
            AiAction::Process,
            AiCommand::ProcessEmail {
                index,
                email,
                prompts,
            },
        ) {
            self.state.set_status(format!("Processing \"{}\"...", subject));
        }
    }
}
