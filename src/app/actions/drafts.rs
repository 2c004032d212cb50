//! Drafts tab: generating, editing and saving replies

use crate::ai::{AiAction, AiCommand};
use crate::app::session::SessionError;
use crate::app::state::EditField;

use super::super::App;

impl App {
    pub(crate) fn draft_reply(&mut self) {
        let email = match self.state.session.processed_at(self.state.drafts.selected) {
            Ok(result) => result.email.clone(),
            Err(e) => {
                self.report(e);
                return;
            }
        };
        let rule = match self.prompt_store.load() {
            Ok(prompts) => prompts.auto_reply_prompt,
            Err(e) => {
                self.state.set_error(format!("Failed to load prompts: {:#}", e));
                return;
            }
        };

        let subject = email.subject.clone();
        if self.send_ai_command(AiAction::Draft, AiCommand::DraftReply { email, rule }) {
            self.state.editing = None;
            self.state
                .set_status(format!("Drafting a reply to \"{}\"...", subject));
        }
    }

    pub(crate) fn edit_draft(&mut self) {
        if self.state.session.current_draft().is_none() {
            self.report(SessionError::NoCurrentDraft);
            return;
        }
        self.state.editing = Some(EditField::DraftSubject);
    }

    pub(crate) fn next_draft_field(&mut self) {
        self.state.editing = match self.state.editing {
            Some(EditField::DraftSubject) => Some(EditField::DraftBody),
            Some(EditField::DraftBody) => Some(EditField::DraftSubject),
            other => other,
        };
    }

    pub(crate) fn save_draft(&mut self) {
        match self.state.session.save_current_draft() {
            Ok(saved) => {
                let subject = saved.draft.subject.clone();
                let count = self.state.session.saved_drafts().len();
                self.state.editing = None;
                self.state
                    .set_status(format!("Saved draft {}: {}", count, subject));
            }
            Err(e) => self.report(e),
        }
    }
}
