//! Agent tab: free-form questions about one email or the whole inbox

use crate::ai::{AiAction, AiCommand};
use crate::app::session::SessionError;
use crate::app::state::{AgentScope, EditField};

use super::super::App;

impl App {
    pub(crate) fn toggle_scope(&mut self) {
        self.state.agent.scope = self.state.agent.scope.toggle();
        self.state
            .set_status(format!("Asking about: {}", self.state.agent.scope.label()));
    }

    pub(crate) fn start_question(&mut self) {
        if self.state.session.processed().is_empty() {
            self.report(SessionError::NothingProcessed);
            return;
        }
        self.state.editing = Some(EditField::Question);
    }

    pub(crate) fn send_question(&mut self) {
        let question = self.state.agent.question.trim().to_string();
        if question.is_empty() {
            self.report(SessionError::EmptyQuestion);
            return;
        }

        let command = match self.state.agent.scope {
            AgentScope::ThisEmail => {
                match self.state.session.processed_at(self.state.agent.selected) {
                    Ok(result) => AiCommand::AskEmail {
                        email: result.email.clone(),
                        question,
                    },
                    Err(e) => {
                        self.report(e);
                        return;
                    }
                }
            }
            AgentScope::Inbox => match self.state.session.inbox_digest() {
                Ok(digest) => AiCommand::AskInbox { question, digest },
                Err(e) => {
                    self.report(e);
                    return;
                }
            },
        };

        if self.send_ai_command(AiAction::Ask, command) {
            self.state.editing = None;
            self.state.agent.question.clear();
            self.state.set_status("Thinking...");
        }
    }
}
