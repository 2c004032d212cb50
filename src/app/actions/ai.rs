//! Dispatching requests to the AI actor

use crate::ai::{AiAction, AiCommand};
use crate::app::session::SessionError;

use super::super::App;

impl App {
    /// Hand a command to the actor. Only one request may be in flight;
    /// returns false when the command was not sent.
    pub(crate) fn send_ai_command(&mut self, action: AiAction, command: AiCommand) -> bool {
        if let Some(pending) = self.state.status.pending {
            self.state.set_status(format!(
                "{} in progress, please wait...",
                pending.action.label()
            ));
            return false;
        }

        let Some(ref ai) = self.ai_actor else {
            self.state
                .set_error("AI features not configured (set ai.api_key or MAILMIND_API_KEY)");
            return false;
        };

        match ai.cmd_tx.try_send(command) {
            Ok(()) => {
                self.state.status.start_request(action);
                true
            }
            Err(e) => {
                tracing::error!("Failed to reach AI actor: {}", e);
                self.state.set_error(format!("AI actor unavailable: {}", e));
                false
            }
        }
    }

    /// Guidance goes to the status line, anything else to the error bar
    pub(crate) fn report(&mut self, err: SessionError) {
        if err.is_guidance() {
            self.state.set_status(err);
        } else {
            self.state.set_error(err);
        }
    }
}
