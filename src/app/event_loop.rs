//! Main event loop and AI event processing

use anyhow::Result;
use crossterm::event;
use std::time::Duration;

use crate::ai::AiEvent;
use crate::app::state::AnswerView;
use crate::constants::INPUT_POLL_MS;
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::RenderThread;

impl App {
    pub(crate) fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            // Process AI events from the actor (non-blocking)
            if self.process_ai_events() {
                self.dirty = true;
            }

            // Clear expired errors
            if self.state.clear_error_if_expired() {
                self.dirty = true;
            }

            // Spinner animates while a request is in flight
            if self.state.is_pending() {
                self.dirty = true;
            }

            // Render only when dirty; a dropped frame stays dirty
            if self.dirty {
                self.dirty = !render_thread.render(self.state.clone());
            }

            if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => {
                        self.state.acknowledge_error();
                        self.handle_action(action);
                    }
                    InputResult::Char(c) => {
                        self.state.acknowledge_error();
                        self.handle_char(c);
                    }
                    InputResult::Backspace => {
                        self.state.acknowledge_error();
                        self.handle_backspace();
                    }
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    /// Drain events from the AI actor. Returns true if any events were processed.
    pub(crate) fn process_ai_events(&mut self) -> bool {
        let Some(ref mut ai) = self.ai_actor else {
            return false;
        };

        let mut had_events = false;
        while let Ok(event) = ai.event_rx.try_recv() {
            had_events = true;
            self.state.status.finish_request();
            match event {
                AiEvent::Processed { index, result } => {
                    tracing::info!("Processed email {}: {}", index + 1, result.email.subject);
                    self.state
                        .set_status(format!("Processed \"{}\"", result.email.subject));
                    self.state.session.record_processed(result);
                }
                AiEvent::Answer {
                    scope,
                    question,
                    answer,
                } => {
                    self.state.agent.answer = Some(AnswerView {
                        scope,
                        question,
                        answer,
                    });
                    self.state.set_status("Answer ready");
                }
                AiEvent::Drafted(draft) => {
                    self.state.session.set_current_draft(draft);
                    self.state
                        .set_status("Draft ready - e to edit, Ctrl+S to save");
                }
                AiEvent::Failed { action, message } => {
                    tracing::warn!("{} request failed", action.label());
                    self.state.set_error(message);
                }
            }
        }
        had_events
    }
}
