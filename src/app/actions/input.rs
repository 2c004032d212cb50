//! Text input handling for the search box and editable fields

use crate::app::state::EditField;

use super::super::App;

impl App {
    pub(crate) fn handle_char(&mut self, c: char) {
        if self.state.modal.is_search() {
            self.state.inbox.search.query.push(c);
            self.state.update_search();
            return;
        }

        if let Some(buffer) = self.edit_buffer() {
            buffer.push(c);
        }
    }

    pub(crate) fn handle_backspace(&mut self) {
        if self.state.modal.is_search() {
            self.state.inbox.search.query.pop();
            self.state.update_search();
            return;
        }

        if let Some(buffer) = self.edit_buffer() {
            buffer.pop();
        }
    }

    /// The buffer behind the focused field
    fn edit_buffer(&mut self) -> Option<&mut String> {
        match self.state.editing? {
            EditField::Question => Some(&mut self.state.agent.question),
            EditField::DraftSubject => self
                .state
                .session
                .current_draft_mut()
                .map(|draft| &mut draft.subject),
            EditField::DraftBody => self
                .state
                .session
                .current_draft_mut()
                .map(|draft| &mut draft.body),
            EditField::Prompt => {
                let kind = self.state.prompts.selected_kind();
                self.state.prompts.modified = true;
                Some(self.state.prompts.prompts.get_mut(kind))
            }
        }
    }
}
