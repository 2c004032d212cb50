//! Prompts tab: editing the persisted templates

use crate::app::state::EditField;

use super::super::App;

impl App {
    pub(crate) fn edit_prompt(&mut self) {
        self.state.editing = Some(EditField::Prompt);
    }

    /// Overwrite the prompt document with the working copy
    pub(crate) fn save_prompts(&mut self) {
        match self.prompt_store.save(&self.state.prompts.prompts) {
            Ok(()) => {
                self.state.prompts.modified = false;
                self.state.editing = None;
                self.state.set_status(format!(
                    "Prompts saved to {}",
                    self.prompt_store.path().display()
                ));
            }
            Err(e) => {
                tracing::error!("Failed to save prompts: {:#}", e);
                self.state.set_error(format!("Failed to save prompts: {:#}", e));
            }
        }
    }

    /// Replace the working copy with what is on disk
    pub(crate) fn reload_prompts(&mut self) {
        match self.prompt_store.load() {
            Ok(prompts) => {
                self.state.prompts.prompts = prompts;
                self.state.prompts.modified = false;
                self.state.editing = None;
                self.state.set_status("Prompts loaded");
            }
            Err(e) => {
                tracing::error!("Failed to load prompts: {:#}", e);
                self.state.set_error(format!("Failed to load prompts: {:#}", e));
            }
        }
    }
}
