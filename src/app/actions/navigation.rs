//! Navigation actions (tabs, back, help overlay)

use crate::app::state::{ModalState, Tab};

use super::super::App;

impl App {
    pub(crate) fn switch_tab(&mut self, tab: Tab) {
        if self.state.modal.is_help() {
            return;
        }
        self.state.modal = ModalState::None;
        self.state.editing = None;
        self.state.tab = tab;
        self.state.clamp_selection();
    }

    pub(crate) fn go_back(&mut self) {
        if self.state.modal.is_help() || self.state.modal.is_search() {
            self.state.modal = ModalState::None;
        } else if self.state.editing.is_some() {
            self.state.editing = None;
        }
    }

    pub(crate) fn toggle_help(&mut self) {
        if self.state.modal.is_help() {
            self.state.modal = ModalState::None;
        } else {
            self.state.modal = ModalState::Help {
                keybindings: self.bindings.all_bindings(),
                scroll: 0,
            };
        }
    }

    pub(crate) fn help_scroll_down(&mut self) {
        if let ModalState::Help {
            scroll,
            keybindings,
        } = &mut self.state.modal
        {
            // One line per binding plus a header and blank line per category
            let mut categories = 0;
            let mut last_category = "";
            for kb in keybindings.iter() {
                if kb.category != last_category {
                    categories += 1;
                    last_category = kb.category;
                }
            }
            let content_lines = keybindings.len() + categories * 2;
            let max_scroll = content_lines.saturating_sub(10); // Approx visible area

            if *scroll < max_scroll {
                *scroll += 1;
            }
        }
    }

    pub(crate) fn help_scroll_up(&mut self) {
        if let ModalState::Help { scroll, .. } = &mut self.state.modal {
            *scroll = scroll.saturating_sub(1);
        }
    }
}
