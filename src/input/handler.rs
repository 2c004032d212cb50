use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::{AppState, EditField};

pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) => handle_key(key_event, state, bindings),
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Check if we're in help mode
    if state.modal.is_help() {
        return handle_help_input(key, bindings);
    }

    // Check if we're in search mode
    if state.modal.is_search() {
        return handle_search_input(key);
    }

    // Check if a text field has focus
    if let Some(field) = state.editing {
        return handle_text_input(key, field, bindings);
    }

    // Check for mapped action
    if let Some(action) = bindings.get(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    InputResult::Continue
}

fn handle_help_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    // In help modal: j/k scroll, Esc or "." closes
    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Help => return InputResult::Action(Action::Help),
            Action::Up => return InputResult::Action(Action::Up),
            Action::Down => return InputResult::Action(Action::Down),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('.') => InputResult::Action(Action::Help),
        KeyCode::Up | KeyCode::Char('k') => InputResult::Action(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => InputResult::Action(Action::Down),
        _ => InputResult::Continue,
    }
}

fn handle_search_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter => InputResult::Action(Action::Back), // Keep filter
        KeyCode::Esc => InputResult::Action(Action::Cancel), // Drop filter
        _ => InputResult::Continue,
    }
}

fn handle_text_input(key: KeyEvent, field: EditField, bindings: &KeyBindings) -> InputResult {
    // Save works from inside drafts and prompts
    if field != EditField::Question && bindings.get(&key) == Some(Action::Save) {
        return InputResult::Action(Action::Save);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Continue;
    }

    match (key.code, field) {
        (KeyCode::Esc, _) => InputResult::Action(Action::Cancel),
        (KeyCode::Enter, EditField::Question) => InputResult::Action(Action::Open),
        (KeyCode::Enter, EditField::DraftSubject) => InputResult::Action(Action::NextField),
        (KeyCode::Enter, _) => InputResult::Char('\n'),
        (KeyCode::Tab | KeyCode::BackTab, f) if f.is_draft() => {
            InputResult::Action(Action::NextField)
        }
        (KeyCode::Char(c), _) => InputResult::Char(c),
        (KeyCode::Backspace, _) => InputResult::Backspace,
        _ => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ModalState;
    use crate::config::KeybindingMode;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_action() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = AppState::default();

        let result = handle_key(press(KeyCode::Char('q')), &state, &bindings);
        assert!(matches!(result, InputResult::Quit));
    }

    #[test]
    fn test_editing_captures_letters() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = AppState {
            editing: Some(EditField::Question),
            ..Default::default()
        };

        assert!(matches!(
            handle_key(press(KeyCode::Char('q')), &state, &bindings),
            InputResult::Char('q')
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Enter), &state, &bindings),
            InputResult::Action(Action::Open)
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Esc), &state, &bindings),
            InputResult::Action(Action::Cancel)
        ));
    }

    #[test]
    fn test_draft_editing_keys() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = AppState {
            editing: Some(EditField::DraftBody),
            ..Default::default()
        };

        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(matches!(
            handle_key(save, &state, &bindings),
            InputResult::Action(Action::Save)
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Tab), &state, &bindings),
            InputResult::Action(Action::NextField)
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Enter), &state, &bindings),
            InputResult::Char('\n')
        ));
    }

    #[test]
    fn test_search_mode() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = AppState {
            modal: ModalState::Search,
            ..Default::default()
        };

        assert!(matches!(
            handle_key(press(KeyCode::Char('j')), &state, &bindings),
            InputResult::Char('j')
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Esc), &state, &bindings),
            InputResult::Action(Action::Cancel)
        ));
    }
}
