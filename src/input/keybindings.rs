use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeybindingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,

    // Tabs
    NextTab,
    PrevTab,
    GoInbox,
    GoAgent,
    GoDrafts,
    GoPrompts,

    // Actions
    Open,
    Back,
    Quit,
    LoadInbox,
    Process,
    Search,
    ToggleScope,
    AskQuestion,
    DraftReply,
    Edit,
    Save,
    Reload,

    // Editing
    NextField,
    Cancel,

    // Help
    Help,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

/// A displayable keybinding entry
#[derive(Debug, Clone)]
pub struct KeybindingEntry {
    pub key: String,
    pub description: String,
    pub category: &'static str,
}

impl KeyBindings {
    pub fn new(mode: &KeybindingMode) -> Self {
        let bindings = match mode {
            KeybindingMode::Vim => Self::vim_bindings(),
            KeybindingMode::Arrows => Self::arrow_bindings(),
        };
        Self { bindings }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    /// Get all keybindings as displayable entries grouped by category
    pub fn all_bindings(&self) -> Vec<KeybindingEntry> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(event, action)| KeybindingEntry {
                key: format_key_event(event),
                description: action_description(action).to_string(),
                category: action_category(action),
            })
            .collect();

        // Sort by category first, then by description
        entries.sort_by(|a, b| {
            category_order(a.category)
                .cmp(&category_order(b.category))
                .then_with(|| a.description.cmp(&b.description))
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }

    fn vim_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = Self::common_bindings();

        // Navigation
        map.insert(key('j'), Action::Down);
        map.insert(key('k'), Action::Up);
        map.insert(key('g'), Action::Top);
        map.insert(shift_key('G'), Action::Bottom);
        map.insert(ctrl_key('d'), Action::PageDown);
        map.insert(ctrl_key('u'), Action::PageUp);

        map.insert(key('q'), Action::Quit);

        map
    }

    fn arrow_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = Self::common_bindings();

        // Navigation
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Home), Action::Top);
        map.insert(key_code(KeyCode::End), Action::Bottom);
        map.insert(key_code(KeyCode::PageDown), Action::PageDown);
        map.insert(key_code(KeyCode::PageUp), Action::PageUp);

        map.insert(key_code(KeyCode::Backspace), Action::Back);
        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(key_code(KeyCode::F(5)), Action::LoadInbox);
        map.insert(key_code(KeyCode::F(3)), Action::Search);

        map
    }

    /// Bindings shared by both modes
    fn common_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Tabs
        map.insert(key_code(KeyCode::Tab), Action::NextTab);
        map.insert(shift_key_code(KeyCode::BackTab), Action::PrevTab);
        map.insert(key('1'), Action::GoInbox);
        map.insert(key('2'), Action::GoAgent);
        map.insert(key('3'), Action::GoDrafts);
        map.insert(key('4'), Action::GoPrompts);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(shift_key('L'), Action::LoadInbox);
        map.insert(key('p'), Action::Process);
        map.insert(key('/'), Action::Search);
        map.insert(key('a'), Action::ToggleScope);
        map.insert(key('i'), Action::AskQuestion);
        map.insert(key('r'), Action::DraftReply);
        map.insert(key('e'), Action::Edit);
        map.insert(ctrl_key('s'), Action::Save);
        map.insert(ctrl_key('r'), Action::Reload);

        // Help
        map.insert(key('.'), Action::Help);

        map
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn shift_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

/// Format a KeyEvent for display
fn format_key_event(event: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl+");
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) && event.code != KeyCode::BackTab {
        parts.push("Shift+");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt+");
    }

    let key_str = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", event.code),
    };

    format!("{}{}", parts.join(""), key_str)
}

/// Get a human-readable description for an action
fn action_description(action: &Action) -> &'static str {
    match action {
        Action::Up => "Move up",
        Action::Down => "Move down",
        Action::Top => "Go to top",
        Action::Bottom => "Go to bottom",
        Action::PageUp => "Page up",
        Action::PageDown => "Page down",
        Action::NextTab => "Next tab",
        Action::PrevTab => "Previous tab",
        Action::GoInbox => "Inbox tab",
        Action::GoAgent => "Agent tab",
        Action::GoDrafts => "Drafts tab",
        Action::GoPrompts => "Prompts tab",
        Action::Open => "Open / select",
        Action::Back => "Go back / close",
        Action::Quit => "Quit",
        Action::LoadInbox => "Load mock inbox",
        Action::Process => "Process selected email",
        Action::Search => "Filter emails",
        Action::ToggleScope => "Toggle question scope",
        Action::AskQuestion => "Ask a question",
        Action::DraftReply => "Draft a reply",
        Action::Edit => "Edit draft / prompt",
        Action::Save => "Save draft / prompts",
        Action::Reload => "Reload prompts from disk",
        Action::NextField => "Next field",
        Action::Cancel => "Cancel",
        Action::Help => "Toggle help",
    }
}

/// Get the category for an action
fn action_category(action: &Action) -> &'static str {
    match action {
        Action::Up
        | Action::Down
        | Action::Top
        | Action::Bottom
        | Action::PageUp
        | Action::PageDown => "Navigation",

        Action::NextTab
        | Action::PrevTab
        | Action::GoInbox
        | Action::GoAgent
        | Action::GoDrafts
        | Action::GoPrompts => "Tabs",

        Action::Open | Action::Back | Action::Quit | Action::Search => "General",

        Action::LoadInbox
        | Action::Process
        | Action::ToggleScope
        | Action::AskQuestion
        | Action::DraftReply => "AI",

        Action::Edit | Action::Save | Action::Reload | Action::NextField | Action::Cancel => {
            "Editing"
        }

        Action::Help => "Help",
    }
}

/// Get sort order for categories
fn category_order(category: &str) -> u8 {
    match category {
        "Navigation" => 0,
        "Tabs" => 1,
        "General" => 2,
        "AI" => 3,
        "Editing" => 4,
        "Help" => 5,
        _ => 99,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vim_bindings() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);

        assert_eq!(bindings.get(&key('j')), Some(Action::Down));
        assert_eq!(bindings.get(&key('k')), Some(Action::Up));
        assert_eq!(bindings.get(&key('q')), Some(Action::Quit));
        assert_eq!(bindings.get(&shift_key('L')), Some(Action::LoadInbox));
        assert_eq!(bindings.get(&key('3')), Some(Action::GoDrafts));
    }

    #[test]
    fn test_arrow_bindings() {
        let bindings = KeyBindings::new(&KeybindingMode::Arrows);

        assert_eq!(bindings.get(&key_code(KeyCode::Down)), Some(Action::Down));
        assert_eq!(bindings.get(&key_code(KeyCode::Up)), Some(Action::Up));
        assert_eq!(bindings.get(&ctrl_key('q')), Some(Action::Quit));
        assert_eq!(bindings.get(&key('q')), None);
        assert_eq!(bindings.get(&ctrl_key('s')), Some(Action::Save));
    }

    #[test]
    fn test_help_entries_are_grouped() {
        let entries = KeyBindings::new(&KeybindingMode::Vim).all_bindings();
        let orders: Vec<u8> = entries.iter().map(|e| category_order(e.category)).collect();

        assert!(orders.windows(2).all(|w| w[0] <= w[1]));
        assert!(entries.iter().any(|e| e.key == "Shift+Tab"));
        assert!(entries.iter().any(|e| e.key == "Ctrl+s" && e.category == "Editing"));
    }
}
