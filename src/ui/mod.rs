mod agent;
mod components;
mod drafts;
mod inbox;
mod prompts;
mod status_bar;
pub mod theme;
mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
};

use crate::app::state::{AppState, EditField, ModalState, Tab};
use crate::constants::{HELP_BAR_HEIGHT, STATUS_BAR_HEIGHT};

use components::render_help_popup;
use theme::Theme;
use widgets::{error_bar, help_bar, message_bar};

pub fn render(frame: &mut Frame, state: &AppState) {
    frame.render_widget(Block::default().style(Theme::main_bg()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(frame.area());

    status_bar::render_status_bar(frame, chunks[0], state);

    match state.tab {
        Tab::Inbox => inbox::render_inbox(frame, chunks[1], state),
        Tab::Agent => agent::render_agent(frame, chunks[1], state),
        Tab::Drafts => drafts::render_drafts(frame, chunks[1], state),
        Tab::Prompts => prompts::render_prompts(frame, chunks[1], state),
    }

    render_footer(frame, chunks[2], state);

    // Help popup (rendered last so it appears on top)
    if let ModalState::Help {
        ref keybindings,
        scroll,
    } = state.modal
    {
        render_help_popup(frame, frame.area(), keybindings, scroll);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if let Some(ref error) = state.status.error {
        error_bar(frame, rows[0], error);
    } else {
        message_bar(frame, rows[0], &state.status.message);
    }

    help_bar(frame, rows[1], hints(state));
}

/// Key hints for the current context, using keys bound in every mode
fn hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    if state.modal.is_help() {
        return &[("j/k", "scroll"), (".", "close")];
    }
    if state.modal.is_search() {
        return &[("Type", "filter"), ("Enter", "keep"), ("Esc", "clear")];
    }

    match state.editing {
        Some(EditField::Question) => return &[("Enter", "ask"), ("Esc", "cancel")],
        Some(EditField::DraftSubject | EditField::DraftBody) => {
            return &[("Tab", "next field"), ("Ctrl+S", "save draft"), ("Esc", "done")];
        }
        Some(EditField::Prompt) => return &[("Ctrl+S", "save prompts"), ("Esc", "done")],
        None => {}
    }

    match state.tab {
        Tab::Inbox => &[
            ("L", "load"),
            ("p", "process"),
            ("/", "search"),
            ("Tab", "next tab"),
            (".", "help"),
        ],
        Tab::Agent => &[
            ("i", "ask"),
            ("a", "scope"),
            ("Tab", "next tab"),
            (".", "help"),
        ],
        Tab::Drafts => &[
            ("r", "draft reply"),
            ("e", "edit"),
            ("Ctrl+S", "save"),
            ("Tab", "next tab"),
            (".", "help"),
        ],
        Tab::Prompts => &[
            ("e", "edit"),
            ("Ctrl+S", "save"),
            ("Ctrl+R", "reload"),
            ("Tab", "next tab"),
            (".", "help"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::recover;
    use crate::config::KeybindingMode;
    use crate::input::KeyBindings;
    use crate::mail::{Draft, EmailRecord, ProcessedResult};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(state: &AppState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn email(subject: &str) -> EmailRecord {
        EmailRecord {
            sender: "lee@example.com".into(),
            subject: subject.into(),
            timestamp: "2024-05-02 10:00".into(),
            body: "Please review the attached plan.".into(),
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.session.load_inbox(vec![email("Quarterly plan"), email("Lunch")]);
        state.session.record_processed(ProcessedResult {
            email: email("Quarterly plan"),
            category: recover(r#"{"category": "Work"}"#),
            actions: recover(r#"[{"task": "Review plan", "urgency": "high"}]"#),
        });
        state
    }

    #[test]
    fn test_empty_inbox_shows_load_hint() {
        let state = AppState::default();
        let text = screen(&state, 100, 20);
        assert!(text.contains("Inbox not loaded"));
        assert!(text.contains("1 Inbox"));
    }

    #[test]
    fn test_inbox_preview_shows_results() {
        let state = loaded_state();
        let text = screen(&state, 140, 30);
        assert!(text.contains("Quarterly plan — lee@example.com"));
        assert!(text.contains("\"category\": \"Work\""));
        assert!(text.contains("Review plan"));
        assert!(text.contains("1 processed"));
    }

    #[test]
    fn test_drafts_tab_shows_current_and_saved() {
        let mut state = loaded_state();
        state.tab = Tab::Drafts;
        state.session.set_current_draft(Draft {
            subject: "Re: Quarterly plan".into(),
            body: "Looks good.".into(),
        });
        state.session.save_current_draft().unwrap();
        let text = screen(&state, 120, 30);
        assert!(text.contains("Looks good."));
        assert!(text.contains("Draft 1: Re: Quarterly plan"));
    }

    #[test]
    fn test_draft_text_is_sanitized() {
        let mut state = loaded_state();
        state.tab = Tab::Drafts;
        state.session.set_current_draft(Draft {
            subject: "Re: \x1b[1mPlan".into(),
            body: "\x1b[2J\x1b[31mThanks\x07 team".into(),
        });
        let text = screen(&state, 120, 30);
        assert!(text.contains("Thanks  team"));
        assert!(text.contains("Re: Plan"));
        assert!(!text.contains('\x1b'));
        assert!(!text.contains('\x07'));
        // The stored draft keeps the model's text untouched
        let draft = state.session.current_draft().unwrap();
        assert!(draft.body.starts_with('\x1b'));
    }

    #[test]
    fn test_help_popup_and_error_render() {
        let mut state = loaded_state();
        state.tab = Tab::Prompts;
        state.set_error("AI Error: boom");
        state.modal = ModalState::Help {
            keybindings: KeyBindings::new(&KeybindingMode::Vim).all_bindings(),
            scroll: 0,
        };
        let text = screen(&state, 100, 40);
        assert!(text.contains("Help"));
        assert!(text.contains("Error: AI Error: boom"));
    }

    #[test]
    fn test_narrow_terminal_renders_every_tab() {
        let mut state = loaded_state();
        for tab in Tab::ALL {
            state.tab = tab;
            screen(&state, 30, 8);
        }
    }
}
