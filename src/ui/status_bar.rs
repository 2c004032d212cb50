//! Two-line header: tab strip on top, session counters and request state below

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::{Theme, symbols};
use crate::app::state::{AppState, PendingRequest, Tab};
use crate::constants::SPINNER_FRAME_MS;

const SPINNER: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Spinner frame for a request started at `pending.started`
pub fn spinner_char(pending: &PendingRequest) -> char {
    let frames = SPINNER.chars().count();
    let idx = (pending.started.elapsed().as_millis() / SPINNER_FRAME_MS) as usize % frames;
    SPINNER.chars().nth(idx).unwrap_or('*')
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_tabs(frame, rows[0], state);
    render_counters(frame, rows[1], state);
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(" mailmind ", Theme::tab_active())];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        spans.push(Span::styled(
            if i == 0 { "  " } else { symbols::TAB_SEPARATOR },
            Theme::status_muted(),
        ));
        let label = format!("{} {}", i + 1, tab.title());
        let style = if *tab == state.tab {
            Theme::tab_active()
        } else {
            Theme::status_bar()
        };
        spans.push(Span::styled(label, style));
    }

    if !state.ai_available {
        spans.push(Span::styled("   AI off", Theme::status_error()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(paragraph, area);
}

fn render_counters(frame: &mut Frame, area: Rect, state: &AppState) {
    let session = &state.session;
    let loaded = if session.is_loaded() {
        format!(" {} emails", session.emails().len())
    } else {
        " inbox not loaded".to_string()
    };

    let mut spans = vec![
        Span::styled(loaded, Theme::status_muted()),
        Span::styled(
            format!(" · {} processed", session.processed().len()),
            Theme::status_muted(),
        ),
        Span::styled(
            format!(" · {} saved drafts", session.saved_drafts().len()),
            Theme::status_muted(),
        ),
    ];

    if state.inbox.search.matches.is_some() {
        spans.push(Span::styled(
            format!(" · filter \"{}\"", state.inbox.search.query),
            Theme::status_muted(),
        ));
    }

    if let Some(pending) = &state.status.pending {
        spans.push(Span::styled(
            format!("  {} {}...", spinner_char(pending), pending.action.label()),
            Theme::status_busy(),
        ));
    }

    if state.status.has_unacknowledged_error {
        spans.push(Span::styled("  !", Theme::status_error()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(paragraph, area);
}
