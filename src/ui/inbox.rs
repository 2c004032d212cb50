//! Inbox tab: email list with a preview of the selected email and its results

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::constants::{CONTENT_PADDING_H, MIN_SPLIT_VIEW_WIDTH, SPLIT_RATIO_MAX, SPLIT_RATIO_MIN};

use super::components::{EmailRow, email_lines, render_email_list, result_lines};
use super::theme::Theme;
use super::widgets::empty_hint;

pub fn render_inbox(frame: &mut Frame, area: Rect, state: &AppState) {
    if !state.session.is_loaded() {
        empty_hint(
            frame,
            area,
            "Inbox not loaded",
            &["L to load the inbox", ". for help"],
        );
        return;
    }

    let show_search_bar = state.modal.is_search() || !state.inbox.search.query.is_empty();
    let (search_area, main_area) = if show_search_bar {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    if let Some(area) = search_area {
        render_search_bar(frame, area, state);
    }

    let emails = state.session.emails();
    let rows: Vec<EmailRow> = state
        .visible_email_indices()
        .into_iter()
        .filter_map(|i| emails.get(i))
        .map(|email| EmailRow {
            email,
            processed: state.session.is_processed(email),
        })
        .collect();

    if rows.is_empty() {
        empty_hint(
            frame,
            main_area,
            "No matching emails",
            &["Esc in the search bar clears the filter"],
        );
        return;
    }

    if main_area.width >= MIN_SPLIT_VIEW_WIDTH {
        let ratio = state.split_ratio.clamp(SPLIT_RATIO_MIN, SPLIT_RATIO_MAX);
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(ratio),
                Constraint::Percentage(100 - ratio),
            ])
            .split(main_area);

        render_email_list(frame, split[0], "Inbox", &rows, state.inbox.selected, true);
        render_preview(frame, split[1], state);
    } else {
        render_email_list(frame, main_area, "Inbox", &rows, state.inbox.selected, false);
    }
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let style = if state.modal.is_search() {
        Theme::status_bar()
    } else {
        Theme::text_secondary()
    };

    let cursor = if state.modal.is_search() { "│" } else { "" };
    let text = format!(" / {}{} ", state.inbox.search.query, cursor);
    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_preview(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(CONTENT_PADDING_H), Constraint::Min(0)])
        .split(area);
    let inner = chunks[1];

    let Some(email) = state.selected_email() else {
        empty_hint(frame, inner, "No email selected", &[]);
        return;
    };

    let mut lines = email_lines(email);
    match state.session.result_for(email) {
        Some(result) => lines.extend(result_lines(result, inner.width)),
        None => {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                "Not processed yet. Press p to categorize and extract action items.",
                Theme::text_muted(),
            ));
        }
    }

    let paragraph = Paragraph::new(lines)
        .style(Theme::main_bg())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
