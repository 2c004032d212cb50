//! Drafts tab: generate a reply for a processed email, edit it, keep it

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ai::AiAction;
use crate::app::state::{AppState, EditField};
use crate::constants::{CONTENT_PADDING_H, DRAFT_PREVIEW_LINES, SPLIT_RATIO_MAX, SPLIT_RATIO_MIN};

use super::components::{EmailRow, render_email_list};
use super::status_bar::spinner_char;
use super::theme::Theme;
use super::widgets::{empty_hint, sanitize_text, text_field, truncate_string};

pub fn render_drafts(frame: &mut Frame, area: Rect, state: &AppState) {
    let processed = state.session.processed();
    if processed.is_empty() {
        empty_hint(
            frame,
            area,
            "Nothing to reply to yet",
            &["Process at least 1 email first (p in the Inbox tab)"],
        );
        return;
    }

    let rows: Vec<EmailRow> = processed
        .iter()
        .map(|result| EmailRow {
            email: &result.email,
            processed: true,
        })
        .collect();

    let ratio = state.split_ratio.clamp(SPLIT_RATIO_MIN, SPLIT_RATIO_MAX);
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(ratio),
            Constraint::Percentage(100 - ratio),
        ])
        .split(area);

    render_email_list(frame, split[0], "Reply to", &rows, state.drafts.selected, true);

    let pane = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(CONTENT_PADDING_H), Constraint::Min(0)])
        .split(split[1])[1];

    let saved_height = (state.session.saved_drafts().len() * (DRAFT_PREVIEW_LINES + 1) + 2)
        .min(pane.height as usize / 3) as u16;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),               // Current draft
            Constraint::Length(saved_height), // Saved drafts
        ])
        .split(pane);

    render_current_draft(frame, sections[0], state);
    render_saved_drafts(frame, sections[1], state);
}

fn render_current_draft(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(draft) = state.session.current_draft() else {
        let hint = match &state.status.pending {
            Some(pending) if pending.action == AiAction::Draft => {
                format!("{} Drafting...", spinner_char(pending))
            }
            _ => "r to draft a reply to the selected email".to_string(),
        };
        let paragraph = Paragraph::new(Line::styled(hint, Theme::text_muted()))
            .style(Theme::main_bg());
        frame.render_widget(paragraph, area);
        return;
    };

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    text_field(
        frame,
        fields[0],
        "Subject",
        &draft.subject,
        state.editing == Some(EditField::DraftSubject),
    );
    text_field(
        frame,
        fields[1],
        "Body",
        &draft.body,
        state.editing == Some(EditField::DraftBody),
    );
}

fn render_saved_drafts(frame: &mut Frame, area: Rect, state: &AppState) {
    let saved = state.session.saved_drafts();
    let block = Block::default()
        .title(format!(" Saved drafts ({}) ", saved.len()))
        .borders(Borders::TOP)
        .border_style(Theme::border());
    let width = block.inner(area).width as usize;

    let mut lines = Vec::new();
    for (i, entry) in saved.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Draft {}: {}", i + 1, sanitize_text(&entry.draft.subject)),
                Theme::text_bold(),
            ),
            Span::styled(
                entry.saved_at.format("  %H:%M:%S").to_string(),
                Theme::text_muted(),
            ),
        ]));
        lines.extend(
            entry
                .draft
                .body
                .lines()
                .take(DRAFT_PREVIEW_LINES)
                .map(|line| {
                    Line::styled(
                        format!("  {}", truncate_string(&sanitize_text(line), width.saturating_sub(2))),
                        Theme::text_secondary(),
                    )
                }),
        );
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Theme::main_bg())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
