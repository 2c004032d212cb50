//! Agent tab: ask the model about one processed email or the whole inbox

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::ai::{AiAction, AnswerScope};
use crate::app::state::{AgentScope, AppState, EditField};
use crate::constants::{CONTENT_PADDING_H, SPLIT_RATIO_MAX, SPLIT_RATIO_MIN};

use super::components::{EmailRow, render_email_list};
use super::status_bar::spinner_char;
use super::theme::Theme;
use super::widgets::{empty_hint, sanitize_text, text_field};

pub fn render_agent(frame: &mut Frame, area: Rect, state: &AppState) {
    let processed = state.session.processed();
    if processed.is_empty() {
        empty_hint(
            frame,
            area,
            "Nothing processed yet",
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

    render_email_list(frame, split[0], "Processed", &rows, state.agent.selected, true);

    let pane = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(CONTENT_PADDING_H), Constraint::Min(0)])
        .split(split[1])[1];

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Scope
            Constraint::Length(3), // Question
            Constraint::Min(0),    // Answer
        ])
        .split(pane);

    render_scope(frame, sections[0], state);
    text_field(
        frame,
        sections[1],
        "Question",
        &state.agent.question,
        state.editing == Some(EditField::Question),
    );
    render_answer(frame, sections[2], state);
}

fn render_scope(frame: &mut Frame, area: Rect, state: &AppState) {
    let target = match state.agent.scope {
        AgentScope::ThisEmail => state
            .session
            .processed_at(state.agent.selected)
            .map(|result| format!(" ({})", result.email.subject))
            .unwrap_or_default(),
        AgentScope::Inbox => format!(" ({} processed)", state.session.processed().len()),
    };

    let line = Line::from(vec![
        Span::styled("Asking about: ", Theme::label()),
        Span::styled(state.agent.scope.label(), Theme::text_accent()),
        Span::styled(sanitize_text(&target), Theme::text_muted()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::main_bg()), area);
}

fn render_answer(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::new();

    if let Some(pending) = &state.status.pending
        && pending.action == AiAction::Ask
    {
        lines.push(Line::styled(
            format!("{} Thinking...", spinner_char(pending)),
            Theme::text_muted(),
        ));
        lines.push(Line::from(""));
    }

    match &state.agent.answer {
        Some(view) => {
            let about = match &view.scope {
                AnswerScope::Email { subject } => format!("About \"{}\"", subject),
                AnswerScope::Inbox => "About the inbox".to_string(),
            };
            lines.push(Line::styled(sanitize_text(&about), Theme::label()));
            lines.push(Line::from(vec![
                Span::styled("Q: ", Theme::text_accent()),
                Span::styled(sanitize_text(&view.question), Theme::text_secondary()),
            ]));
            lines.push(Line::from(""));
            lines.extend(
                sanitize_text(&view.answer)
                    .lines()
                    .map(|line| Line::styled(line.to_string(), Theme::text())),
            );
        }
        None if lines.is_empty() => {
            lines.push(Line::styled(
                "i to ask a question, a to switch between this email and the inbox",
                Theme::text_muted(),
            ));
        }
        None => {}
    }

    let paragraph = Paragraph::new(lines)
        .style(Theme::main_bg())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
