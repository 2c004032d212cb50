//! Text projections of emails and processing results

use ratatui::{
    style::Modifier,
    text::{Line, Span},
};

use crate::mail::{ActionItem, ActionItems, EmailRecord, ProcessedResult};
use crate::ui::theme::{Theme, symbols};
use crate::ui::widgets::sanitize_text;

const NO_ACTION_ITEMS: &str = "No action items found for this email.";

fn header_line(label: &'static str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<9}", label), Theme::label()),
        Span::styled(sanitize_text(value), Theme::text()),
    ])
}

fn section_line(title: &str, width: u16) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("── {} ", title),
            Theme::text_secondary().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "─".repeat(width.saturating_sub(title.len() as u16 + 4) as usize),
            Theme::border(),
        ),
    ])
}

/// Header block and body of an email
pub fn email_lines(email: &EmailRecord) -> Vec<Line<'static>> {
    let mut lines = vec![
        header_line("From:", &email.sender),
        header_line("Subject:", &email.subject),
        header_line("Time:", &email.timestamp),
        Line::from(""),
    ];
    lines.extend(
        sanitize_text(&email.body)
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Theme::text()))),
    );
    lines
}

/// Category and action-item cards for a processed email
pub fn result_lines(result: &ProcessedResult, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(""), section_line("Category", width)];
    lines.extend(
        sanitize_text(&result.category.display_text())
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Theme::text_accent()))),
    );

    lines.push(Line::from(""));
    lines.push(section_line("Action items", width));
    match result.action_items() {
        ActionItems::List(items) if items.is_empty() => {
            lines.push(Line::from(Span::styled(NO_ACTION_ITEMS, Theme::text_muted())));
        }
        ActionItems::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    lines.push(Line::from(""));
                }
                lines.extend(card_lines(item));
            }
        }
        ActionItems::Other(value) => {
            let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            lines.extend(
                text.lines()
                    .map(|line| Line::from(Span::styled(line.to_string(), Theme::text()))),
            );
        }
        ActionItems::Raw(raw) => {
            lines.extend(
                sanitize_text(&raw)
                    .lines()
                    .map(|line| Line::from(Span::styled(line.to_string(), Theme::text_secondary()))),
            );
        }
    }
    lines
}

fn card_lines(item: &ActionItem) -> Vec<Line<'static>> {
    let task = item.task.as_deref().unwrap_or("(untitled task)");
    let mut lines = vec![Line::from(vec![
        Span::styled(symbols::CARD_BULLET, Theme::text_accent()),
        Span::styled(sanitize_text(task), Theme::text_bold()),
    ])];

    let fields = [
        ("Urgency:", &item.urgency),
        ("Deadline:", &item.deadline),
        ("Reason:", &item.reason),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", label), Theme::label()),
                Span::styled(sanitize_text(value), Theme::text_secondary()),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::recover;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn result(category: &str, actions: &str) -> ProcessedResult {
        ProcessedResult {
            email: EmailRecord {
                sender: "a@b.c".into(),
                subject: "Hi".into(),
                timestamp: "2024-01-01 09:00".into(),
                body: "Body".into(),
            },
            category: recover(category),
            actions: recover(actions),
        }
    }

    #[test]
    fn test_empty_action_list_shows_notice() {
        let text = plain(&result_lines(&result(r#"{"category":"News"}"#, "[]"), 40));
        assert!(text.iter().any(|l| l.contains("\"category\": \"News\"")));
        assert!(text.iter().any(|l| l == NO_ACTION_ITEMS));
    }

    #[test]
    fn test_cards_show_present_fields_only() {
        let actions = r#"[{"task":"Send report","deadline":"Friday"}]"#;
        let text = plain(&result_lines(&result("{}", actions), 40));
        assert!(text.iter().any(|l| l.ends_with("Send report")));
        assert!(text.iter().any(|l| l.contains("Deadline:") && l.contains("Friday")));
        assert!(!text.iter().any(|l| l.contains("Urgency:")));
    }

    #[test]
    fn test_unparseable_actions_show_raw_text() {
        let text = plain(&result_lines(&result("{}", "nothing to do"), 40));
        assert!(text.iter().any(|l| l == "nothing to do"));
    }

    #[test]
    fn test_unparseable_category_is_sanitized() {
        let text = plain(&result_lines(&result("\x1b[2J\x1b[31mImportant\x07", "[]"), 40));
        assert!(text.iter().any(|l| l == "Important "));
        assert!(!text.iter().any(|l| l.contains('\x1b') || l.contains('\x07')));
    }
}
