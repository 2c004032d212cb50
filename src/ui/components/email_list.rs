use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::mail::EmailRecord;
use crate::ui::theme::{Theme, symbols, with_selection_bg};
use crate::ui::widgets::truncate_string;

/// One row of an email list
pub struct EmailRow<'a> {
    pub email: &'a EmailRecord,
    pub processed: bool,
}

/// Render "subject — sender" rows with a processed marker.
/// `show_border` is false when the list fills a narrow terminal on its own.
pub fn render_email_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[EmailRow],
    selected: usize,
    show_border: bool,
) {
    let block = if show_border {
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::RIGHT)
            .border_style(Theme::border())
    } else {
        Block::default()
    };
    let width = block.inner(area).width as usize;

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let is_selected = i == selected;
            let (marker, marker_style) = if row.processed {
                (symbols::PROCESSED, Theme::text_success())
            } else {
                (symbols::UNPROCESSED, Theme::text_muted())
            };
            let label = truncate_string(&row.email.label(), width.saturating_sub(3));
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", marker), with_selection_bg(marker_style, is_selected)),
                Span::styled(label, with_selection_bg(Theme::text(), is_selected)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Theme::main_bg())
        .highlight_style(Theme::selected());
    let mut list_state = ListState::default().with_selected(if rows.is_empty() {
        None
    } else {
        Some(selected.min(rows.len() - 1))
    });
    frame.render_stateful_widget(list, area, &mut list_state);
}
