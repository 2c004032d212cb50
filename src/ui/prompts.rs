//! Prompts tab: view and edit the three prompt templates

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::state::{AppState, EditField};
use crate::constants::{SPLIT_RATIO_MAX, SPLIT_RATIO_MIN};
use crate::store::PromptKind;

use super::theme::{Theme, with_selection_bg};
use super::widgets::text_field;

pub fn render_prompts(frame: &mut Frame, area: Rect, state: &AppState) {
    let ratio = state.split_ratio.clamp(SPLIT_RATIO_MIN, SPLIT_RATIO_MAX);
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(ratio),
            Constraint::Percentage(100 - ratio),
        ])
        .split(area);

    let view = &state.prompts;
    let title = if view.modified {
        " Prompts [modified] "
    } else {
        " Prompts "
    };

    let items: Vec<ListItem> = PromptKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let style = with_selection_bg(Theme::text(), i == view.selected);
            ListItem::new(Line::from(Span::styled(format!(" {}", kind.label()), style)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::RIGHT)
                .border_style(Theme::border()),
        )
        .style(Theme::main_bg())
        .highlight_style(Theme::selected());
    let mut list_state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(list, split[0], &mut list_state);

    let kind = view.selected_kind();
    text_field(
        frame,
        split[1],
        kind.label(),
        view.prompts.get(kind),
        state.editing == Some(EditField::Prompt),
    );
}
