use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use unicode_width::UnicodeWidthStr;

use super::suggest_state::{SuggestState, MAX_SUGGESTIONS};
use crate::widgets::popup;

const MAX_POPUP_WIDTH: usize = 60;
const POPUP_BORDER_HEIGHT: u16 = 2;
const POPUP_PADDING: u16 = 4;
const POPUP_OFFSET_X: u16 = 2;
const SYMBOL_DETAIL_SPACING: usize = 2;
const MAX_SHORTNAME_CHARS: usize = 60;

/// Detail column for a row: shortname plus exchange when present.
fn detail_text(shortname: &str, exchange: &str) -> String {
    let shortname: String = shortname.chars().take(MAX_SHORTNAME_CHARS).collect();
    if exchange.is_empty() {
        shortname
    } else if shortname.is_empty() {
        exchange.to_string()
    } else {
        format!("{} · {}", shortname, exchange)
    }
}

/// Render the suggestion popup anchored above the input field.
///
/// Returns the popup rect so the caller can record it for mouse
/// hit-testing. Rendering is driven purely by the controller state, so
/// repeated calls with unchanged state draw the same output.
pub fn render_popup(
    suggest: &SuggestState,
    frame: &mut Frame,
    input_area: Rect,
) -> Option<Rect> {
    let items = suggest.items();
    if !suggest.is_visible() {
        return None;
    }

    let visible_count = items.len().min(MAX_SUGGESTIONS);
    let popup_height = (visible_count as u16) + POPUP_BORDER_HEIGHT;

    let max_row_width = items
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|it| {
            it.symbol.width()
                + SYMBOL_DETAIL_SPACING
                + detail_text(&it.shortname, &it.exchange).width()
        })
        .max()
        .unwrap_or(20)
        .min(MAX_POPUP_WIDTH);
    let popup_width = (max_row_width as u16) + POPUP_PADDING;

    let popup_area =
        popup::popup_above_anchor(input_area, popup_width, popup_height, POPUP_OFFSET_X);

    let max_symbol_width = items
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|it| it.symbol.width())
        .max()
        .unwrap_or(0);

    let rows: Vec<ListItem> = items
        .iter()
        .take(MAX_SUGGESTIONS)
        .enumerate()
        .map(|(i, it)| {
            let padding = " ".repeat(max_symbol_width.saturating_sub(it.symbol.width()));
            let detail = detail_text(&it.shortname, &it.exchange);

            let line = if Some(i) == suggest.active() {
                Line::from(vec![
                    Span::styled(
                        format!("► {}{} ", it.symbol, padding),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(detail, Style::default().fg(Color::Black).bg(Color::Cyan)),
                ])
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("  {}{} ", it.symbol, padding),
                        Style::default().fg(Color::White).bg(Color::Black),
                    ),
                    Span::styled(detail, Style::default().fg(Color::DarkGray).bg(Color::Black)),
                ])
            };

            ListItem::new(line)
        })
        .collect();

    popup::clear_area(frame, popup_area);

    let list = List::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Symbols ")
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(list, popup_area);
    Some(popup_area)
}

/// Map a mouse position inside the popup to a suggestion row index.
pub fn row_at(popup_area: Rect, suggest: &SuggestState, column: u16, row: u16) -> Option<usize> {
    if !popup_area.contains(ratatui::layout::Position { x: column, y: row }) {
        return None;
    }
    // First content row sits below the top border
    let inner_top = popup_area.y.saturating_add(1);
    if row < inner_top {
        return None;
    }
    let index = (row - inner_top) as usize;
    if index < suggest.items().len().min(MAX_SUGGESTIONS) {
        Some(index)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "suggest_render_tests.rs"]
mod suggest_render_tests;
