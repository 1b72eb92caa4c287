use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::quote_state::{QuoteState, QuoteView};
use super::signal::Signal;

/// Render the results pane: OHLC values and the derived signal.
pub fn render_results(quote: &QuoteState, frame: &mut Frame, area: Rect, focused: bool) {
    let border_color = if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Results ")
        .border_style(Style::default().fg(border_color));

    let lines: Vec<Line> = match quote.view() {
        QuoteView::Idle => vec![Line::from(Span::styled(
            "Type a company or ticker, pick a suggestion, press Enter.",
            Style::default().fg(Color::DarkGray),
        ))],
        QuoteView::Loading(query) => vec![Line::from(Span::styled(
            format!("Loading {}…", query),
            Style::default().fg(Color::Yellow),
        ))],
        QuoteView::Failed(message) => vec![Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red),
        ))],
        QuoteView::Ready(q, reading) => {
            let signal_color = match reading.direction {
                Signal::Up => Color::Green,
                Signal::Down => Color::Red,
            };
            vec![
                Line::from(Span::styled(
                    q.ticker.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Open:  {}", q.open)),
                Line::from(format!("High:  {}", q.high)),
                Line::from(format!("Low:   {}", q.low)),
                Line::from(format!("Close: {}", q.close)),
                Line::from(vec![
                    Span::raw("Signal: "),
                    Span::styled(
                        reading.direction.to_string(),
                        Style::default()
                            .fg(signal_color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" (Bindu {})", reading.bindu)),
                ]),
            ]
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
#[path = "quote_render_tests.rs"]
mod quote_render_tests;
