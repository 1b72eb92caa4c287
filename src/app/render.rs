use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::{App, Focus};
use crate::quote::quote_render;
use crate::suggest::suggest_render;

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Min(3),    // Results pane takes most of the space
            Constraint::Length(3), // Input field is fixed 3 lines
            Constraint::Length(1), // Help line at bottom
        ])
        .split(frame.area());

        let results_area = layout[0];
        let input_area = layout[1];
        let help_area = layout[2];

        self.layout_regions.results_pane = Some(results_area);
        self.layout_regions.input_field = Some(input_area);

        quote_render::render_results(
            &self.quote,
            frame,
            results_area,
            self.focus == Focus::ResultsPane,
        );

        self.render_input_field(frame, input_area);
        self.render_help_line(frame, help_area);

        // Popup rendered last so it overlays the results pane; its rect is
        // recorded for mouse hit-testing
        self.layout_regions.suggest_popup =
            suggest_render::render_popup(&self.suggest, frame, input_area);
    }

    fn render_input_field(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focus == Focus::InputField {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        self.input.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Ticker ")
                .border_style(Style::default().fg(border_color)),
        );
        frame.render_widget(&self.input.textarea, area);
    }

    fn render_help_line(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(status) => Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(
                " ↑/↓ navigate · Enter run · Esc dismiss · Tab focus · Ctrl+Q quit",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
