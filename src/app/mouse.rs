//! Mouse click handling
//!
//! A click on a suggestion row commits it synchronously, before any
//! scheduled grace-delay dismiss can fire. Clicks elsewhere move focus.

use std::time::Instant;

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::app_state::App;
use crate::layout::{region_at, Region};
use crate::suggest::suggest_render;

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        handle_click(app, mouse.column, mouse.row);
    }
}

fn handle_click(app: &mut App, column: u16, row: u16) {
    match region_at(&app.layout_regions, column, row) {
        Some(Region::SuggestPopup) => {
            if let Some(popup_area) = app.layout_regions.suggest_popup
                && let Some(index) = suggest_render::row_at(popup_area, &app.suggest, column, row)
            {
                app.commit_suggestion(index);
            }
        }
        Some(Region::InputField) => {
            app.focus_input_field();
        }
        Some(Region::ResultsPane) => {
            app.focus_results_pane(Instant::now());
        }
        None => {}
    }
    app.mark_dirty();
}
