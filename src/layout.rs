//! Region tracking for position-aware mouse interactions
//!
//! Rects are recorded during rendering; `region_at()` maps a screen
//! position back to the component under it. The suggestion popup overlays
//! the other components, so it is checked first.

use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    ResultsPane,
    InputField,
    SuggestPopup,
}

#[derive(Debug, Default)]
pub struct LayoutRegions {
    pub results_pane: Option<Rect>,
    pub input_field: Option<Rect>,
    pub suggest_popup: Option<Rect>,
}

pub fn region_at(regions: &LayoutRegions, column: u16, row: u16) -> Option<Region> {
    let position = Position { x: column, y: row };

    if let Some(rect) = regions.suggest_popup
        && rect.contains(position)
    {
        return Some(Region::SuggestPopup);
    }
    if let Some(rect) = regions.input_field
        && rect.contains(position)
    {
        return Some(Region::InputField);
    }
    if let Some(rect) = regions.results_pane
        && rect.contains(position)
    {
        return Some(Region::ResultsPane);
    }
    None
}
