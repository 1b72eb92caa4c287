//! Suggestion controller
//!
//! Owns the debounced, keyboard-navigable autocomplete state: at most one
//! suggestion fetch in flight per distinct query, a popup capped at 10
//! rows, and a highlighted selection that a commit resolves to a ticker.

pub mod debouncer;
pub mod suggest_render;
pub mod suggest_state;

pub use suggest_state::{SuggestState, MAX_SUGGESTIONS};
