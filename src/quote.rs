//! Quote lookup and signal derivation
//!
//! The run action: resolve the typed ticker, fetch its daily OHLC bar, and
//! derive a directional signal shown in the results pane.

pub mod quote_render;
pub mod quote_state;
pub mod signal;

pub use quote_state::{QuoteState, QuoteView};
pub use signal::{Signal, SignalReading};
