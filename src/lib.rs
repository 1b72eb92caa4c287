//! tiq library - Interactive stock ticker lookup
//!
//! This library exposes the core functionality of tiq for testing purposes.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod layout;
pub mod quote;
pub mod suggest;
pub mod widgets;

// Re-export commonly used types for convenience
pub use app::{App, Focus};
pub use config::Config;
pub use error::TiqError;
