//! Yahoo Finance API integration
//!
//! The client talks to the public search and chart endpoints directly.
//! All HTTP happens on a background worker thread (see [`worker`]) so the
//! UI event loop never blocks on the network.

pub mod client;
pub mod types;
pub mod worker;

pub use client::YahooClient;
pub use types::{ApiRequest, ApiResponse, DailyQuote, SuggestionItem};
pub use worker::spawn_worker;
