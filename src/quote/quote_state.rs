use crate::api::DailyQuote;
use crate::error::TiqError;

use super::signal::{self, SignalReading};

/// What the results pane currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteView {
    /// Nothing looked up yet.
    Idle,
    /// A lookup is in flight for this input.
    Loading(String),
    /// Last lookup succeeded.
    Ready(DailyQuote, SignalReading),
    /// Last lookup failed. Unlike the suggestion path, quote failures are
    /// shown to the user.
    Failed(String),
}

/// State of the run action's OHLC lookup.
///
/// Uses the same request-id tagging as the suggestion state: a response is
/// applied only when it matches the latest issued request.
#[derive(Debug)]
pub struct QuoteState {
    view: QuoteView,
    request_seq: u64,
    latest_request_id: Option<u64>,
}

impl Default for QuoteState {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteState {
    pub fn new() -> Self {
        Self {
            view: QuoteView::Idle,
            request_seq: 0,
            latest_request_id: None,
        }
    }

    /// Begin a lookup for the given input; returns the request id to tag
    /// the outgoing request with.
    pub fn start_request(&mut self, query: &str) -> u64 {
        self.request_seq = self.request_seq.wrapping_add(1);
        self.latest_request_id = Some(self.request_seq);
        self.view = QuoteView::Loading(query.to_string());
        self.request_seq
    }

    /// Apply a lookup completion. Returns `true` if the view changed.
    pub fn apply_response(
        &mut self,
        request_id: u64,
        result: Result<DailyQuote, TiqError>,
    ) -> bool {
        if self.latest_request_id != Some(request_id) {
            #[cfg(debug_assertions)]
            log::debug!("dropping stale quote response {}", request_id);
            return false;
        }
        self.latest_request_id = None;

        self.view = match result {
            Ok(quote) => {
                let reading = signal::derive(&quote);
                QuoteView::Ready(quote, reading)
            }
            Err(e) => QuoteView::Failed(e.to_string()),
        };
        true
    }

    pub fn view(&self) -> &QuoteView {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, QuoteView::Loading(_))
    }
}

#[cfg(test)]
#[path = "quote_state_tests.rs"]
mod quote_state_tests;
