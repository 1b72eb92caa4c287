use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Instant;

use super::input_state::InputState;
use crate::api::{ApiRequest, ApiResponse};
use crate::config::Config;
use crate::layout::LayoutRegions;
use crate::quote::QuoteState;
use crate::suggest::SuggestState;

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    InputField,
    ResultsPane,
}

/// Application state
pub struct App {
    pub input: InputState,
    pub suggest: SuggestState,
    pub quote: QuoteState,
    pub focus: Focus,
    pub should_quit: bool,
    pub status: Option<String>,
    pub layout_regions: LayoutRegions,
    request_tx: Option<Sender<ApiRequest>>,
    response_rx: Option<Receiver<ApiResponse>>,
    dirty: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            input: InputState::new(),
            suggest: SuggestState::new(config.suggest.debounce_ms),
            quote: QuoteState::new(),
            focus: Focus::InputField,
            should_quit: false,
            status: None,
            layout_regions: LayoutRegions::default(),
            request_tx: None,
            response_rx: None,
            dirty: true,
        }
    }

    /// Wire up the API worker channels
    pub fn set_channels(&mut self, tx: Sender<ApiRequest>, rx: Receiver<ApiResponse>) {
        self.request_tx = Some(tx);
        self.response_rx = Some(rx);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn should_render(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Advance time-driven state: drain worker responses, fire a due
    /// debounce deadline, fire a due deferred dismiss.
    ///
    /// `now` is injected so tests can drive the timers without sleeping.
    pub fn tick(&mut self, now: Instant) {
        if self.poll_api_responses() {
            self.mark_dirty();
        }

        let value = self.input.value().to_string();
        if let Some((query, request_id)) = self.suggest.take_due_fetch(&value, now) {
            self.send_request(ApiRequest::Suggest { query, request_id });
        }

        if self.suggest.take_due_dismiss(now) {
            self.mark_dirty();
        }
    }

    /// Called after any edit of the input field's text
    pub fn on_input_changed(&mut self, now: Instant) {
        let value = self.input.value().to_string();
        self.suggest.on_input_changed(&value, now);
    }

    /// Commit the suggestion at `index`: write the symbol into the input,
    /// clear the popup, and trigger the run action. Out-of-range indices
    /// are a silent no-op.
    pub fn commit_suggestion(&mut self, index: usize) {
        let Some(item) = self.suggest.items().get(index) else {
            return;
        };
        let symbol = item.symbol.clone();

        self.input.set_value(&symbol);
        self.suggest.clear();
        self.run_quote_lookup();
    }

    /// The run action: resolve the current input and fetch its OHLC bar
    pub fn run_quote_lookup(&mut self) {
        let query = self.input.value().trim().to_string();
        if query.is_empty() {
            self.status = Some("Enter a company or ticker".to_string());
            self.mark_dirty();
            return;
        }

        self.status = None;
        let request_id = self.quote.start_request(&query);
        self.send_request(ApiRequest::Quote { query, request_id });
        self.mark_dirty();
    }

    /// Move focus to the results pane; leaving the input field schedules
    /// the popup's grace-delay dismiss.
    pub fn focus_results_pane(&mut self, now: Instant) {
        if self.focus == Focus::InputField {
            self.suggest.schedule_dismiss(now);
        }
        self.focus = Focus::ResultsPane;
        self.mark_dirty();
    }

    pub fn focus_input_field(&mut self) {
        self.focus = Focus::InputField;
        self.mark_dirty();
    }

    fn send_request(&self, request: ApiRequest) {
        if let Some(tx) = &self.request_tx {
            let _ = tx.send(request);
        }
    }

    /// Drain the response channel without blocking. Returns `true` if any
    /// response changed visible state.
    fn poll_api_responses(&mut self) -> bool {
        let mut responses = Vec::new();
        let mut disconnected = false;

        if let Some(rx) = &self.response_rx {
            loop {
                match rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let mut changed = false;
        for response in responses {
            changed |= match response {
                ApiResponse::Suggest { request_id, result } => {
                    self.suggest.apply_response(request_id, result)
                }
                ApiResponse::Quote { request_id, result } => {
                    self.quote.apply_response(request_id, result)
                }
            };
        }

        if disconnected {
            self.response_rx = None;
            self.status = Some("API worker disconnected".to_string());
            changed = true;
        }

        changed
    }
}
