use std::time::{Duration, Instant};

use super::debouncer::Debouncer;
use crate::api::SuggestionItem;
use crate::error::TiqError;

/// Hard cap on suggestion rows, regardless of how many the API returns.
pub const MAX_SUGGESTIONS: usize = 10;

/// Default quiet period before a typed query is fetched.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Grace period between losing focus and dismissing the popup, so a
/// synchronous row click can commit first.
const DISMISS_GRACE_MS: u64 = 120;

/// State of the suggestion popup and its fetch pipeline.
///
/// `last_query` tracks the last trimmed query that actually triggered a
/// fetch; it deliberately survives every clear so retyping the identical
/// string never re-fetches. `latest_request_id` tags the newest issued
/// fetch; responses carrying any other id are stale and dropped.
#[derive(Debug)]
pub struct SuggestState {
    items: Vec<SuggestionItem>,
    active: Option<usize>,
    visible: bool,
    last_query: String,
    request_seq: u64,
    latest_request_id: Option<u64>,
    debouncer: Debouncer,
    dismiss_deadline: Option<Instant>,
}

impl SuggestState {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            items: Vec::new(),
            active: None,
            visible: false,
            last_query: String::new(),
            request_seq: 0,
            latest_request_id: None,
            debouncer: Debouncer::new(debounce_ms),
            dismiss_deadline: None,
        }
    }

    // -----------------------------------------------------------------
    // Input pipeline
    // -----------------------------------------------------------------

    /// React to a change of the input field's raw value.
    ///
    /// Empty input clears synchronously: no debounce, no stale popup for an
    /// empty box, and any pending fetch interest is dropped. A value equal
    /// to `last_query` is a no-op. Anything else (re)schedules the single
    /// debounce deadline.
    pub fn on_input_changed(&mut self, raw_value: &str, now: Instant) {
        let query = raw_value.trim();

        if query.is_empty() {
            self.clear();
            return;
        }
        if query == self.last_query {
            return;
        }
        self.debouncer.schedule(now);
    }

    /// Consume a due debounce deadline and issue a fetch for the current
    /// input value.
    ///
    /// Returns the query and its request id when a fetch should be sent.
    /// The value is re-checked against `last_query` at fire time: the
    /// deadline may have been scheduled for a value the user has since
    /// edited back to the already-fetched string.
    pub fn take_due_fetch(&mut self, raw_value: &str, now: Instant) -> Option<(String, u64)> {
        if !self.debouncer.take_ready(now) {
            return None;
        }

        let query = raw_value.trim();
        if query.is_empty() || query == self.last_query {
            return None;
        }

        self.last_query = query.to_string();
        self.request_seq = self.request_seq.wrapping_add(1);
        self.latest_request_id = Some(self.request_seq);
        Some((query.to_string(), self.request_seq))
    }

    /// Apply a fetch completion. Returns `true` if state changed.
    ///
    /// Stale completions (id other than the latest issued) are dropped, so
    /// the visible items always reflect the newest issued fetch that has
    /// completed. Failures degrade to the cleared panel; the error is not
    /// surfaced on the suggestion path.
    pub fn apply_response(
        &mut self,
        request_id: u64,
        result: Result<Vec<SuggestionItem>, TiqError>,
    ) -> bool {
        if self.latest_request_id != Some(request_id) {
            #[cfg(debug_assertions)]
            log::debug!("dropping stale suggest response {}", request_id);
            return false;
        }
        self.latest_request_id = None;

        match result {
            Ok(items) => self.update_items(items),
            Err(_e) => {
                #[cfg(debug_assertions)]
                log::debug!("suggest fetch failed: {}", _e);
                self.clear_panel();
            }
        }
        true
    }

    fn update_items(&mut self, mut items: Vec<SuggestionItem>) {
        items.truncate(MAX_SUGGESTIONS);
        self.items = items;
        self.active = None;
        self.visible = !self.items.is_empty();
    }

    // -----------------------------------------------------------------
    // Clearing and dismissal
    // -----------------------------------------------------------------

    /// Clear all suggestion state: items, highlight, visibility, pending
    /// debounce, and interest in any in-flight fetch. `last_query` is
    /// intentionally left alone.
    pub fn clear(&mut self) {
        self.clear_panel();
        self.debouncer.cancel();
        self.latest_request_id = None;
        self.dismiss_deadline = None;
    }

    fn clear_panel(&mut self) {
        self.items.clear();
        self.active = None;
        self.visible = false;
    }

    /// Escape: dismiss unconditionally without touching the input value.
    pub fn dismiss(&mut self) {
        self.clear();
    }

    /// Focus left the input field: dismiss after a short grace period.
    ///
    /// The deferred deadline lets a click on a popup row (handled
    /// synchronously) commit before the dismissal fires.
    pub fn schedule_dismiss(&mut self, now: Instant) {
        self.dismiss_deadline = Some(now + Duration::from_millis(DISMISS_GRACE_MS));
    }

    /// Fire a due deferred dismiss. Returns `true` if state changed.
    pub fn take_due_dismiss(&mut self, now: Instant) -> bool {
        match self.dismiss_deadline {
            Some(deadline) if now >= deadline => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }

    // -----------------------------------------------------------------
    // Keyboard navigation
    // -----------------------------------------------------------------

    /// Move the highlight down one row, clamped to the last row.
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.active = Some(match self.active {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        });
    }

    /// Move the highlight up one row, clamped to the first row.
    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.active = Some(match self.active {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.items.is_empty()
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.debouncer.has_pending()
    }

    pub fn has_pending_dismiss(&self) -> bool {
        self.dismiss_deadline.is_some()
    }
}

#[cfg(test)]
#[path = "suggest_state_tests.rs"]
mod suggest_state_tests;
