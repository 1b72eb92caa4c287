//! Tests for the suggestion controller state

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::*;

const DEBOUNCE_MS: u64 = 200;

fn at(base: Instant, offset_ms: u64) -> Instant {
    base + Duration::from_millis(offset_ms)
}

fn item(symbol: &str) -> SuggestionItem {
    SuggestionItem::new(symbol, format!("{} Inc", symbol), "NMS")
}

fn state_with_items(symbols: &[&str]) -> SuggestState {
    let mut state = SuggestState::new(DEBOUNCE_MS);
    let now = Instant::now();
    state.on_input_changed("query", now);
    let (_, id) = state
        .take_due_fetch("query", at(now, DEBOUNCE_MS))
        .expect("fetch should fire");
    state.apply_response(id, Ok(symbols.iter().map(|s| item(s)).collect()));
    state
}

// =========================================================================
// Debounce and fetch issuing
// =========================================================================

#[test]
fn test_rapid_typing_issues_one_fetch_for_last_value() {
    let base = Instant::now();
    let mut state = SuggestState::new(DEBOUNCE_MS);

    // "R", "RE", "REL", "RELI" typed 50ms apart, all within the window
    state.on_input_changed("R", at(base, 0));
    state.on_input_changed("RE", at(base, 50));
    state.on_input_changed("REL", at(base, 100));
    state.on_input_changed("RELI", at(base, 150));

    assert!(state.take_due_fetch("RELI", at(base, 150)).is_none());

    let fired = state.take_due_fetch("RELI", at(base, 150 + DEBOUNCE_MS));
    assert_eq!(fired.map(|(q, _)| q), Some("RELI".to_string()));

    // Nothing else pending
    assert!(
        state
            .take_due_fetch("RELI", at(base, 150 + DEBOUNCE_MS * 2))
            .is_none()
    );
}

#[test]
fn test_identical_query_is_not_refetched() {
    let base = Instant::now();
    let mut state = SuggestState::new(DEBOUNCE_MS);

    state.on_input_changed("AAPL", at(base, 0));
    let (query, _) = state.take_due_fetch("AAPL", at(base, DEBOUNCE_MS)).unwrap();
    assert_eq!(query, "AAPL");

    // Retyping the same trimmed string schedules nothing
    state.on_input_changed("AAPL", at(base, 500));
    assert!(!state.has_pending_fetch());
    assert!(
        state
            .take_due_fetch("AAPL", at(base, 500 + DEBOUNCE_MS))
            .is_none()
    );
}

#[test]
fn test_identical_query_guard_survives_clear() {
    let base = Instant::now();
    let mut state = SuggestState::new(DEBOUNCE_MS);

    state.on_input_changed("AAPL", at(base, 0));
    state.take_due_fetch("AAPL", at(base, DEBOUNCE_MS)).unwrap();

    // Clear (empty input), then retype the identical string
    state.on_input_changed("", at(base, 300));
    state.on_input_changed("AAPL", at(base, 400));

    assert!(!state.has_pending_fetch());
}

#[test]
fn test_guard_is_on_trimmed_string() {
    let base = Instant::now();
    let mut state = SuggestState::new(DEBOUNCE_MS);

    state.on_input_changed("AAPL", at(base, 0));
    state.take_due_fetch("AAPL", at(base, DEBOUNCE_MS)).unwrap();

    state.on_input_changed("  AAPL  ", at(base, 500));
    assert!(!state.has_pending_fetch());
}

#[test]
fn test_fire_time_guard_skips_value_edited_back() {
    let base = Instant::now();
    let mut state = SuggestState::new(DEBOUNCE_MS);

    state.on_input_changed("AB", at(base, 0));
    state.take_due_fetch("AB", at(base, DEBOUNCE_MS)).unwrap();

    // Type "ABC" (schedules), then backspace to "AB" (no-op: equals
    // last_query). The pending deadline fires with the current value "AB"
    // and must not re-fetch it.
    state.on_input_changed("ABC", at(base, 300));
    state.on_input_changed("AB", at(base, 350));
    assert!(
        state
            .take_due_fetch("AB", at(base, 300 + DEBOUNCE_MS * 2))
            .is_none()
    );
}

#[test]
fn test_empty_input_clears_synchronously() {
    let base = Instant::now();
    let mut state = state_with_items(&["AAPL", "AMZN"]);
    assert!(state.is_visible());

    state.on_input_changed("NEW", at(base, 0));
    assert!(state.has_pending_fetch());

    state.on_input_changed("", at(base, 50));
    assert!(!state.is_visible());
    assert!(state.items().is_empty());
    // The pending debounce does not survive
    assert!(!state.has_pending_fetch());
    assert!(
        state
            .take_due_fetch("", at(base, 50 + DEBOUNCE_MS * 2))
            .is_none()
    );
}

#[test]
fn test_whitespace_only_input_counts_as_empty() {
    let base = Instant::now();
    let mut state = state_with_items(&["AAPL"]);

    state.on_input_changed("   ", at(base, 0));
    assert!(!state.is_visible());
    assert!(state.items().is_empty());
}

// =========================================================================
// Response handling and out-of-order completion
// =========================================================================

#[test]
fn test_response_replaces_items_capped_at_ten() {
    let base = Instant::now();
    let mut state = SuggestState::new(DEBOUNCE_MS);

    state.on_input_changed("A", at(base, 0));
    let (_, id) = state.take_due_fetch("A", at(base, DEBOUNCE_MS)).unwrap();

    let many: Vec<SuggestionItem> = (0..25).map(|i| item(&format!("SYM{}", i))).collect();
    assert!(state.apply_response(id, Ok(many)));

    assert_eq!(state.items().len(), 10);
    assert!(state.is_visible());
    assert_eq!(state.active(), None);
}

#[test]
fn test_out_of_order_completion_keeps_newest_query() {
    let base = Instant::now();
    let mut state = SuggestState::new(DEBOUNCE_MS);

    // Fetch for "AB" issued
    state.on_input_changed("AB", at(base, 0));
    let (_, id_ab) = state.take_due_fetch("AB", at(base, DEBOUNCE_MS)).unwrap();

    // Fetch for "ABC" issued before "AB" resolves
    state.on_input_changed("ABC", at(base, 300));
    let (_, id_abc) = state
        .take_due_fetch("ABC", at(base, 300 + DEBOUNCE_MS))
        .unwrap();

    // "ABC" resolves first, then the stale "AB" arrives late
    assert!(state.apply_response(id_abc, Ok(vec![item("ABC")])));
    assert!(!state.apply_response(id_ab, Ok(vec![item("AB")])));

    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].symbol, "ABC");
}

#[test]
fn test_late_response_after_clear_is_dropped() {
    let base = Instant::now();
    let mut state = SuggestState::new(DEBOUNCE_MS);

    state.on_input_changed("AB", at(base, 0));
    let (_, id) = state.take_due_fetch("AB", at(base, DEBOUNCE_MS)).unwrap();

    // Input cleared while the fetch is in flight
    state.on_input_changed("", at(base, 300));

    assert!(!state.apply_response(id, Ok(vec![item("AB")])));
    assert!(!state.is_visible());
    assert!(state.items().is_empty());
}

#[test]
fn test_failed_fetch_degrades_to_cleared_panel() {
    let base = Instant::now();
    let mut state = state_with_items(&["OLD"]);

    state.on_input_changed("XYZ", at(base, 0));
    let (_, id) = state.take_due_fetch("XYZ", at(base, DEBOUNCE_MS)).unwrap();

    assert!(state.apply_response(id, Err(TiqError::Network("timeout".to_string()))));
    assert!(!state.is_visible());
    assert!(state.items().is_empty());
}

#[test]
fn test_empty_result_hides_panel() {
    let base = Instant::now();
    let mut state = state_with_items(&["OLD"]);

    state.on_input_changed("ZZZZZZ", at(base, 0));
    let (_, id) = state
        .take_due_fetch("ZZZZZZ", at(base, DEBOUNCE_MS))
        .unwrap();

    state.apply_response(id, Ok(Vec::new()));
    assert!(!state.is_visible());
}

// =========================================================================
// Navigation
// =========================================================================

#[test]
fn test_select_next_from_none_lands_on_first() {
    let mut state = state_with_items(&["A", "B", "C"]);
    state.select_next();
    assert_eq!(state.active(), Some(0));
}

#[test]
fn test_select_next_clamps_at_last() {
    let mut state = state_with_items(&["A", "B"]);
    for _ in 0..5 {
        state.select_next();
    }
    assert_eq!(state.active(), Some(1));
}

#[test]
fn test_select_previous_clamps_at_zero() {
    let mut state = state_with_items(&["A", "B"]);
    state.select_previous();
    assert_eq!(state.active(), Some(0));
    state.select_previous();
    assert_eq!(state.active(), Some(0));
}

#[test]
fn test_navigation_on_empty_panel_is_noop() {
    let mut state = SuggestState::new(DEBOUNCE_MS);
    state.select_next();
    state.select_previous();
    assert_eq!(state.active(), None);
}

#[test]
fn test_new_items_reset_highlight() {
    let base = Instant::now();
    let mut state = state_with_items(&["A", "B", "C"]);
    state.select_next();
    state.select_next();
    assert_eq!(state.active(), Some(2));

    state.on_input_changed("NEXT", at(base, 0));
    let (_, id) = state.take_due_fetch("NEXT", at(base, DEBOUNCE_MS)).unwrap();
    state.apply_response(id, Ok(vec![item("X")]));

    assert_eq!(state.active(), None);
}

// *For any* item count and number of Down presses, N presses from no
// active highlight land on min(N-1, len-1).
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_select_next_lands_on_min(len in 1usize..=10, presses in 1usize..=20) {
        let symbols: Vec<String> = (0..len).map(|i| format!("S{}", i)).collect();
        let refs: Vec<&str> = symbols.iter().map(|s| s.as_str()).collect();
        let mut state = state_with_items(&refs);

        for _ in 0..presses {
            state.select_next();
        }

        prop_assert_eq!(state.active(), Some((presses - 1).min(len - 1)));
    }

    #[test]
    fn prop_active_is_none_or_in_bounds(
        len in 0usize..=10,
        downs in 0usize..=15,
        ups in 0usize..=15,
    ) {
        let symbols: Vec<String> = (0..len).map(|i| format!("S{}", i)).collect();
        let refs: Vec<&str> = symbols.iter().map(|s| s.as_str()).collect();
        let mut state = if len == 0 {
            SuggestState::new(DEBOUNCE_MS)
        } else {
            state_with_items(&refs)
        };

        for _ in 0..downs {
            state.select_next();
        }
        for _ in 0..ups {
            state.select_previous();
        }

        match state.active() {
            None => prop_assert!(true),
            Some(i) => prop_assert!(i < state.items().len()),
        }
    }
}

// =========================================================================
// Dismissal
// =========================================================================

#[test]
fn test_dismiss_clears_everything_but_last_query() {
    let mut state = state_with_items(&["A", "B"]);
    state.select_next();

    state.dismiss();

    assert!(!state.is_visible());
    assert!(state.items().is_empty());
    assert_eq!(state.active(), None);
    assert_eq!(state.last_query(), "query");
}

#[test]
fn test_deferred_dismiss_fires_after_grace() {
    let base = Instant::now();
    let mut state = state_with_items(&["A"]);

    state.schedule_dismiss(base);
    assert!(!state.take_due_dismiss(at(base, 100)));
    assert!(state.is_visible());

    assert!(state.take_due_dismiss(at(base, 130)));
    assert!(!state.is_visible());
}

#[test]
fn test_commit_click_beats_deferred_dismiss() {
    // A row click is handled synchronously and clears the scheduled
    // dismiss along with the rest of the suggestion state
    let base = Instant::now();
    let mut state = state_with_items(&["A"]);

    state.schedule_dismiss(base);
    state.clear(); // what a commit does to suggestion state

    assert!(!state.has_pending_dismiss());
    assert!(!state.take_due_dismiss(at(base, 500)));
}
