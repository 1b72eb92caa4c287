use crate::error::TiqError;

/// A single symbol-search result, in server-returned order.
///
/// `shortname` and `exchange` are optional upstream; absent fields render
/// as empty strings rather than being treated as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub symbol: String,
    pub shortname: String,
    pub exchange: String,
}

impl SuggestionItem {
    pub fn new(
        symbol: impl Into<String>,
        shortname: impl Into<String>,
        exchange: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            shortname: shortname.into(),
            exchange: exchange.into(),
        }
    }
}

/// Last daily OHLC bar for a resolved symbol, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyQuote {
    pub ticker: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Request sent from the main thread to the API worker.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Symbol search for the suggestion popup.
    Suggest { query: String, request_id: u64 },
    /// Resolve the input to a symbol and fetch its daily OHLC bar.
    Quote { query: String, request_id: u64 },
}

/// Response sent from the API worker back to the main thread.
///
/// Each response carries the id of the request that produced it so the
/// receiving state can discard completions that are no longer the latest
/// issued request (out-of-order tolerance).
#[derive(Debug)]
pub enum ApiResponse {
    Suggest {
        request_id: u64,
        result: Result<Vec<SuggestionItem>, TiqError>,
    },
    Quote {
        request_id: u64,
        result: Result<DailyQuote, TiqError>,
    },
}
