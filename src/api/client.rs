//! Async Yahoo Finance client
//!
//! Wraps the public search endpoint (`/v1/finance/search`) used by the
//! suggestion popup and the chart endpoint (`/v8/finance/chart`) used for
//! daily OHLC data. Payload parsing is split into free functions so it can
//! be tested without a network.

use serde::Deserialize;

use super::types::{DailyQuote, SuggestionItem};
use crate::error::TiqError;

/// Default API host; overridable via `[api] base_url` in the config file.
pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Request timeout, matching the upstream-facing timeout of the original
/// suggestion service.
const REQUEST_TIMEOUT_SECS: u64 = 8;

/// Quote types surfaced in suggestions; everything else (futures, options,
/// crypto pairs) is filtered out.
const ALLOWED_QUOTE_TYPES: &[&str] = &["EQUITY", "ETF", "MUTUALFUND", "INDEX", "CURRENCY"];

/// Exchanges in resolution-preference order. Lower index wins when a bare
/// query matches listings on several exchanges.
const EXCHANGE_PRIORITY: &[&str] = &[
    "NSE", "BSE", // India
    "NYQ", "NMS", "ASE", "PCX", "BATS", // US
    "LSE", // UK
    "TOR", "VAN", // Canada
    "ASX", // Australia
    "JPX", "TSE", "OSE", // Japan
    "HKG", // Hong Kong
    "SES", // Singapore
    "KSC", "KOSDAQ", // Korea
    "SHH", "SHZ", // China
    "EPA", "ETR", "FRA", "BIT", "AMS", "BRU", "VIE", "STO", "HEL", "COP", "ICE",
    "MCE", // Europe
    "SAO", // Brazil
    "JNB", // South Africa
    "MEX", // Mexico
    "DFM", "ADX", // UAE
];

/// Rank of an exchange in the priority table; unknown exchanges sort after
/// every known one.
fn exchange_rank(exchange: &str) -> usize {
    EXCHANGE_PRIORITY
        .iter()
        .position(|e| *e == exchange)
        .unwrap_or(EXCHANGE_PRIORITY.len())
}

// ---------------------------------------------------------------------------
// Wire formats
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    symbol: Option<String>,
    shortname: Option<String>,
    longname: Option<String>,
    #[serde(rename = "longName")]
    long_name: Option<String>,
    exchange: Option<String>,
    #[serde(rename = "exchDisp")]
    exch_disp: Option<String>,
    #[serde(rename = "quoteType")]
    quote_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    #[allow(dead_code)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuoteArrays>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuoteArrays {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// A complete OHLC bar extracted from a chart payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhlcBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

// ---------------------------------------------------------------------------
// Payload parsing (network-free, unit tested)
// ---------------------------------------------------------------------------

/// Parse a search payload into suggestion items, preserving server order.
///
/// Quotes without a symbol or with a filtered-out quote type are skipped.
/// Shortname falls back to longname; exchange falls back to exchDisp.
pub fn parse_search_payload(body: &str) -> Result<Vec<SuggestionItem>, TiqError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;

    let items = envelope
        .quotes
        .into_iter()
        .filter_map(|q| {
            let quote_type = q.quote_type.as_deref().unwrap_or("");
            if !ALLOWED_QUOTE_TYPES.contains(&quote_type) {
                return None;
            }
            let symbol = q.symbol.filter(|s| !s.is_empty())?;
            let shortname = q
                .shortname
                .or(q.longname)
                .or(q.long_name)
                .unwrap_or_default();
            let exchange = q.exchange.or(q.exch_disp).unwrap_or_default();
            Some(SuggestionItem {
                symbol,
                shortname,
                exchange,
            })
        })
        .collect();

    Ok(items)
}

/// Parse a chart payload into the last complete OHLC bar, if any.
///
/// Bars with missing values (nulls from the upstream) are skipped; `None`
/// means the window contained no usable bar, which is not an error here.
pub fn parse_chart_payload(body: &str) -> Result<Option<OhlcBar>, TiqError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    let Some(results) = envelope.chart.result else {
        return Ok(None);
    };
    let Some(result) = results.first() else {
        return Ok(None);
    };
    let Some(arrays) = result.indicators.quote.first() else {
        return Ok(None);
    };

    let len = arrays
        .open
        .len()
        .min(arrays.high.len())
        .min(arrays.low.len())
        .min(arrays.close.len());

    // Walk backwards to the most recent bar where all four values exist
    for i in (0..len).rev() {
        if let (Some(open), Some(high), Some(low), Some(close)) = (
            arrays.open[i],
            arrays.high[i],
            arrays.low[i],
            arrays.close[i],
        ) {
            return Ok(Some(OhlcBar {
                open,
                high,
                low,
                close,
            }));
        }
    }

    Ok(None)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pick the best symbol from search results by exchange priority.
///
/// Falls back to the first result when no exchange is recognized.
pub fn best_symbol_by_exchange(results: &[SuggestionItem]) -> Option<String> {
    let best = results
        .iter()
        .filter(|it| !it.symbol.is_empty())
        .min_by_key(|it| exchange_rank(&it.exchange))?;
    Some(best.symbol.to_uppercase())
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Async Yahoo Finance client used by the API worker.
#[derive(Debug, Clone)]
pub struct YahooClient {
    http: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TiqError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("tiq/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TiqError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Symbol search for the suggestion popup.
    pub async fn search(&self, query: &str, count: u32) -> Result<Vec<SuggestionItem>, TiqError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let count_str = count.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("quotesCount", count_str.as_str()),
                ("newsCount", "0"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        parse_search_payload(&body)
    }

    /// Fetch the most recent complete daily bar within the given range.
    async fn last_bar(&self, symbol: &str, range: &str) -> Result<Option<OhlcBar>, TiqError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let response = self
            .http
            .get(&url)
            .query(&[("range", range), ("interval", "1d")])
            .send()
            .await?;

        // The chart endpoint answers 404 for unknown symbols; treat that as
        // "no bar" so symbol resolution can keep probing
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.error_for_status()?.text().await?;
        parse_chart_payload(&body)
    }

    /// Daily OHLC for a known symbol, widening to a 2-day range when the
    /// 1-day window comes back empty.
    pub async fn daily_quote(&self, symbol: &str) -> Result<DailyQuote, TiqError> {
        let bar = match self.last_bar(symbol, "1d").await? {
            Some(bar) => bar,
            None => self
                .last_bar(symbol, "2d")
                .await?
                .ok_or_else(|| TiqError::NoData(symbol.to_string()))?,
        };

        Ok(DailyQuote {
            ticker: symbol.to_string(),
            open: round2(bar.open),
            high: round2(bar.high),
            low: round2(bar.low),
            close: round2(bar.close),
        })
    }

    /// Resolve free-form input (ticker or company name) to a symbol.
    ///
    /// Probes the input as a ticker first, then with `.NS`/`.BO` suffixes
    /// for bare queries, then falls back to a search ranked by exchange
    /// priority. Probe failures are swallowed; only "nothing matched" is
    /// reported, as `None`.
    pub async fn resolve_symbol(&self, query: &str) -> Result<Option<String>, TiqError> {
        let q = query.trim();
        if q.is_empty() {
            return Ok(None);
        }

        let upper = q.to_uppercase();
        if let Ok(Some(_)) = self.last_bar(&upper, "1d").await {
            return Ok(Some(upper));
        }

        if !q.contains('.') {
            for suffix in [".NS", ".BO"] {
                let candidate = format!("{}{}", upper, suffix);
                if let Ok(Some(_)) = self.last_bar(&candidate, "1d").await {
                    return Ok(Some(candidate));
                }
            }
        }

        let results = match self.search(q, 20).await {
            Ok(results) => results,
            Err(_) => return Ok(None),
        };
        Ok(best_symbol_by_exchange(&results))
    }

    /// Full run action: resolve the input, then fetch its daily bar.
    pub async fn quote_for(&self, query: &str) -> Result<DailyQuote, TiqError> {
        let symbol = self
            .resolve_symbol(query)
            .await?
            .ok_or_else(|| TiqError::SymbolNotFound(query.trim().to_string()))?;
        self.daily_quote(&symbol).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
