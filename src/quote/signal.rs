//! Directional signal derived from a daily OHLC bar
//!
//! Each of the four values is reduced mod 9, combined into two layers, and
//! multiplied into a single "bindu" value; readings of 5 or more are Up.

use std::fmt;

use crate::api::DailyQuote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Up,
    Down,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Up => write!(f, "▲ Up (1)"),
            Signal::Down => write!(f, "▼ Down (0)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalReading {
    pub bindu: f64,
    pub direction: Signal,
}

const UP_THRESHOLD: f64 = 5.0;

/// Derive the signal from a quote's (already rounded) OHLC values.
pub fn derive(quote: &DailyQuote) -> SignalReading {
    let o = quote.open % 9.0;
    let h = quote.high % 9.0;
    let l = quote.low % 9.0;
    let c = quote.close % 9.0;

    let layer1 = (o + c) % 9.0;
    let layer2 = (h - l + 9.0) % 9.0;
    let bindu = (layer1 * layer2) % 9.0;

    let direction = if bindu >= UP_THRESHOLD {
        Signal::Up
    } else {
        Signal::Down
    };

    SignalReading { bindu, direction }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod signal_tests;
