//! Ticker ↔ [`SymbolId`] lookup table.
//!
//! The engine core never sees a ticker string, only a dense `SymbolId`;
//! this table exists purely for the gateway/demo harness boundary and the
//! reference 50-symbol workload, not for the matching core itself.

use crate::types::SymbolId;

/// The reference workload's 50 tickers, in `SymbolId` order.
pub const REFERENCE_TICKERS: [&str; 50] = [
    "AAPL", "MSFT", "AMZN", "GOOGL", "GOOG", "META", "NVDA", "TSLA", "BRK.B", "UNH", "JNJ", "V",
    "XOM", "WMT", "JPM", "PG", "MA", "HD", "CVX", "LLY", "ABBV", "PFE", "BAC", "KO", "PEP", "AVGO",
    "COST", "MRK", "TMO", "DIS", "CSCO", "ABT", "ACN", "DHR", "VZ", "ADBE", "NKE", "WFC", "TXN",
    "CRM", "NEE", "CMCSA", "BMY", "PM", "RTX", "UPS", "ORCL", "QCOM", "HON", "LOW",
];

/// Looks up a ticker's dense id. `O(n)` over 50 entries — fine for a
/// boot-time/demo-harness lookup, not called from the matching hot path.
pub fn ticker_to_symbol(ticker: &str) -> Option<SymbolId> {
    REFERENCE_TICKERS
        .iter()
        .position(|&t| t == ticker)
        .map(|index| index as SymbolId)
}

/// The reverse lookup: a configured id's ticker, if within the reference table.
pub fn symbol_to_ticker(symbol_id: SymbolId) -> Option<&'static str> {
    REFERENCE_TICKERS.get(symbol_id as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_both_directions() {
        assert_eq!(ticker_to_symbol("AAPL"), Some(0));
        assert_eq!(symbol_to_ticker(0), Some("AAPL"));
        assert_eq!(ticker_to_symbol("NOPE"), None);
        assert_eq!(symbol_to_ticker(50), None);
    }

    #[test]
    fn table_has_reference_symbol_count() {
        assert_eq!(REFERENCE_TICKERS.len(), crate::config::REFERENCE_N_SYMBOLS as usize);
    }
}
