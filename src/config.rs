//! Engine configuration.
//!
//! A plain, `serde`-serializable struct rather than a builder with dozens of
//! setters — the engine has few enough knobs that a struct literal (or a
//! deserialized TOML/JSON document) is the clearer idiom.

use serde::{Deserialize, Serialize};

/// Number of ticks spanning `$0.00` to `$10,000.00` at a `$0.01` tick size,
/// i.e. the reference workload's `N_levels`.
pub const REFERENCE_N_LEVELS: u32 = 1_000_001;

/// Number of instruments in the reference workload's symbol table.
pub const REFERENCE_N_SYMBOLS: u16 = 50;

/// Static configuration for a [`crate::engine::MatchingEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of configured instruments; books are indexed `[0, n_symbols)`.
    pub n_symbols: SymbolCount,
    /// Number of price ticks per book; valid LIMIT prices are `[1, n_levels)`.
    pub n_levels: u32,
    /// Upper bound on `order_id`; `submit`/`cancel` reject ids `>= order_capacity`.
    pub order_capacity: u64,
    /// Maximum number of orders resting in a single book's node pool at once.
    pub node_capacity: u32,
    /// Usable capacity of each SPSC ring in the pipeline (actual slot count
    /// is `ring_capacity + 1`, per the ring's "one wasted slot" discipline).
    pub ring_capacity: usize,
}

/// Newtype purely so `EngineConfig::n_symbols` can't be accidentally passed
/// where a raw `SymbolId` is expected.
pub type SymbolCount = u16;

impl Default for EngineConfig {
    /// Mirrors the reference workload: 50 symbols, $0.01 ticks up to
    /// $10,000, and pool/ring sizes generous enough for the crate's own
    /// tests and benches without pre-touching gigabytes of memory.
    fn default() -> Self {
        Self {
            n_symbols: REFERENCE_N_SYMBOLS,
            n_levels: REFERENCE_N_LEVELS,
            order_capacity: 1_000_000,
            node_capacity: 1_000_000,
            ring_capacity: 4_096,
        }
    }
}

impl EngineConfig {
    /// A small configuration convenient for unit tests: few symbols, a
    /// price range wide enough for this crate's own boundary-scenario
    /// tests (prices up to `15_010`), and a small order/node capacity.
    pub fn for_tests() -> Self {
        Self {
            n_symbols: 4,
            n_levels: 20_000,
            order_capacity: 10_000,
            node_capacity: 10_000,
            ring_capacity: 64,
        }
    }

    /// Parses a configuration from a JSON document, e.g. one loaded from
    /// disk at startup.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serializes this configuration to a JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_preserves_every_field() {
        let config = EngineConfig::for_tests();
        let json = config.to_json().unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed.n_symbols, config.n_symbols);
        assert_eq!(parsed.n_levels, config.n_levels);
        assert_eq!(parsed.order_capacity, config.order_capacity);
        assert_eq!(parsed.node_capacity, config.node_capacity);
        assert_eq!(parsed.ring_capacity, config.ring_capacity);
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(EngineConfig::from_json("not json").is_err());
    }
}
