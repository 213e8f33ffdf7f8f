//! Error types.
//!
//! Two regimes: request-level errors never surface here — they are reported
//! as [`crate::types::RejectReason`] carried inside a
//! [`crate::types::MarketDataEvent::Rejected`]. This module only carries
//! precondition violations, which are fatal to the matcher.

use crate::types::{OrderId, SymbolId};
use thiserror::Error;

/// A precondition violation: a programmer error, not a normal protocol
/// outcome. The matcher thread does not attempt to recover from these —
/// `run()` returns and the pipeline does not restart itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineFault {
    #[error("order id {order_id} exceeds configured capacity {capacity}")]
    OrderIdOutOfRange { order_id: OrderId, capacity: u64 },

    #[error("symbol id {symbol_id} is not configured")]
    UnknownSymbol { symbol_id: SymbolId },

    #[error("node pool exhausted for symbol {symbol_id}")]
    PoolExhausted { symbol_id: SymbolId },
}
