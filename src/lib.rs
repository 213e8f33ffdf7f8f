//! A low-latency price-time-priority limit order book matching engine with
//! a lock-free SPSC pipeline.
//!
//! The matching core (`book`, `engine`) is fully synchronous and owned by a
//! single thread; `ring` and `pipeline` provide the lock-free hand-off and
//! the three-stage pinned-thread runtime that drives it in production.
//! `sink` decouples event emission from delivery; `harness` is internal
//! test/bench infrastructure, not public product surface.

pub mod book;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod harness;
pub mod pipeline;
pub mod pool;
pub mod ring;
pub mod sink;
pub mod symbol;
pub mod types;

pub use clock::{Clock, MonotonicClock};
pub use config::EngineConfig;
pub use engine::MatchingEngine;
pub use error::EngineFault;
pub use ring::{RingEmpty, RingFull, SpscRing};
pub use sink::{DiscardSink, RingSink, Sink, VecSink};
pub use types::{
    CancelRequest, MarketDataEvent, Order, OrderId, OrderRequest, OrderType, Qty, RejectReason,
    Side, SymbolId, Tick,
};
