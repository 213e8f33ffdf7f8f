//! The matching engine: request validation, symbol routing, and the
//! drain loop that feeds the per-symbol books.
//!
//! The symbol space is fixed at construction time (`EngineConfig::n_symbols`),
//! so routing is a direct index into a `Vec<OrderBook>` rather than a
//! hashed lookup by ticker.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, trace_span, warn};

use crate::book::OrderBook;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::EngineFault;
use crate::ring::{RingEmpty, SpscRing};
use crate::sink::Sink;
use crate::types::{CancelRequest, MarketDataEvent, Order, OrderRequest, OrderType, RejectReason, SymbolId};

/// Owns every configured symbol's book and the order→symbol routing index.
pub struct MatchingEngine {
    books: Vec<OrderBook>,
    /// `order_id -> symbol_id`, sized to `config.order_capacity`. Entries
    /// are never evicted — ids persist forever so a re-cancel of a
    /// long-filled id still resolves to the right book and gets
    /// `ORDER_NOT_FOUND` from the book's own index rather than silently
    /// doing nothing.
    order_to_symbol: Vec<Option<SymbolId>>,
    order_capacity: u64,
}

impl MatchingEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let books = (0..config.n_symbols)
            .map(|_| OrderBook::new(config.n_levels, config.order_capacity, config.node_capacity))
            .collect();
        Self {
            books,
            order_to_symbol: vec![None; config.order_capacity as usize],
            order_capacity: config.order_capacity,
        }
    }

    /// Validates and routes `order`. Validation failures are reported as
    /// `REJECTED` events, never as `Err`; only precondition violations
    /// (unknown id/symbol range) return `Err`. Quantity and price are
    /// checked before the symbol is even looked up, so an out-of-range
    /// symbol on an otherwise-invalid order still surfaces as an ordinary
    /// rejection rather than a fatal fault.
    pub fn submit<C: Clock, S: Sink>(
        &mut self,
        order: Order,
        clock: &C,
        sink: &mut S,
    ) -> Result<(), EngineFault> {
        let span = trace_span!("submit", order_id = order.order_id, symbol_id = order.symbol_id);
        let _enter = span.enter();

        if order.order_id >= self.order_capacity {
            error!(order_id = order.order_id, "order id exceeds configured capacity");
            return Err(EngineFault::OrderIdOutOfRange {
                order_id: order.order_id,
                capacity: self.order_capacity,
            });
        }

        if order.quantity == 0 {
            warn!(order_id = order.order_id, "rejected: invalid quantity");
            sink.on_event(MarketDataEvent::Rejected {
                order_id: order.order_id,
                request_id: order.order_id,
                timestamp: clock.now(),
                reason: RejectReason::InvalidQuantity,
            });
            return Ok(());
        }
        if order.order_type == OrderType::Limit && order.price == 0 {
            warn!(order_id = order.order_id, "rejected: invalid price");
            sink.on_event(MarketDataEvent::Rejected {
                order_id: order.order_id,
                request_id: order.order_id,
                timestamp: clock.now(),
                reason: RejectReason::InvalidPrice,
            });
            return Ok(());
        }

        let Some(book) = self.books.get_mut(order.symbol_id as usize) else {
            error!(symbol_id = order.symbol_id, "unknown symbol id");
            return Err(EngineFault::UnknownSymbol {
                symbol_id: order.symbol_id,
            });
        };

        self.order_to_symbol[order.order_id as usize] = Some(order.symbol_id);
        book.match_order(order, clock, sink)
    }

    /// Routes a cancel by the id's recorded symbol. If the id was never
    /// submitted, returns `Ok(())` without emitting anything — a distinct
    /// outcome from a resident-but-already-removed id, which the book
    /// itself reports as `REJECTED{ORDER_NOT_FOUND}`.
    pub fn cancel<C: Clock, S: Sink>(
        &mut self,
        request: CancelRequest,
        clock: &C,
        sink: &mut S,
    ) -> Result<(), EngineFault> {
        let span = trace_span!("cancel", order_id = request.target_order_id);
        let _enter = span.enter();

        if request.target_order_id >= self.order_capacity {
            error!(
                order_id = request.target_order_id,
                "cancel target id exceeds configured capacity"
            );
            return Err(EngineFault::OrderIdOutOfRange {
                order_id: request.target_order_id,
                capacity: self.order_capacity,
            });
        }

        let Some(symbol_id) = self.order_to_symbol[request.target_order_id as usize] else {
            return Ok(());
        };
        let book = self
            .books
            .get_mut(symbol_id as usize)
            .ok_or(EngineFault::UnknownSymbol { symbol_id })?;
        book.cancel_order(request.target_order_id, request.request_id, clock, sink)
    }

    /// Drains `ring` until `running` clears, dispatching each request to
    /// [`Self::submit`] or [`Self::cancel`], then performs one final drain
    /// pass so no request committed before the flag flipped is lost.
    pub fn run<C: Clock, S: Sink>(
        &mut self,
        ring: &SpscRing<OrderRequest>,
        running: &AtomicBool,
        clock: &C,
        sink: &mut S,
    ) -> Result<(), EngineFault> {
        while running.load(Ordering::Acquire) {
            self.drain_once(ring, clock, sink)?;
        }
        while !ring.is_empty() {
            self.drain_once(ring, clock, sink)?;
        }
        Ok(())
    }

    fn drain_once<C: Clock, S: Sink>(
        &mut self,
        ring: &SpscRing<OrderRequest>,
        clock: &C,
        sink: &mut S,
    ) -> Result<(), EngineFault> {
        match ring.try_pop() {
            Ok(OrderRequest::Order(order)) => self.submit(order, clock, sink),
            Ok(OrderRequest::Cancel(request)) => self.cancel(request, clock, sink),
            Err(RingEmpty) => {
                std::hint::spin_loop();
                Ok(())
            }
        }
    }
}
