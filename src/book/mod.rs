//! Per-symbol order book: dense price-level arrays, a pooled intrusive FIFO
//! per level, and the price-time-priority matching algorithm.
//!
//! The book lives inside one [`crate::engine::MatchingEngine`] and is
//! touched only by the matcher thread, so its id→node index is a plain
//! `Vec`, not a concurrent map.

mod price_level;

pub use price_level::PriceLevel;

use crate::clock::Clock;
use crate::error::EngineFault;
use crate::pool::{NodeHandle, Pool};
use crate::sink::Sink;
use crate::types::{MarketDataEvent, Order, OrderId, OrderType, Qty, Side, Tick};
use tracing::trace;

/// A resting order, copied into the pool from the caller's [`Order`] at
/// insertion time. Only the fields the book needs while an order rests are
/// kept; `order_type`/`symbol_id` are irrelevant once an order is resting,
/// since only `Limit` orders ever rest.
#[derive(Debug, Clone, Copy)]
struct OrderNode {
    order_id: OrderId,
    side: Side,
    price: Tick,
    quantity: Qty,
    filled: Qty,
    prev: Option<NodeHandle>,
    next: Option<NodeHandle>,
}

impl OrderNode {
    #[inline]
    fn remaining(&self) -> Qty {
        self.quantity - self.filled
    }
}

/// Per-symbol order book.
pub struct OrderBook {
    n_levels: u32,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
    /// `order_id -> node` lookup, sized to the engine's order-id capacity
    /// (not just this book's own resting-order count), so a cancel can
    /// index straight in without a bounds check against resting-order
    /// count.
    index: Vec<Option<NodeHandle>>,
    max_bid: Tick,
    min_ask: Tick,
    next_trade_id: u64,
    pool: Pool<OrderNode>,
}

impl OrderBook {
    /// Creates an empty book.
    ///
    /// `order_capacity` sizes the id→node index; `node_capacity` bounds how
    /// many orders may rest in this book's pool simultaneously.
    pub fn new(n_levels: u32, order_capacity: u64, node_capacity: u32) -> Self {
        Self {
            n_levels,
            bids: vec![PriceLevel::default(); n_levels as usize],
            asks: vec![PriceLevel::default(); n_levels as usize],
            index: vec![None; order_capacity as usize],
            max_bid: 0,
            min_ask: n_levels,
            next_trade_id: 1,
            pool: Pool::new(node_capacity),
        }
    }

    /// Tightens watermarks lazily and returns `(best_bid, best_ask)`.
    /// Sentinel when empty on a side: `0` for bids, `n_levels` for asks.
    pub fn top_of_book(&mut self) -> (Tick, Tick) {
        while self.max_bid > 0 && self.bids[self.max_bid as usize].is_empty() {
            self.max_bid -= 1;
        }
        while self.min_ask < self.n_levels && self.asks[self.min_ask as usize].is_empty() {
            self.min_ask += 1;
        }
        (self.max_bid, self.min_ask)
    }

    /// Total remaining quantity resting at `tick` on `side`. A read-only
    /// convenience query used for depth snapshots; never called from the
    /// matching hot path.
    pub fn depth_at(&self, side: Side, tick: Tick) -> Qty {
        let level = match side {
            Side::Buy => &self.bids[tick as usize],
            Side::Sell => &self.asks[tick as usize],
        };
        let mut total = 0u32;
        let mut cursor = level.head;
        while let Some(handle) = cursor {
            let node = self.pool.get(handle);
            total += node.remaining();
            cursor = node.next;
        }
        total
    }

    /// Drives `order` against the opposite side and, if LIMIT with
    /// remaining quantity, rests it. Emits every resulting event via `sink`.
    /// Returns `Err` only if resting the order would require a node pool
    /// slot and the pool is exhausted.
    pub fn match_order<C: Clock, S: Sink>(
        &mut self,
        mut order: Order,
        clock: &C,
        sink: &mut S,
    ) -> Result<(), EngineFault> {
        if order.order_type == OrderType::Fok {
            let price_limit = if order.price > 0 {
                Some(order.price)
            } else {
                None
            };
            let available = match order.side {
                Side::Buy => self.available_liquidity(Side::Sell, order.remaining(), price_limit),
                Side::Sell => self.available_liquidity(Side::Buy, order.remaining(), price_limit),
            };
            if available < order.remaining() {
                sink.on_event(MarketDataEvent::Cancelled {
                    order_id: order.order_id,
                    request_id: order.order_id,
                    timestamp: clock.now(),
                });
                return Ok(());
            }
        }

        match order.side {
            Side::Buy => self.walk(Side::Sell, &mut order, clock, sink),
            Side::Sell => self.walk(Side::Buy, &mut order, clock, sink),
        }

        if order.remaining() > 0 {
            if order.order_type.can_rest() {
                let handle = self
                    .pool
                    .allocate(OrderNode {
                        order_id: order.order_id,
                        side: order.side,
                        price: order.price,
                        quantity: order.quantity,
                        filled: order.filled,
                        prev: None,
                        next: None,
                    })
                    .ok_or(EngineFault::PoolExhausted {
                        symbol_id: order.symbol_id,
                    })?;
                self.index[order.order_id as usize] = Some(handle);
                let level = match order.side {
                    Side::Buy => &mut self.bids[order.price as usize],
                    Side::Sell => &mut self.asks[order.price as usize],
                };
                Self::link_tail(level, &mut self.pool, handle);
                match order.side {
                    Side::Buy => self.max_bid = self.max_bid.max(order.price),
                    Side::Sell => self.min_ask = self.min_ask.min(order.price),
                }
                sink.on_event(MarketDataEvent::Acked {
                    order_id: order.order_id,
                    request_id: order.order_id,
                    timestamp: clock.now(),
                    price: order.price,
                    quantity: order.remaining(),
                });
            } else {
                // MARKET/IOC/FOK residual: FOK never reaches here since it
                // either fills in full above or returns early.
                sink.on_event(MarketDataEvent::Cancelled {
                    order_id: order.order_id,
                    request_id: order.order_id,
                    timestamp: clock.now(),
                });
            }
        }
        Ok(())
    }

    /// Cancels a resting order. Emits `CANCELLED`, or `REJECTED{ORDER_NOT_FOUND}`
    /// if `order_id` is not resident. Always succeeds once `order_id` is
    /// known to route to this book; the `Result` return exists for
    /// signature symmetry with [`Self::match_order`].
    pub fn cancel_order<C: Clock, S: Sink>(
        &mut self,
        order_id: OrderId,
        request_id: u64,
        clock: &C,
        sink: &mut S,
    ) -> Result<(), EngineFault> {
        let Some(handle) = self.index[order_id as usize].take() else {
            sink.on_event(MarketDataEvent::Rejected {
                order_id,
                request_id,
                timestamp: clock.now(),
                reason: crate::types::RejectReason::OrderNotFound,
            });
            return Ok(());
        };

        let node = *self.pool.get(handle);
        let level = match node.side {
            Side::Buy => &mut self.bids[node.price as usize],
            Side::Sell => &mut self.asks[node.price as usize],
        };
        Self::unlink(level, &mut self.pool, handle);
        self.pool.deallocate(handle);

        sink.on_event(MarketDataEvent::Cancelled {
            order_id,
            request_id,
            timestamp: clock.now(),
        });
        Ok(())
    }

    /// Walks `opposite` from its near touch outward, filling `aggressor`
    /// against resting orders in price-time priority, emitting one `FILLED`
    /// per resting order consumed.
    fn walk<C: Clock, S: Sink>(
        &mut self,
        opposite: Side,
        aggressor: &mut Order,
        clock: &C,
        sink: &mut S,
    ) {
        let price_limit = if aggressor.price > 0 {
            Some(aggressor.price)
        } else {
            None
        };

        match opposite {
            Side::Sell => {
                let mut tick = self.min_ask;
                while tick < self.n_levels && aggressor.remaining() > 0 {
                    if let Some(limit) = price_limit {
                        if tick > limit {
                            break;
                        }
                    }
                    self.drain_level(Side::Sell, tick, aggressor, clock, sink);
                    if self.asks[tick as usize].is_empty() {
                        tick += 1;
                        self.min_ask = tick;
                    } else {
                        break;
                    }
                }
            }
            Side::Buy => {
                let mut tick = self.max_bid;
                loop {
                    if aggressor.remaining() == 0 {
                        break;
                    }
                    if let Some(limit) = price_limit {
                        if tick < limit {
                            break;
                        }
                    }
                    self.drain_level(Side::Buy, tick, aggressor, clock, sink);
                    if self.bids[tick as usize].is_empty() {
                        if tick == 0 {
                            break;
                        }
                        tick -= 1;
                        self.max_bid = tick;
                    } else {
                        break;
                    }
                }
            }
        }
    }

    /// Fills `aggressor` against the FIFO resting at `tick` on `side`,
    /// head-to-tail, until either the level drains or the aggressor is
    /// fully filled.
    fn drain_level<C: Clock, S: Sink>(
        &mut self,
        side: Side,
        tick: Tick,
        aggressor: &mut Order,
        clock: &C,
        sink: &mut S,
    ) {
        loop {
            if aggressor.remaining() == 0 {
                return;
            }
            let level = match side {
                Side::Buy => &self.bids[tick as usize],
                Side::Sell => &self.asks[tick as usize],
            };
            let Some(resting_handle) = level.head else {
                return;
            };

            let resting = self.pool.get(resting_handle);
            let fill_qty = aggressor.remaining().min(resting.remaining());
            let resting_order_id = resting.order_id;

            aggressor.filled += fill_qty;
            self.pool.get_mut(resting_handle).filled += fill_qty;

            let trade_id = self.next_trade_id;
            self.next_trade_id += 1;

            trace!(
                trade_id,
                aggressor = aggressor.order_id,
                resting = resting_order_id,
                price = aggressor.price,
                qty = fill_qty,
                "order filled"
            );

            sink.on_event(MarketDataEvent::Filled {
                order_id: aggressor.order_id,
                request_id: aggressor.order_id,
                timestamp: clock.now(),
                trade_id,
                resting_order_id,
                price: aggressor.price,
                quantity: fill_qty,
            });

            if self.pool.get(resting_handle).remaining() == 0 {
                let level = match side {
                    Side::Buy => &mut self.bids[tick as usize],
                    Side::Sell => &mut self.asks[tick as usize],
                };
                Self::unlink(level, &mut self.pool, resting_handle);
                self.pool.deallocate(resting_handle);
                self.index[resting_order_id as usize] = None;
            }
        }
    }

    /// Sums remaining quantity on `side` from its near touch outward, under
    /// the same price guard `walk` applies, stopping as soon as `target` is
    /// reached (FOK only needs to know "enough or not").
    fn available_liquidity(&self, side: Side, target: Qty, price_limit: Option<Tick>) -> Qty {
        let mut sum: Qty = 0;
        match side {
            Side::Sell => {
                let mut tick = self.min_ask;
                while tick < self.n_levels && sum < target {
                    if let Some(limit) = price_limit {
                        if tick > limit {
                            break;
                        }
                    }
                    sum = sum.saturating_add(self.depth_at(Side::Sell, tick));
                    tick += 1;
                }
            }
            Side::Buy => {
                let mut tick = self.max_bid;
                loop {
                    if sum >= target {
                        break;
                    }
                    if let Some(limit) = price_limit {
                        if tick < limit {
                            break;
                        }
                    }
                    sum = sum.saturating_add(self.depth_at(Side::Buy, tick));
                    if tick == 0 {
                        break;
                    }
                    tick -= 1;
                }
            }
        }
        sum
    }

    fn link_tail(level: &mut PriceLevel, pool: &mut Pool<OrderNode>, handle: NodeHandle) {
        match level.tail {
            None => {
                level.head = Some(handle);
                level.tail = Some(handle);
            }
            Some(tail) => {
                pool.get_mut(tail).next = Some(handle);
                pool.get_mut(handle).prev = Some(tail);
                level.tail = Some(handle);
            }
        }
    }

    fn unlink(level: &mut PriceLevel, pool: &mut Pool<OrderNode>, handle: NodeHandle) {
        let (prev, next) = {
            let node = pool.get(handle);
            (node.prev, node.next)
        };
        match prev {
            Some(p) => pool.get_mut(p).next = next,
            None => level.head = next,
        }
        match next {
            Some(n) => pool.get_mut(n).prev = prev,
            None => level.tail = prev,
        }
    }
}
