//! Wire-level data model: orders, requests and market-data events.
//!
//! These types are plain, `Copy`-friendly value types by design — the
//! matching engine copies an incoming [`Order`] into a pool slot rather than
//! sharing ownership with the caller (see [`crate::pool`]).

use serde::{Deserialize, Serialize};

/// Identifies a single order across its whole lifetime.
pub type OrderId = u64;

/// Dense identifier for a configured instrument, in `[0, n_symbols)`.
pub type SymbolId = u16;

/// Integer tick index into a book's price array, in `[0, n_levels)`.
///
/// `0` is reserved to mean "unbounded" for MARKET orders and for the
/// price-limit check on IOC/FOK orders.
pub type Tick = u32;

/// Order quantity, always `> 0` for a freshly submitted order.
pub type Qty = u32;

/// Which side of the book an order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an aggressor of this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// The four order types the matching core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Rests on the book if not fully filled on arrival.
    Limit,
    /// Matches whatever is available, ignoring price; never rests.
    Market,
    /// Immediate-or-cancel: matches whatever is available now, cancels the residual.
    Ioc,
    /// Fill-or-kill: matches the full quantity now, or does nothing at all.
    Fok,
}

impl OrderType {
    /// LIMIT is the only type that can rest on the book.
    pub fn can_rest(self) -> bool {
        matches!(self, OrderType::Limit)
    }
}

/// An incoming order submission.
///
/// `filled` is mutable state tracked while the order is live; a freshly
/// constructed `Order` always has `filled == 0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub symbol_id: SymbolId,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Qty,
    pub price: Tick,
    pub timestamp: u64,
    pub(crate) filled: Qty,
}

impl Order {
    /// Builds a fresh, unfilled order.
    pub fn new(
        order_id: OrderId,
        symbol_id: SymbolId,
        side: Side,
        order_type: OrderType,
        quantity: Qty,
        price: Tick,
        timestamp: u64,
    ) -> Self {
        Self {
            order_id,
            symbol_id,
            side,
            order_type,
            quantity,
            price,
            timestamp,
            filled: 0,
        }
    }

    /// Quantity not yet matched. Never exceeds `quantity`.
    #[inline]
    pub fn remaining(&self) -> Qty {
        self.quantity - self.filled
    }

    /// `true` once `remaining() == 0`.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining() == 0
    }
}

/// A cancellation request targeting a previously submitted order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CancelRequest {
    pub request_id: u64,
    pub target_order_id: OrderId,
    pub timestamp: u64,
}

/// Tagged union carried on the producer→matcher ring.
///
/// A sum type with two variants, not a `dyn`-dispatched request object — the
/// matcher's drain loop matches on it directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OrderRequest {
    Order(Order),
    Cancel(CancelRequest),
}

/// Closed set of reasons a request can be rejected for.
///
/// `#[non_exhaustive]` because this set is expected to grow as more
/// validation rules are added (`INVALID_QUANTITY`, `INVALID_PRICE`,
/// `ORDER_NOT_FOUND`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RejectReason {
    InvalidQuantity,
    InvalidPrice,
    OrderNotFound,
}

/// A fully-ordered market-data event produced by the matching engine.
///
/// Every variant carries `order_id`, `request_id` and `timestamp`; kind
/// specific payload is attached per-variant rather than left unused on a
/// flat struct.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum MarketDataEvent {
    Acked {
        order_id: OrderId,
        request_id: u64,
        timestamp: u64,
        price: Tick,
        quantity: Qty,
    },
    Filled {
        order_id: OrderId,
        request_id: u64,
        timestamp: u64,
        trade_id: u64,
        resting_order_id: OrderId,
        price: Tick,
        quantity: Qty,
    },
    Cancelled {
        order_id: OrderId,
        request_id: u64,
        timestamp: u64,
    },
    Rejected {
        order_id: OrderId,
        request_id: u64,
        timestamp: u64,
        reason: RejectReason,
    },
}

impl MarketDataEvent {
    pub fn order_id(&self) -> OrderId {
        match self {
            MarketDataEvent::Acked { order_id, .. }
            | MarketDataEvent::Filled { order_id, .. }
            | MarketDataEvent::Cancelled { order_id, .. }
            | MarketDataEvent::Rejected { order_id, .. } => *order_id,
        }
    }

    pub fn request_id(&self) -> u64 {
        match self {
            MarketDataEvent::Acked { request_id, .. }
            | MarketDataEvent::Filled { request_id, .. }
            | MarketDataEvent::Cancelled { request_id, .. }
            | MarketDataEvent::Rejected { request_id, .. } => *request_id,
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            MarketDataEvent::Acked { timestamp, .. }
            | MarketDataEvent::Filled { timestamp, .. }
            | MarketDataEvent::Cancelled { timestamp, .. }
            | MarketDataEvent::Rejected { timestamp, .. } => *timestamp,
        }
    }
}
