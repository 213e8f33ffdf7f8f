//! Integration tests covering the engine's literal boundary scenarios
//! against the public crate API (`MatchingEngine`, not the book directly).

use ome_core::{
    CancelRequest, EngineConfig, MarketDataEvent, MatchingEngine, MonotonicClock, Order,
    OrderType, Side, VecSink,
};

fn engine() -> MatchingEngine {
    MatchingEngine::new(&EngineConfig::for_tests())
}

fn submit(engine: &mut MatchingEngine, sink: &mut VecSink, order: Order) {
    engine.submit(order, &MonotonicClock, sink).unwrap();
}

#[test]
fn basic_match() {
    let mut engine = engine();
    let mut sink = VecSink::default();

    submit(&mut engine, &mut sink, Order::new(1, 0, Side::Sell, OrderType::Limit, 100, 15_000, 0));
    submit(&mut engine, &mut sink, Order::new(2, 0, Side::Buy, OrderType::Limit, 100, 15_000, 0));

    assert_eq!(sink.events.len(), 2);
    assert!(matches!(
        sink.events[0],
        MarketDataEvent::Acked { order_id: 1, price: 15_000, quantity: 100, .. }
    ));
    assert!(matches!(
        sink.events[1],
        MarketDataEvent::Filled {
            order_id: 2,
            resting_order_id: 1,
            price: 15_000,
            quantity: 100,
            trade_id: 1,
            ..
        }
    ));
}

#[test]
fn partial_fill() {
    let mut engine = engine();
    let mut sink = VecSink::default();

    submit(&mut engine, &mut sink, Order::new(1, 0, Side::Sell, OrderType::Limit, 200, 15_000, 0));
    submit(&mut engine, &mut sink, Order::new(2, 0, Side::Buy, OrderType::Limit, 100, 15_000, 0));

    assert!(matches!(
        sink.events[1],
        MarketDataEvent::Filled { order_id: 2, resting_order_id: 1, quantity: 100, .. }
    ));
}

#[test]
fn price_time_priority() {
    let mut engine = engine();
    let mut sink = VecSink::default();

    submit(&mut engine, &mut sink, Order::new(1, 0, Side::Sell, OrderType::Limit, 100, 15_000, 0));
    submit(&mut engine, &mut sink, Order::new(2, 0, Side::Sell, OrderType::Limit, 100, 15_000, 0));
    submit(&mut engine, &mut sink, Order::new(3, 0, Side::Buy, OrderType::Limit, 50, 15_000, 0));

    let fills: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, MarketDataEvent::Filled { .. }))
        .collect();
    assert_eq!(fills.len(), 1);
    assert!(matches!(fills[0], MarketDataEvent::Filled { resting_order_id: 1, .. }));
}

#[test]
fn market_sweep() {
    let mut engine = engine();
    let mut sink = VecSink::default();

    submit(&mut engine, &mut sink, Order::new(1, 0, Side::Sell, OrderType::Limit, 100, 15_000, 0));
    submit(&mut engine, &mut sink, Order::new(2, 0, Side::Sell, OrderType::Limit, 100, 15_005, 0));
    submit(&mut engine, &mut sink, Order::new(3, 0, Side::Buy, OrderType::Market, 150, 0, 0));

    let fills: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            MarketDataEvent::Filled { resting_order_id, quantity, .. } => Some((*resting_order_id, *quantity)),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![(1, 100), (2, 50)]);
    assert!(!sink.events.iter().any(|e| matches!(e, MarketDataEvent::Cancelled { .. })));
}

#[test]
fn ioc_residual_cancels() {
    let mut engine = engine();
    let mut sink = VecSink::default();

    submit(&mut engine, &mut sink, Order::new(1, 0, Side::Sell, OrderType::Limit, 100, 15_000, 0));
    submit(&mut engine, &mut sink, Order::new(2, 0, Side::Sell, OrderType::Limit, 100, 15_005, 0));
    submit(&mut engine, &mut sink, Order::new(3, 0, Side::Sell, OrderType::Limit, 100, 15_010, 0));
    submit(&mut engine, &mut sink, Order::new(4, 0, Side::Buy, OrderType::Ioc, 250, 15_005, 0));

    let fills: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            MarketDataEvent::Filled { resting_order_id, quantity, .. } => Some((*resting_order_id, *quantity)),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![(1, 100), (2, 100)]);
    assert!(matches!(sink.events.last(), Some(MarketDataEvent::Cancelled { order_id: 4, .. })));
}

#[test]
fn fok_all_or_nothing() {
    let mut engine = engine();
    let mut sink = VecSink::default();

    submit(&mut engine, &mut sink, Order::new(1, 0, Side::Sell, OrderType::Limit, 100, 15_000, 0));
    submit(&mut engine, &mut sink, Order::new(2, 0, Side::Sell, OrderType::Limit, 100, 15_005, 0));

    sink.events.clear();
    submit(&mut engine, &mut sink, Order::new(5, 0, Side::Buy, OrderType::Fok, 201, 0, 0));
    assert_eq!(sink.events.len(), 1);
    assert!(matches!(sink.events[0], MarketDataEvent::Cancelled { order_id: 5, .. }));

    sink.events.clear();
    submit(&mut engine, &mut sink, Order::new(6, 0, Side::Buy, OrderType::Fok, 200, 0, 0));
    let fills = sink.events.iter().filter(|e| matches!(e, MarketDataEvent::Filled { .. })).count();
    assert_eq!(fills, 2);
    assert!(!sink.events.iter().any(|e| matches!(e, MarketDataEvent::Cancelled { .. })));
}

#[test]
fn cancel_twice_yields_cancelled_then_order_not_found() {
    let mut engine = engine();
    let mut sink = VecSink::default();

    submit(&mut engine, &mut sink, Order::new(1, 0, Side::Buy, OrderType::Limit, 100, 15_000, 0));
    engine
        .cancel(CancelRequest { request_id: 10, target_order_id: 1, timestamp: 0 }, &MonotonicClock, &mut sink)
        .unwrap();
    engine
        .cancel(CancelRequest { request_id: 11, target_order_id: 1, timestamp: 0 }, &MonotonicClock, &mut sink)
        .unwrap();

    assert!(matches!(sink.events[1], MarketDataEvent::Cancelled { order_id: 1, .. }));
    assert!(matches!(
        sink.events[2],
        MarketDataEvent::Rejected { order_id: 1, reason: ome_core::RejectReason::OrderNotFound, .. }
    ));
}
