//! Property-based tests over the matching engine's invariants.

use ome_core::{EngineConfig, MarketDataEvent, MatchingEngine, MonotonicClock, Order, OrderType, Side, VecSink};
use proptest::prelude::*;

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn order_type_strategy() -> impl Strategy<Value = OrderType> {
    prop_oneof![
        Just(OrderType::Limit),
        Just(OrderType::Market),
        Just(OrderType::Ioc),
        Just(OrderType::Fok),
    ]
}

proptest! {
    /// Feeding a sequence of well-formed LIMIT/MARKET/IOC/FOK orders never
    /// overfills anyone: every FILLED event's cumulative quantity for a
    /// given order id stays within its original quantity (invariant 3), and
    /// trade ids strictly increase (invariant 6).
    #[test]
    fn fills_never_exceed_original_quantity_and_trade_ids_increase(
        requests in prop::collection::vec(
            (1u32..=1_000, side_strategy(), order_type_strategy(), 1u32..=400),
            1..200,
        )
    ) {
        let mut engine = MatchingEngine::new(&EngineConfig::for_tests());
        let clock = MonotonicClock;
        let mut sink = VecSink::default();
        let mut original_quantity: std::collections::HashMap<u64, u32> = std::collections::HashMap::new();
        let mut filled_so_far: std::collections::HashMap<u64, u32> = std::collections::HashMap::new();
        let mut last_trade_id = 0u64;

        for (index, (price, side, order_type, quantity)) in requests.into_iter().enumerate() {
            let order_id = index as u64 + 1;
            let price = if order_type == OrderType::Limit { price } else { 0 };
            original_quantity.insert(order_id, quantity);
            let order = Order::new(order_id, 0, side, order_type, quantity, price, 0);
            engine.submit(order, &clock, &mut sink).unwrap();
        }

        for event in &sink.events {
            if let MarketDataEvent::Filled { order_id, resting_order_id, quantity, trade_id, .. } = event {
                prop_assert!(*trade_id > last_trade_id);
                last_trade_id = *trade_id;

                for id in [*order_id, *resting_order_id] {
                    let entry = filled_so_far.entry(id).or_insert(0);
                    *entry += quantity;
                    prop_assert!(*entry <= original_quantity[&id]);
                }
            }
        }
    }
}
