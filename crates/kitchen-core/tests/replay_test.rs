mod common;

use kitchen_core::error::EngineError;
use kitchen_core::model::{OrderState, StaffId, TableId};
use kitchen_core::persistence::{LatestSnapshot, Snapshot};
use kitchen_core::pipeline::{replay, Event, EventOutcome, OrderRequest};
use kitchen_core::restaurant::Restaurant;
use std::sync::Arc;

const LOG: &str = r#"[
    {"event": "order", "item": "Burger", "table": 1, "seat": 1, "server": 3,
     "subtractions": {"Onion": 1}},
    {"event": "order", "item": "Cheeseburger", "table": 1, "seat": 2, "server": 3,
     "additions": {"Cheese": 1}},
    {"event": "dispatch", "order": 10001, "cook": 2},
    {"event": "receive", "order": 10000, "cook": 1},
    {"event": "receive", "order": 10001, "cook": 1},
    {"event": "receive", "order": 10001, "cook": 2},
    {"event": "cook", "order": 10000, "cook": 1},
    {"event": "cook", "order": 10001, "cook": 2},
    {"event": "deliver", "order": 10000, "server": 3},
    {"event": "deliver", "order": 10001, "server": 4},
    {"event": "return", "order": 10000, "description": "Cold"},
    {"event": "cancel", "order": 10002, "reason": "CUSTOMER_CANCELLED"},
    {"event": "shipment", "items": {"Cheese": 4}},
    {"event": "get_bill", "table": 1}
]"#;

#[test]
fn test_replay_serialized_log() {
    let events: Vec<Event> = serde_json::from_str(LOG).unwrap();
    assert_eq!(events.len(), 14);
    assert_eq!(events[2].kind(), "dispatch");

    let snapshots = Arc::new(LatestSnapshot::new());
    let restaurant = Restaurant::builder(common::burger_bar())
        .snapshots(snapshots.clone())
        .build()
        .unwrap();
    let report = replay(&restaurant, events);

    // Ana cannot receive an order dispatched to Bo, and Di is not its server.
    let rejected: Vec<usize> = report.rejected.iter().map(|(i, _)| *i).collect();
    assert_eq!(rejected, vec![4, 9]);
    assert!(matches!(
        report.rejected[0].1,
        EngineError::AssignmentMismatch { .. }
    ));
    assert_eq!(report.applied, 12);
    assert_eq!(snapshots.count(), 12);

    assert!(report.outcomes.contains(&EventOutcome::Returned {
        original: kitchen_core::model::OrderId(10000),
        replacement: kitchen_core::model::OrderId(10002),
    }));

    let states: Vec<_> = restaurant.orders().iter().map(|o| o.state).collect();
    assert_eq!(
        states,
        vec![
            OrderState::Cancelled,
            OrderState::Cooked,
            OrderState::Cancelled
        ]
    );

    // Burger without onion, then a cheeseburger with double cheese.
    assert_eq!(restaurant.statistics().ingredient_usage("Onion"), 0);
    assert_eq!(restaurant.statistics().ingredient_usage("Cheese"), 2);
    assert_eq!(restaurant.statistics().menu_usage("Burger"), 1);
    let cheese = restaurant.stock("Cheese").unwrap();
    assert_eq!((cheese.amount, cheese.reserved, cheese.consumed), (7, 0, 2));

    let Some(EventOutcome::Billed(bill)) = report.outcomes.last() else {
        panic!("last outcome should be the bill");
    };
    assert_eq!(bill.lines.len(), 1);
    assert_eq!(bill.subtotal, 9.75);
}

#[test]
fn test_snapshot_survives_json_and_restores_usage() {
    let first = Restaurant::builder(common::burger_bar()).build().unwrap();
    let id = first
        .place_order(&OrderRequest::new("Salad", TableId(1), 1, StaffId(3)))
        .unwrap();
    first.receive(id, StaffId(1)).unwrap();
    first.cook(id, StaffId(1)).unwrap();

    let json = serde_json::to_string(&first.snapshot()).unwrap();
    let saved: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(saved, first.snapshot());

    let second = Restaurant::builder(common::burger_bar()).build().unwrap();
    assert_eq!(second.statistics().ingredient_usage("Lettuce"), 0);
    second.restore_statistics(&saved);
    assert_eq!(second.statistics().ingredient_usage("Lettuce"), 2);
    assert_eq!(second.statistics().menu_usage("Salad"), 1);
    // Stock comes from configuration, not from the snapshot.
    assert_eq!(second.stock("Lettuce").unwrap().amount, 10);
}

#[test]
fn test_unknown_event_tag_is_rejected_by_the_parser() {
    let parsed: Result<Event, _> = serde_json::from_str(r#"{"event": "flambe", "order": 1}"#);
    assert!(parsed.is_err());
}
