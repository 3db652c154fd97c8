mod common;

use kitchen_core::config::IngredientConfig;
use kitchen_core::inventory::IngredientStore;
use kitchen_core::model::{
    CancelReason, IngredientId, OrderId, OrderState, Requirements, ReservationStatus, StaffId,
    TableId,
};
use kitchen_core::pipeline::{
    CancelRequest, CookRequest, DeliverRequest, Event, OrderRequest, ReceiveRequest,
    ReturnRequest, ShipmentRequest,
};
use kitchen_core::restaurant::Restaurant;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

const ITEMS: [&str; 3] = ["Burger", "Cheeseburger", "Salad"];
const INGREDIENTS: [&str; 5] = ["Bun", "Patty", "Cheese", "Onion", "Lettuce"];

#[derive(Debug, Clone)]
enum Step {
    Place { item: usize, seat: u32, cheese: u32 },
    Receive { order: u32, cook: u32 },
    Cook { order: u32, cook: u32 },
    Deliver { order: u32 },
    Cancel { order: u32 },
    Return { order: u32 },
    Ship { ingredient: usize, qty: u32 },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..ITEMS.len(), 1..=8u32, 0..3u32)
            .prop_map(|(item, seat, cheese)| Step::Place { item, seat, cheese }),
        (0..12u32, 1..=2u32).prop_map(|(order, cook)| Step::Receive { order, cook }),
        (0..12u32, 1..=2u32).prop_map(|(order, cook)| Step::Cook { order, cook }),
        (0..12u32).prop_map(|order| Step::Deliver { order }),
        (0..12u32).prop_map(|order| Step::Cancel { order }),
        (0..12u32).prop_map(|order| Step::Return { order }),
        (0..INGREDIENTS.len(), 1..6u32).prop_map(|(ingredient, qty)| Step::Ship { ingredient, qty }),
    ]
}

fn event(step: Step) -> Event {
    let order = |n: u32| OrderId(10000 + n);
    match step {
        Step::Place { item, seat, cheese } => {
            let mut request = OrderRequest::new(ITEMS[item], TableId(2), seat, StaffId(3));
            if cheese > 0 {
                request = request.add("Cheese", cheese);
            }
            Event::Order(request)
        }
        Step::Receive { order: n, cook } => Event::Receive(ReceiveRequest {
            order: order(n),
            cook: StaffId(cook),
        }),
        Step::Cook { order: n, cook } => Event::Cook(CookRequest {
            order: order(n),
            cook: StaffId(cook),
        }),
        Step::Deliver { order: n } => Event::Deliver(DeliverRequest {
            order: order(n),
            server: StaffId(3),
        }),
        Step::Cancel { order: n } => Event::Cancel(CancelRequest {
            order: order(n),
            reason: CancelReason::CustomerCancelled,
            description: None,
        }),
        Step::Return { order: n } => Event::Return(ReturnRequest {
            order: order(n),
            description: None,
        }),
        Step::Ship { ingredient, qty } => Event::Shipment(ShipmentRequest {
            items: BTreeMap::from([(INGREDIENTS[ingredient].to_string(), qty)]),
        }),
    }
}

fn small_store() -> IngredientStore {
    let configs = [
        IngredientConfig::new("Flour", 6, 0),
        IngredientConfig::new("Sugar", 3, 0),
        IngredientConfig::new("Butter", 4, 0),
    ];
    IngredientStore::new(&configs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any event sequence keeps stock conserved, reservations matched and orders moving forward.
    #[test]
    fn prop_event_sequences_keep_invariants(steps in prop::collection::vec(step(), 1..40)) {
        let restaurant = Restaurant::builder(common::burger_bar()).build().unwrap();
        let mut seen: HashMap<OrderId, OrderState> = HashMap::new();

        for step in steps {
            let _ = restaurant.apply(event(step));

            for (_, level) in restaurant.store().levels() {
                prop_assert!(level.is_conserved(), "{:?}", level);
            }

            let orders = restaurant.orders();
            let mut held: HashMap<IngredientId, u32> = HashMap::new();
            for order in &orders {
                if order.reservation == ReservationStatus::Held {
                    for (id, qty) in order.requirements.iter() {
                        *held.entry(id).or_insert(0) += qty;
                    }
                }
                if let Some(previous) = seen.insert(order.id, order.state) {
                    prop_assert!(order.state >= previous, "{} went from {} to {}", order.id, previous, order.state);
                }
            }
            for (id, level) in restaurant.store().levels() {
                prop_assert_eq!(level.reserved, held.get(&id).copied().unwrap_or(0));
            }

            let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
            let mut sorted = ids.clone();
            sorted.sort();
            prop_assert_eq!(ids, sorted);
        }
    }

    /// A reservation either takes every line or leaves every slot untouched.
    #[test]
    fn prop_reservation_is_all_or_nothing(
        flour in 0..8u32,
        sugar in 0..8u32,
        butter in 0..8u32,
    ) {
        let store = small_store();
        let before = store.levels();
        let requirements: Requirements = [
            (IngredientId(1), flour),
            (IngredientId(2), sugar),
            (IngredientId(3), butter),
        ]
        .into_iter()
        .collect();

        let fits = flour <= 6 && sugar <= 3 && butter <= 4;
        let result = store.reserve(&requirements);
        prop_assert_eq!(result.is_ok(), fits);

        for ((id, old), (_, new)) in before.iter().zip(store.levels()) {
            if fits {
                let qty = requirements.get(*id);
                prop_assert_eq!(new.amount, old.amount - qty);
                prop_assert_eq!(new.reserved, old.reserved + qty);
            } else {
                prop_assert_eq!(new, *old);
            }
        }
    }
}
