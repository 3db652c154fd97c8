//! # Pipeline Actor
//!
//! [`EventPipeline`] is the [`ActorHandler`] that feeds mailbox commands into
//! [`Restaurant::apply`]. Cooks, servers and managers each hold a cloned client; the actor
//! applies their events one at a time in arrival order.
//!
//! ## Context
//!
//! The restaurant is injected at `run()` time as `Arc<Restaurant>`, so the same session can
//! also be inspected (or driven directly) from outside the actor.

use super::{Event, EventOutcome};
use crate::error::EngineError;
use crate::inventory::StockLevel;
use crate::model::{Order, OrderId, Table, TableId};
use crate::persistence::{ReorderRecord, Snapshot};
use crate::restaurant::Restaurant;
use kitchen_actor::ActorHandler;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Read-only questions answered by the pipeline.
#[derive(Debug, Clone)]
pub enum KitchenQuery {
    Order(OrderId),
    Orders,
    Table(TableId),
    Stock(String),
    PendingReorders,
    Snapshot,
    TopIngredients(usize),
    TopMenuItems(usize),
}

#[derive(Debug, Clone)]
pub enum KitchenView {
    Order(Option<Order>),
    Orders(Vec<Order>),
    Table(Option<Table>),
    Stock(Option<StockLevel>),
    Reorders(Vec<ReorderRecord>),
    Snapshot(Snapshot),
    Ranking(Vec<(String, u64)>),
}

/// Applies kitchen events in mailbox order and tallies them by kind.
#[derive(Debug, Default)]
pub struct EventPipeline {
    accepted: BTreeMap<&'static str, u64>,
    rejected: BTreeMap<&'static str, u64>,
}

impl EventPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted(&self, kind: &str) -> u64 {
        self.accepted.get(kind).copied().unwrap_or(0)
    }

    pub fn rejected(&self, kind: &str) -> u64 {
        self.rejected.get(kind).copied().unwrap_or(0)
    }
}

impl ActorHandler for EventPipeline {
    type Command = Event;
    type Reply = EventOutcome;
    type Query = KitchenQuery;
    type View = KitchenView;
    type Context = Arc<Restaurant>;
    type Error = EngineError;

    fn on_start(&mut self, restaurant: &Arc<Restaurant>) {
        info!(restaurant = %restaurant.name(), "Pipeline open");
    }

    fn handle(
        &mut self,
        event: Event,
        restaurant: &Arc<Restaurant>,
    ) -> Result<EventOutcome, EngineError> {
        let kind = event.kind();
        let outcome = restaurant.apply(event);
        let tally = if outcome.is_ok() {
            &mut self.accepted
        } else {
            &mut self.rejected
        };
        *tally.entry(kind).or_insert(0) += 1;
        outcome
    }

    fn query(&self, query: KitchenQuery, restaurant: &Arc<Restaurant>) -> KitchenView {
        match query {
            KitchenQuery::Order(id) => KitchenView::Order(restaurant.order(id)),
            KitchenQuery::Orders => KitchenView::Orders(restaurant.orders()),
            KitchenQuery::Table(id) => KitchenView::Table(restaurant.table(id)),
            KitchenQuery::Stock(name) => KitchenView::Stock(restaurant.stock(&name)),
            KitchenQuery::PendingReorders => KitchenView::Reorders(restaurant.pending_reorders()),
            KitchenQuery::Snapshot => KitchenView::Snapshot(restaurant.snapshot()),
            KitchenQuery::TopIngredients(limit) => {
                KitchenView::Ranking(restaurant.statistics().top_ingredients(limit))
            }
            KitchenQuery::TopMenuItems(limit) => {
                KitchenView::Ranking(restaurant.statistics().top_menu_items(limit))
            }
        }
    }

    fn on_stop(&mut self, restaurant: &Arc<Restaurant>) {
        let accepted: u64 = self.accepted.values().sum();
        let rejected: u64 = self.rejected.values().sum();
        info!(
            restaurant = %restaurant.name(),
            accepted,
            rejected,
            orders = restaurant.orders().len(),
            "Pipeline closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IngredientConfig, MenuItemConfig, RestaurantConfig, StaffConfig, TableLayout};
    use crate::model::StaffId;
    use crate::pipeline::{CookRequest, OrderRequest, ReceiveRequest};
    use kitchen_actor::MailboxActor;

    fn diner() -> Arc<Restaurant> {
        let config = RestaurantConfig {
            ingredients: vec![IngredientConfig::new("Egg", 3, 2)],
            menu: vec![MenuItemConfig::new("Omelette", 7.0, [("Egg", 2)])],
            tables: TableLayout {
                seat_counts: vec![2],
            },
            staff: StaffConfig {
                cooks: vec!["Ana".into()],
                servers: vec!["Cy".into()],
                managers: vec![],
            },
            ..RestaurantConfig::default()
        };
        Arc::new(Restaurant::builder(config).build().unwrap())
    }

    #[tokio::test]
    async fn test_pipeline_applies_in_order_and_tallies() {
        let restaurant = diner();
        let (actor, client) = MailboxActor::new(EventPipeline::new(), 8);
        let handle = tokio::spawn(actor.run(restaurant.clone()));
        let (cook, server) = (StaffId(1), StaffId(2));

        let placed = client
            .send(Event::Order(OrderRequest::new("Omelette", TableId(1), 1, server)))
            .await
            .unwrap();
        let EventOutcome::Placed(id) = placed else {
            panic!("expected Placed, got {placed:?}");
        };

        let err = client
            .send(Event::Order(OrderRequest::new("Omelette", TableId(1), 2, server)))
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_handler_error(),
            Some(EngineError::InsufficientStock { .. })
        ));

        client
            .send(Event::Receive(ReceiveRequest { order: id, cook }))
            .await
            .unwrap();
        client
            .send(Event::Cook(CookRequest { order: id, cook }))
            .await
            .unwrap();

        match client.query(KitchenQuery::TopMenuItems(1)).await.unwrap() {
            KitchenView::Ranking(ranking) => assert_eq!(ranking, vec![("Omelette".to_string(), 1)]),
            other => panic!("unexpected view {other:?}"),
        }
        match client.query(KitchenQuery::PendingReorders).await.unwrap() {
            KitchenView::Reorders(pending) => assert_eq!(pending[0].name, "Egg"),
            other => panic!("unexpected view {other:?}"),
        }

        drop(client);
        let pipeline = handle.await.unwrap();
        assert_eq!(pipeline.accepted("order"), 1);
        assert_eq!(pipeline.rejected("order"), 1);
        assert_eq!(pipeline.accepted("cook"), 1);
        assert_eq!(restaurant.orders().len(), 1);
    }
}
