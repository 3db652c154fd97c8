//! # Manager Client
//!
//! Back-of-house API: dispatching orders to cooks, shipments, reorders and the usage
//! statistics.
use super::error::{unexpected_outcome, unexpected_view, ClientError};
use crate::error::EngineError;
use crate::inventory::StockLevel;
use crate::model::{IngredientId, OrderId, StaffId};
use crate::persistence::{ReorderRecord, Snapshot};
use crate::pipeline::{
    AdjustReorderRequest, DispatchRequest, Event, EventOutcome, EventPipeline, KitchenQuery,
    KitchenView, ShipmentRequest,
};
use async_trait::async_trait;
use kitchen_actor::{ActorClient, ActorError, MailboxClient};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Client held by a manager.
#[derive(Clone)]
pub struct ManagerClient {
    inner: MailboxClient<EventPipeline>,
    manager: StaffId,
}

impl ManagerClient {
    pub fn new(inner: MailboxClient<EventPipeline>, manager: StaffId) -> Self {
        Self { inner, manager }
    }

    pub fn manager(&self) -> StaffId {
        self.manager
    }

    /// Assigns an ORDERED order to a cook.
    #[instrument(skip(self), fields(manager = %self.manager))]
    pub async fn dispatch(&self, order: OrderId, cook: StaffId) -> Result<(), ClientError> {
        match self
            .send(Event::Dispatch(DispatchRequest { order, cook }))
            .await?
        {
            EventOutcome::Dispatched(_) => Ok(()),
            other => Err(unexpected_outcome(other)),
        }
    }

    /// Restocks every line of a shipment. Returns how many ingredients were restocked.
    #[instrument(skip(self), fields(manager = %self.manager))]
    pub async fn receive_shipment(
        &self,
        items: BTreeMap<String, u32>,
    ) -> Result<usize, ClientError> {
        match self.send(Event::Shipment(ShipmentRequest { items })).await? {
            EventOutcome::Restocked(count) => Ok(count),
            other => Err(unexpected_outcome(other)),
        }
    }

    #[instrument(skip(self), fields(manager = %self.manager))]
    pub async fn adjust_reorder(
        &self,
        ingredient: &str,
        quantity: u32,
    ) -> Result<IngredientId, ClientError> {
        let request = AdjustReorderRequest {
            ingredient: ingredient.to_string(),
            quantity,
        };
        match self.send(Event::AdjustReorder(request)).await? {
            EventOutcome::ReorderAdjusted { ingredient, .. } => Ok(ingredient),
            other => Err(unexpected_outcome(other)),
        }
    }

    pub async fn pending_reorders(&self) -> Result<Vec<ReorderRecord>, ClientError> {
        match self.query(KitchenQuery::PendingReorders).await? {
            KitchenView::Reorders(pending) => Ok(pending),
            other => Err(unexpected_view(other)),
        }
    }

    pub async fn stock(&self, ingredient: &str) -> Result<Option<StockLevel>, ClientError> {
        match self
            .query(KitchenQuery::Stock(ingredient.to_string()))
            .await?
        {
            KitchenView::Stock(level) => Ok(level),
            other => Err(unexpected_view(other)),
        }
    }

    /// Most used ingredients, highest first.
    pub async fn top_ingredients(&self, limit: usize) -> Result<Vec<(String, u64)>, ClientError> {
        self.ranking(KitchenQuery::TopIngredients(limit)).await
    }

    /// Most cooked menu items, highest first.
    pub async fn top_menu_items(&self, limit: usize) -> Result<Vec<(String, u64)>, ClientError> {
        self.ranking(KitchenQuery::TopMenuItems(limit)).await
    }

    pub async fn snapshot(&self) -> Result<Snapshot, ClientError> {
        match self.query(KitchenQuery::Snapshot).await? {
            KitchenView::Snapshot(snapshot) => Ok(snapshot),
            other => Err(unexpected_view(other)),
        }
    }

    async fn ranking(&self, query: KitchenQuery) -> Result<Vec<(String, u64)>, ClientError> {
        debug!(?query, "Ranking requested");
        match self.query(query).await? {
            KitchenView::Ranking(ranking) => Ok(ranking),
            other => Err(unexpected_view(other)),
        }
    }
}

#[async_trait]
impl ActorClient<EventPipeline> for ManagerClient {
    type Error = ClientError;

    fn inner(&self) -> &MailboxClient<EventPipeline> {
        &self.inner
    }

    fn map_error(e: ActorError<EngineError>) -> Self::Error {
        ClientError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_actor::mock::{create_mock_client, expect_command, expect_query, MockClient};

    #[tokio::test]
    async fn test_shipment_forwards_items() {
        let (client, mut rx) = create_mock_client::<EventPipeline>(4);
        let manager = ManagerClient::new(client, StaffId(5));

        let responder = tokio::spawn(async move {
            let (command, respond_to) = expect_command(&mut rx).await.unwrap();
            match command {
                Event::Shipment(ShipmentRequest { items }) => {
                    assert_eq!(items.get("Cheese"), Some(&10));
                    respond_to.send(Ok(EventOutcome::Restocked(items.len()))).unwrap();
                }
                other => panic!("expected a shipment, got {other:?}"),
            }

            let (query, respond_to) = expect_query(&mut rx).await.unwrap();
            assert!(matches!(query, KitchenQuery::TopIngredients(2)));
            respond_to
                .send(Ok(KitchenView::Ranking(vec![("Bun".into(), 4)])))
                .unwrap();
        });

        let shipment = BTreeMap::from([("Cheese".to_string(), 10)]);
        assert_eq!(manager.receive_shipment(shipment).await.unwrap(), 1);
        assert_eq!(
            manager.top_ingredients(2).await.unwrap(),
            vec![("Bun".to_string(), 4)]
        );
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_wrong_view_is_unexpected_reply() {
        let mut mock = MockClient::<EventPipeline>::new();
        mock.expect_query()
            .return_ok(KitchenView::Ranking(Vec::new()));

        let manager = ManagerClient::new(mock.client(), StaffId(5));
        let err = manager.pending_reorders().await.unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedReply(_)));
        mock.verify();
    }
}
