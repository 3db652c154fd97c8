//! # Cook Client
//!
//! Kitchen-side API. A cook claims orders from the queue and cooks them.
use super::error::{unexpected_outcome, unexpected_view, ClientError};
use crate::error::EngineError;
use crate::model::{Order, OrderId, StaffId};
use crate::pipeline::{
    CookRequest, Event, EventOutcome, EventPipeline, KitchenQuery, KitchenView, ReceiveRequest,
};
use async_trait::async_trait;
use kitchen_actor::{ActorClient, ActorError, MailboxClient};
use tracing::{info, instrument};

/// Client held by one cook.
#[derive(Clone)]
pub struct CookClient {
    inner: MailboxClient<EventPipeline>,
    cook: StaffId,
}

impl CookClient {
    pub fn new(inner: MailboxClient<EventPipeline>, cook: StaffId) -> Self {
        Self { inner, cook }
    }

    pub fn cook_id(&self) -> StaffId {
        self.cook
    }

    /// Claims an order, or acknowledges one dispatched to this cook.
    #[instrument(skip(self), fields(cook = %self.cook))]
    pub async fn receive(&self, order: OrderId) -> Result<(), ClientError> {
        let request = ReceiveRequest {
            order,
            cook: self.cook,
        };
        match self.send(Event::Receive(request)).await? {
            EventOutcome::Received(_) => Ok(()),
            other => Err(unexpected_outcome(other)),
        }
    }

    /// Cooks an order this cook holds. If stock ran out the order comes back cancelled.
    #[instrument(skip(self), fields(cook = %self.cook))]
    pub async fn cook(&self, order: OrderId) -> Result<(), ClientError> {
        let request = CookRequest {
            order,
            cook: self.cook,
        };
        match self.send(Event::Cook(request)).await? {
            EventOutcome::Cooked(_) => {
                info!(order = %order, "Order cooked");
                Ok(())
            }
            other => Err(unexpected_outcome(other)),
        }
    }

    /// Orders waiting in the kitchen that no cook has claimed yet.
    pub async fn queue(&self) -> Result<Vec<Order>, ClientError> {
        match self.query(KitchenQuery::Orders).await? {
            KitchenView::Orders(orders) => Ok(orders
                .into_iter()
                .filter(|order| !order.state.is_final() && order.cook.is_none())
                .collect()),
            other => Err(unexpected_view(other)),
        }
    }
}

#[async_trait]
impl ActorClient<EventPipeline> for CookClient {
    type Error = ClientError;

    fn inner(&self) -> &MailboxClient<EventPipeline> {
        &self.inner
    }

    fn map_error(e: ActorError<EngineError>) -> Self::Error {
        ClientError::from(e)
    }
}
