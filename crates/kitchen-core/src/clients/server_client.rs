//! # Server Client
//!
//! Front-of-house API: servers take orders, deliver food, handle cancellations and returns,
//! and settle tables.
use super::error::{unexpected_outcome, unexpected_view, ClientError};
use crate::error::EngineError;
use crate::model::{Bill, CancelReason, Order, OrderId, StaffId, TableId};
use crate::pipeline::{
    BillRequest, CancelRequest, ClearTableRequest, DeliverRequest, Event, EventOutcome,
    EventPipeline, KitchenQuery, KitchenView, OrderRequest, ReturnRequest,
};
use async_trait::async_trait;
use kitchen_actor::{ActorClient, ActorError, MailboxClient};
use tracing::{debug, info, instrument};

/// Client held by one server.
#[derive(Clone)]
pub struct ServerClient {
    inner: MailboxClient<EventPipeline>,
    server: StaffId,
}

impl ServerClient {
    pub fn new(inner: MailboxClient<EventPipeline>, server: StaffId) -> Self {
        Self { inner, server }
    }

    pub fn server(&self) -> StaffId {
        self.server
    }

    /// Starts an order ticket written by this server.
    pub fn ticket(&self, item: impl Into<String>, table: TableId, seat: u32) -> OrderRequest {
        OrderRequest::new(item, table, seat, self.server)
    }

    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn place_order(&self, request: OrderRequest) -> Result<OrderId, ClientError> {
        debug!(?request, "place_order called");
        match self.send(Event::Order(request)).await? {
            EventOutcome::Placed(id) => {
                info!(order = %id, "Order placed");
                Ok(id)
            }
            other => Err(unexpected_outcome(other)),
        }
    }

    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn deliver(&self, order: OrderId) -> Result<(), ClientError> {
        let request = DeliverRequest {
            order,
            server: self.server,
        };
        match self.send(Event::Deliver(request)).await? {
            EventOutcome::Delivered(_) => Ok(()),
            other => Err(unexpected_outcome(other)),
        }
    }

    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn cancel(
        &self,
        order: OrderId,
        reason: CancelReason,
        description: Option<String>,
    ) -> Result<(), ClientError> {
        let request = CancelRequest {
            order,
            reason,
            description,
        };
        match self.send(Event::Cancel(request)).await? {
            EventOutcome::Cancelled(_) => Ok(()),
            other => Err(unexpected_outcome(other)),
        }
    }

    /// Returns a delivered order and gets the id of its replacement.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn return_order(
        &self,
        order: OrderId,
        description: Option<String>,
    ) -> Result<OrderId, ClientError> {
        let request = ReturnRequest { order, description };
        match self.send(Event::Return(request)).await? {
            EventOutcome::Returned { replacement, .. } => Ok(replacement),
            other => Err(unexpected_outcome(other)),
        }
    }

    /// Bills the whole table, or a single seat when `seat` is given.
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn bill(&self, table: TableId, seat: Option<u32>) -> Result<Bill, ClientError> {
        match self.send(Event::GetBill(BillRequest { table, seat })).await? {
            EventOutcome::Billed(bill) => Ok(bill),
            other => Err(unexpected_outcome(other)),
        }
    }

    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn clear_table(&self, table: TableId) -> Result<(), ClientError> {
        let request = ClearTableRequest {
            table,
            server: self.server,
        };
        match self.send(Event::ClearTable(request)).await? {
            EventOutcome::Cleared(_) => Ok(()),
            other => Err(unexpected_outcome(other)),
        }
    }

    pub async fn order(&self, id: OrderId) -> Result<Option<Order>, ClientError> {
        match self.query(KitchenQuery::Order(id)).await? {
            KitchenView::Order(order) => Ok(order),
            other => Err(unexpected_view(other)),
        }
    }
}

#[async_trait]
impl ActorClient<EventPipeline> for ServerClient {
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
    use crate::error::EntityKind;
    use kitchen_actor::mock::{create_mock_client, expect_command, MockClient};

    #[tokio::test]
    async fn test_place_order_stamps_server() {
        let (client, mut rx) = create_mock_client::<EventPipeline>(4);
        let server = ServerClient::new(client, StaffId(3));

        let responder = tokio::spawn(async move {
            let (command, respond_to) = expect_command(&mut rx).await.unwrap();
            let Event::Order(request) = command else {
                panic!("expected an order, got {command:?}");
            };
            assert_eq!(request.server, StaffId(3));
            assert_eq!(request.additions.get("Cheese"), Some(&1));
            respond_to
                .send(Ok(EventOutcome::Placed(OrderId(10000))))
                .unwrap();
        });

        let ticket = server.ticket("Burger", TableId(1), 2).add("Cheese", 1);
        assert_eq!(server.place_order(ticket).await.unwrap(), OrderId(10000));
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_rejection_keeps_engine_error() {
        let mut mock = MockClient::<EventPipeline>::new();
        mock.expect_command()
            .return_err(ActorError::Handler(EngineError::unknown(
                EntityKind::Table,
                "table_9",
            )));
        mock.expect_command()
            .return_ok(EventOutcome::Cleared(TableId(1)));

        let server = ServerClient::new(mock.client(), StaffId(3));
        let err = server.bill(TableId(9), None).await.unwrap_err();
        assert!(matches!(
            err.rejection(),
            Some(EngineError::UnknownEntity {
                kind: EntityKind::Table,
                ..
            })
        ));

        // A reply for a different event is reported, not swallowed.
        let err = server.deliver(OrderId(10000)).await.unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedReply(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_mailbox_is_communication_error() {
        let (client, rx) = create_mock_client::<EventPipeline>(1);
        drop(rx);
        let server = ServerClient::new(client, StaffId(3));
        let err = server.clear_table(TableId(1)).await.unwrap_err();
        assert!(matches!(err, ClientError::ActorCommunicationError(_)));
    }
}
