use crate::clients::{CookClient, ManagerClient, ServerClient};
use crate::config::ConfigSource;
use crate::error::{ConfigError, EngineError};
use crate::model::StaffId;
use crate::pipeline::EventPipeline;
use crate::restaurant::Restaurant;
use crate::staff::Role;
use kitchen_actor::{MailboxActor, MailboxClient};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A running kitchen session: the restaurant plus its pipeline actor.
///
/// # Example
///
/// ```ignore
/// let system = KitchenSystem::new(&config)?;
/// let manager = system.manager(StaffId(5))?;
/// manager.receive_shipment(shipment).await?;
/// system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    restaurant: Arc<Restaurant>,
    client: MailboxClient<EventPipeline>,
    handle: JoinHandle<EventPipeline>,
}

impl KitchenSystem {
    /// Loads configuration, opens the restaurant and starts the pipeline.
    /// Must be called inside a Tokio runtime.
    pub fn new(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let config = source.load()?;
        let capacity = config.mailbox_capacity;
        let restaurant = Restaurant::builder(config).build()?;
        Ok(Self::with_restaurant(Arc::new(restaurant), capacity))
    }

    /// Starts the pipeline over a restaurant built elsewhere, e.g. with custom sinks.
    pub fn with_restaurant(restaurant: Arc<Restaurant>, capacity: usize) -> Self {
        let (actor, client) = MailboxActor::new(EventPipeline::new(), capacity.max(1));
        let handle = tokio::spawn(actor.run(restaurant.clone()));
        info!(restaurant = %restaurant.name(), capacity, "Kitchen system started");
        Self {
            restaurant,
            client,
            handle,
        }
    }

    pub fn restaurant(&self) -> &Arc<Restaurant> {
        &self.restaurant
    }

    /// A raw pipeline client, for callers that build events themselves.
    pub fn client(&self) -> MailboxClient<EventPipeline> {
        self.client.clone()
    }

    pub fn server(&self, id: StaffId) -> Result<ServerClient, EngineError> {
        self.restaurant.staff().require(id, Role::Server)?;
        Ok(ServerClient::new(self.client.clone(), id))
    }

    pub fn cook(&self, id: StaffId) -> Result<CookClient, EngineError> {
        self.restaurant.staff().require(id, Role::Cook)?;
        Ok(CookClient::new(self.client.clone(), id))
    }

    pub fn manager(&self, id: StaffId) -> Result<ManagerClient, EngineError> {
        self.restaurant.staff().require(id, Role::Manager)?;
        Ok(ManagerClient::new(self.client.clone(), id))
    }

    /// Closes the mailbox and waits for the pipeline to drain.
    ///
    /// Role clients handed out earlier must be dropped first, otherwise this waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down kitchen...");
        drop(self.client);

        match self.handle.await {
            Ok(pipeline) => {
                info!(
                    orders = self.restaurant.orders().len(),
                    cooked = pipeline.accepted("cook"),
                    "Kitchen shutdown complete."
                );
                Ok(())
            }
            Err(e) => {
                error!("Pipeline task failed: {:?}", e);
                Err(format!("Pipeline task failed: {:?}", e))
            }
        }
    }
}
