//! Back-of-house events: shipments, reorder adjustments and statistics restore.

use super::Restaurant;
use crate::error::{EngineError, IngredientIssue};
use crate::model::{IngredientId, Requirements};
use crate::notify::{ActorId, Outbox};
use crate::persistence::Snapshot;
use std::collections::BTreeMap;
use tracing::info;

impl Restaurant {
    /// Restocks every line of a shipment, or none of them if a name is unknown.
    /// Returns the number of ingredients restocked.
    pub fn receive_shipment(&self, items: &BTreeMap<String, u32>) -> Result<usize, EngineError> {
        let shipment: Requirements = self.resolve(items)?.into_iter().collect();
        self.store.restock_all(&shipment)?;

        info!(ingredients = shipment.len(), "Shipment received");
        let mut outbox = Outbox::default();
        let lines: Vec<String> = shipment
            .iter()
            .map(|(id, qty)| format!("{qty} {}", self.store.name(id).unwrap_or_default()))
            .collect();
        outbox.log(
            ActorId::Managers,
            format!("Shipment received: {}", lines.join(", ")),
        );
        self.recompute_reorders(&mut outbox);
        self.finish(outbox);
        Ok(shipment.len())
    }

    /// Overrides the quantity of a pending reorder.
    pub fn adjust_reorder(
        &self,
        ingredient: &str,
        quantity: u32,
    ) -> Result<IngredientId, EngineError> {
        if quantity == 0 {
            return Err(EngineError::invalid_ingredient(
                ingredient,
                IngredientIssue::ZeroQuantity,
            ));
        }
        let id = self.store.lookup(ingredient)?;
        self.reorders.set_quantity(id, quantity)?;

        let mut outbox = Outbox::default();
        outbox.log(
            ActorId::Managers,
            format!("Reorder of {ingredient} set to {quantity} units"),
        );
        self.finish(outbox);
        Ok(id)
    }

    /// Re-seeds usage counters from a snapshot saved by an earlier session.
    /// Stock levels are not restored; they come from configuration.
    pub fn restore_statistics(&self, snapshot: &Snapshot) -> usize {
        let restored = self.statistics.restore(
            snapshot
                .ingredients
                .iter()
                .map(|record| (record.name.as_str(), record.usage)),
            snapshot
                .menu_usage
                .iter()
                .map(|record| (record.name.as_str(), record.usage)),
        );
        info!(restored, "Statistics restored");
        restored
    }
}
