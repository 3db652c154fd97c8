//! Pending reorders derived from ingredient stock.
//!
//! The pending set is a function of the store: an ingredient below its threshold has exactly
//! one pending entry, an ingredient at or above it has none. [`ReorderManager::recompute`]
//! brings the set back in line after stock moves and reports what changed.
//!
//! Lock order: the pending set, then ingredient slots one at a time.

use crate::error::{EngineError, EntityKind};
use crate::inventory::IngredientStore;
use crate::model::IngredientId;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::info;

/// What a recompute changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderDelta {
    pub raised: Vec<IngredientId>,
    pub cleared: Vec<IngredientId>,
}

impl ReorderDelta {
    pub fn is_empty(&self) -> bool {
        self.raised.is_empty() && self.cleared.is_empty()
    }
}

pub struct ReorderManager {
    default_quantity: u32,
    pending: Mutex<BTreeMap<IngredientId, u32>>,
}

impl ReorderManager {
    pub fn new(default_quantity: u32) -> Self {
        Self {
            default_quantity,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn default_quantity(&self) -> u32 {
        self.default_quantity
    }

    /// Raises entries for ingredients below threshold and clears the rest. Idempotent.
    pub fn recompute(&self, store: &IngredientStore) -> ReorderDelta {
        let mut pending = self.pending.lock();
        let mut delta = ReorderDelta::default();
        for info in store.infos() {
            let Some(level) = store.level(info.id) else {
                continue;
            };
            let below = level.amount < info.threshold;
            if below && !pending.contains_key(&info.id) {
                pending.insert(info.id, self.default_quantity);
                info!(ingredient = %info.name, amount = level.amount, threshold = info.threshold, "Reorder raised");
                delta.raised.push(info.id);
            } else if !below && pending.remove(&info.id).is_some() {
                info!(ingredient = %info.name, amount = level.amount, "Reorder cleared");
                delta.cleared.push(info.id);
            }
        }
        delta
    }

    pub fn pending(&self) -> BTreeMap<IngredientId, u32> {
        self.pending.lock().clone()
    }

    pub fn quantity(&self, id: IngredientId) -> Option<u32> {
        self.pending.lock().get(&id).copied()
    }

    /// Overrides the quantity of a pending reorder.
    pub fn set_quantity(&self, id: IngredientId, quantity: u32) -> Result<(), EngineError> {
        match self.pending.lock().get_mut(&id) {
            Some(entry) => {
                *entry = quantity;
                Ok(())
            }
            None => Err(EngineError::unknown(EntityKind::Reorder, id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngredientConfig;
    use crate::model::Requirements;

    fn cheese_store() -> IngredientStore {
        IngredientStore::new(&[
            IngredientConfig::new("Cheese", 5, 3),
            IngredientConfig::new("Bun", 50, 10),
        ])
    }

    #[test]
    fn test_raise_and_clear() {
        let store = cheese_store();
        let reorders = ReorderManager::new(20);
        let cheese = IngredientId(1);
        assert!(reorders.recompute(&store).is_empty());

        let three: Requirements = std::iter::once((cheese, 3)).collect();
        store.reserve(&three).unwrap();
        store.commit(&three).unwrap();

        let delta = reorders.recompute(&store);
        assert_eq!(delta.raised, vec![cheese]);
        assert_eq!(reorders.pending(), BTreeMap::from([(cheese, 20)]));

        // Idempotent while nothing moves.
        assert!(reorders.recompute(&store).is_empty());

        store.restock(cheese, 10).unwrap();
        let delta = reorders.recompute(&store);
        assert_eq!(delta.cleared, vec![cheese]);
        assert!(reorders.pending().is_empty());
    }

    #[test]
    fn test_set_quantity_requires_pending() {
        let store = cheese_store();
        let reorders = ReorderManager::new(20);
        assert!(matches!(
            reorders.set_quantity(IngredientId(1), 40),
            Err(EngineError::UnknownEntity {
                kind: EntityKind::Reorder,
                ..
            })
        ));

        let all: Requirements = std::iter::once((IngredientId(1), 5)).collect();
        store.reserve(&all).unwrap();
        reorders.recompute(&store);
        reorders.set_quantity(IngredientId(1), 40).unwrap();
        assert_eq!(reorders.quantity(IngredientId(1)), Some(40));
        // A recompute does not reset an overridden quantity.
        reorders.recompute(&store);
        assert_eq!(reorders.quantity(IngredientId(1)), Some(40));
    }
}
