//! # Ingredient Store
//!
//! Per-ingredient stock with all-or-nothing transactions over sets of ingredients.
//!
//! ## Locking
//!
//! Every ingredient slot sits behind its own mutex. A transaction locks the slots of its
//! [`Requirements`] in ascending id order, checks every slot, and only then applies the change.
//! Because all transactions take their locks in the same order they cannot deadlock, and two
//! orders with disjoint ingredients never contend.
//!
//! ## Conservation
//!
//! For every slot, `amount + reserved + consumed == received` holds whenever its lock is free,
//! where `received` is the initial stock plus every shipment.

use crate::config::IngredientConfig;
use crate::error::{EngineError, IngredientIssue};
use crate::model::{IngredientId, Requirements};
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// The immutable description of an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientInfo {
    pub id: IngredientId,
    pub name: String,
    pub price: f64,
    pub threshold: u32,
    pub addable: bool,
}

/// The mutable counters of an ingredient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Unreserved, on hand.
    pub amount: u32,
    pub reserved: u32,
    pub consumed: u32,
    /// Initial stock plus every shipment.
    pub received: u32,
}

impl StockLevel {
    fn initial(amount: u32) -> Self {
        Self {
            amount,
            reserved: 0,
            consumed: 0,
            received: amount,
        }
    }

    pub fn is_conserved(&self) -> bool {
        self.amount as u64 + self.reserved as u64 + self.consumed as u64 == self.received as u64
    }
}

struct Slot {
    info: IngredientInfo,
    stock: Mutex<StockLevel>,
}

type Locked<'a> = Vec<(&'a IngredientInfo, MutexGuard<'a, StockLevel>, u32)>;

pub struct IngredientStore {
    slots: Vec<Slot>,
    index: HashMap<String, IngredientId>,
}

impl IngredientStore {
    /// Builds the store from configuration. Ids are assigned 1-based in the given order.
    pub fn new<'a>(ingredients: impl IntoIterator<Item = &'a IngredientConfig>) -> Self {
        let slots: Vec<Slot> = ingredients
            .into_iter()
            .enumerate()
            .map(|(i, config)| Slot {
                info: IngredientInfo {
                    id: IngredientId(i as u32 + 1),
                    name: config.name.clone(),
                    price: config.price,
                    threshold: config.threshold,
                    addable: config.addable,
                },
                stock: Mutex::new(StockLevel::initial(config.initial_amount)),
            })
            .collect();
        let index = slots
            .iter()
            .map(|slot| (slot.info.name.clone(), slot.info.id))
            .collect();
        Self { slots, index }
    }

    fn slot(&self, id: IngredientId) -> Option<&Slot> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.slots.get(index))
    }

    /// Resolves a display name.
    pub fn lookup(&self, name: &str) -> Result<IngredientId, EngineError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::invalid_ingredient(name, IngredientIssue::Unknown))
    }

    pub fn info(&self, id: IngredientId) -> Option<&IngredientInfo> {
        self.slot(id).map(|slot| &slot.info)
    }

    pub fn infos(&self) -> impl Iterator<Item = &IngredientInfo> {
        self.slots.iter().map(|slot| &slot.info)
    }

    pub fn name(&self, id: IngredientId) -> Option<&str> {
        self.info(id).map(|info| info.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn level(&self, id: IngredientId) -> Option<StockLevel> {
        self.slot(id).map(|slot| *slot.stock.lock())
    }

    /// Every slot's counters. Each slot is read under its own lock.
    pub fn levels(&self) -> Vec<(IngredientId, StockLevel)> {
        self.slots
            .iter()
            .map(|slot| (slot.info.id, *slot.stock.lock()))
            .collect()
    }

    /// Locks the slots of `requirements` in ascending id order.
    fn lock(&self, requirements: &Requirements) -> Result<Locked<'_>, EngineError> {
        // Resolve every id before taking any lock.
        let slots = requirements
            .iter()
            .map(|(id, qty)| {
                self.slot(id)
                    .map(|slot| (slot, qty))
                    .ok_or_else(|| EngineError::invalid_ingredient(id.to_string(), IngredientIssue::Unknown))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(slots
            .into_iter()
            .map(|(slot, qty)| (&slot.info, slot.stock.lock(), qty))
            .collect())
    }

    /// Moves `requirements` from `amount` to `reserved`, for every ingredient or none.
    pub fn reserve(&self, requirements: &Requirements) -> Result<(), EngineError> {
        let mut locked = self.lock(requirements)?;
        for (info, stock, qty) in &locked {
            if stock.amount < *qty {
                return Err(EngineError::InsufficientStock {
                    ingredient: info.name.clone(),
                    requested: *qty,
                    available: stock.amount,
                });
            }
        }
        for (info, stock, qty) in &mut locked {
            stock.amount -= *qty;
            stock.reserved += *qty;
            debug!(ingredient = %info.name, qty = *qty, amount = stock.amount, "Reserved");
        }
        Ok(())
    }

    /// Moves `requirements` from `reserved` to `consumed`.
    pub fn commit(&self, requirements: &Requirements) -> Result<(), EngineError> {
        self.commit_with(requirements, || ())
    }

    /// Like [`commit`](Self::commit), running `f` while the ingredient locks are still held.
    ///
    /// `f` runs only if the commit succeeds. It must not touch the store.
    pub fn commit_with<R>(
        &self,
        requirements: &Requirements,
        f: impl FnOnce() -> R,
    ) -> Result<R, EngineError> {
        let mut locked = self.lock(requirements)?;
        for (info, stock, qty) in &locked {
            if stock.reserved < *qty {
                return Err(EngineError::InsufficientStock {
                    ingredient: info.name.clone(),
                    requested: *qty,
                    available: stock.reserved,
                });
            }
        }
        for (info, stock, qty) in &mut locked {
            stock.reserved -= *qty;
            stock.consumed += *qty;
            debug!(ingredient = %info.name, qty = *qty, "Consumed");
        }
        Ok(f())
    }

    /// Returns reserved stock to `amount`.
    pub fn release(&self, requirements: &Requirements) -> Result<(), EngineError> {
        let mut locked = self.lock(requirements)?;
        for (info, stock, qty) in &locked {
            if stock.reserved < *qty {
                return Err(EngineError::InsufficientStock {
                    ingredient: info.name.clone(),
                    requested: *qty,
                    available: stock.reserved,
                });
            }
        }
        for (_, stock, qty) in &mut locked {
            stock.reserved -= *qty;
            stock.amount += *qty;
        }
        Ok(())
    }

    /// Returns up to `requirements` of reserved stock to `amount`, slot by slot.
    ///
    /// Unlike [`release`](Self::release) this never fails on a short slot; it hands back
    /// whatever part of the hold is still reserved. Returns the number of units released.
    pub fn release_held(&self, requirements: &Requirements) -> Result<u32, EngineError> {
        let mut locked = self.lock(requirements)?;
        let mut released = 0;
        for (info, stock, qty) in &mut locked {
            let back = (*qty).min(stock.reserved);
            if back < *qty {
                debug!(ingredient = %info.name, wanted = *qty, held = back, "Partial hold");
            }
            stock.reserved -= back;
            stock.amount += back;
            released += back;
        }
        Ok(released)
    }

    pub fn restock(&self, id: IngredientId, qty: u32) -> Result<(), EngineError> {
        self.restock_all(&std::iter::once((id, qty)).collect())
    }

    /// Adds every shipment line, or none if an id is unknown or a counter would overflow.
    pub fn restock_all(&self, shipment: &Requirements) -> Result<(), EngineError> {
        let mut locked = self.lock(shipment)?;
        for (info, stock, qty) in &locked {
            if stock.received.checked_add(*qty).is_none() {
                return Err(EngineError::invalid_ingredient(
                    info.name.clone(),
                    IngredientIssue::Overflow,
                ));
            }
        }
        for (info, stock, qty) in &mut locked {
            stock.amount += *qty;
            stock.received += *qty;
            debug!(ingredient = %info.name, qty = *qty, amount = stock.amount, "Restocked");
        }
        Ok(())
    }
}
