//! Typed event records.
//!
//! Events arrive already parsed; turning text or UI input into these records is the job of
//! whoever produces them. Every record is `serde`-derivable so a log of them can be stored and
//! replayed.

use crate::model::{Bill, CancelReason, IngredientId, OrderId, StaffId, TableId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub item: String,
    #[serde(default)]
    pub additions: BTreeMap<String, u32>,
    #[serde(default)]
    pub subtractions: BTreeMap<String, u32>,
    pub table: TableId,
    pub seat: u32,
    pub server: StaffId,
}

impl OrderRequest {
    pub fn new(item: impl Into<String>, table: TableId, seat: u32, server: StaffId) -> Self {
        Self {
            item: item.into(),
            additions: BTreeMap::new(),
            subtractions: BTreeMap::new(),
            table,
            seat,
            server,
        }
    }

    /// Extra units of an addable ingredient.
    pub fn add(mut self, ingredient: impl Into<String>, qty: u32) -> Self {
        *self.additions.entry(ingredient.into()).or_insert(0) += qty;
        self
    }

    /// Fewer units of a recipe ingredient.
    pub fn remove(mut self, ingredient: impl Into<String>, qty: u32) -> Self {
        *self.subtractions.entry(ingredient.into()).or_insert(0) += qty;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub order: OrderId,
    pub cook: StaffId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveRequest {
    pub order: OrderId,
    pub cook: StaffId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookRequest {
    pub order: OrderId,
    pub cook: StaffId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverRequest {
    pub order: OrderId,
    pub server: StaffId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub order: OrderId,
    pub reason: CancelReason,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub order: OrderId,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Ingredient display name to quantity received.
    pub items: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRequest {
    pub table: TableId,
    #[serde(default)]
    pub seat: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearTableRequest {
    pub table: TableId,
    pub server: StaffId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustReorderRequest {
    pub ingredient: String,
    pub quantity: u32,
}

/// One event, consumed by exactly one handler per variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Order(OrderRequest),
    Dispatch(DispatchRequest),
    Receive(ReceiveRequest),
    Cook(CookRequest),
    Deliver(DeliverRequest),
    Cancel(CancelRequest),
    Return(ReturnRequest),
    Shipment(ShipmentRequest),
    GetBill(BillRequest),
    ClearTable(ClearTableRequest),
    AdjustReorder(AdjustReorderRequest),
}

impl Event {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Order(_) => "order",
            Event::Dispatch(_) => "dispatch",
            Event::Receive(_) => "receive",
            Event::Cook(_) => "cook",
            Event::Deliver(_) => "deliver",
            Event::Cancel(_) => "cancel",
            Event::Return(_) => "return",
            Event::Shipment(_) => "shipment",
            Event::GetBill(_) => "get_bill",
            Event::ClearTable(_) => "clear_table",
            Event::AdjustReorder(_) => "adjust_reorder",
        }
    }
}

/// What an accepted event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Placed(OrderId),
    Dispatched(OrderId),
    Received(OrderId),
    Cooked(OrderId),
    Delivered(OrderId),
    Cancelled(OrderId),
    Returned {
        original: OrderId,
        replacement: OrderId,
    },
    /// Number of ingredients restocked.
    Restocked(usize),
    Billed(Bill),
    Cleared(TableId),
    ReorderAdjusted {
        ingredient: IngredientId,
        quantity: u32,
    },
}
