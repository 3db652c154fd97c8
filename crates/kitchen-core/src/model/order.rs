//! The order entity and its state machine guards.
//!
//! Guards only inspect and mutate the [`Order`] itself. Side effects on shared state
//! (stock, tables, staff) are performed by the [`Restaurant`](crate::restaurant::Restaurant)
//! while it holds the order's lock, so a guard that fails leaves everything untouched.

use crate::error::EngineError;
use crate::model::{IngredientId, OrderId, Requirements, StaffId, TableId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Lifecycle states. The discriminants are ordinals: "at least RECEIVED" is `state >= Received`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum OrderState {
    Ordered = 0,
    Received = 2,
    Cooked = 3,
    Delivered = 4,
    Cancelled = 5,
}

impl OrderState {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Delivered and cancelled orders never change again.
    pub fn is_final(self) -> bool {
        matches!(self, OrderState::Delivered | OrderState::Cancelled)
    }
}

impl Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderState::Ordered => "ORDERED",
            OrderState::Received => "RECEIVED",
            OrderState::Cooked => "COOKED",
            OrderState::Delivered => "DELIVERED",
            OrderState::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelReason {
    OutOfIngredients,
    CustomerCancelled,
    CustomerReturned,
}

impl Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CancelReason::OutOfIngredients => "Missing Ingredients",
            CancelReason::CustomerCancelled => "Customer cancelled the order",
            CancelReason::CustomerReturned => "Customer returned the order",
        };
        f.write_str(s)
    }
}

/// What happened to the stock an order reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Held,
    Committed,
    Released,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub item: String,
    pub additions: BTreeMap<IngredientId, u32>,
    pub subtractions: BTreeMap<IngredientId, u32>,
    pub table: TableId,
    pub seat: u32,
    pub cook: Option<StaffId>,
    pub server: StaffId,
    pub state: OrderState,
    /// Effective requirement set, reserved at placement.
    pub requirements: Requirements,
    pub reservation: ReservationStatus,
    pub price: f64,
    pub cancel_reason: Option<CancelReason>,
    pub description: Option<String>,
    /// Set on the replacement created by a return.
    pub replaces: Option<OrderId>,
}

impl Order {
    /// A freshly placed order whose requirements are already reserved.
    #[allow(clippy::too_many_arguments)]
    pub fn placed(
        id: OrderId,
        item: impl Into<String>,
        additions: BTreeMap<IngredientId, u32>,
        subtractions: BTreeMap<IngredientId, u32>,
        table: TableId,
        seat: u32,
        server: StaffId,
        requirements: Requirements,
        price: f64,
    ) -> Self {
        Self {
            id,
            item: item.into(),
            additions,
            subtractions,
            table,
            seat,
            cook: None,
            server,
            state: OrderState::Ordered,
            requirements,
            reservation: ReservationStatus::Held,
            price,
            cancel_reason: None,
            description: None,
            replaces: None,
        }
    }

    /// The replacement placed when a delivered order is returned.
    pub fn replacement(&self, id: OrderId) -> Self {
        let mut order = Self::placed(
            id,
            self.item.clone(),
            self.additions.clone(),
            self.subtractions.clone(),
            self.table,
            self.seat,
            self.server,
            self.requirements.clone(),
            self.price,
        );
        order.replaces = Some(self.id);
        order
    }

    fn illegal(&self, action: &'static str) -> EngineError {
        EngineError::IllegalTransition {
            order: self.id,
            state: self.state,
            action,
        }
    }

    fn ensure_cook(&self, cook: StaffId) -> Result<(), EngineError> {
        match self.cook {
            Some(assigned) if assigned == cook => Ok(()),
            expected => Err(EngineError::AssignmentMismatch {
                order: self.id,
                expected,
                actual: cook,
            }),
        }
    }

    /// Assigns a cook to an ORDERED order. Re-dispatching to the same cook is a no-op.
    pub fn dispatch(&mut self, cook: StaffId) -> Result<(), EngineError> {
        if let Some(assigned) = self.cook {
            if assigned != cook {
                return Err(EngineError::AssignmentMismatch {
                    order: self.id,
                    expected: Some(assigned),
                    actual: cook,
                });
            }
        }
        if self.state != OrderState::Ordered {
            return Err(self.illegal("dispatch"));
        }
        self.cook = Some(cook);
        Ok(())
    }

    /// ORDERED -> RECEIVED.
    ///
    /// A dispatched order may only be received by its assigned cook. Claiming an undispatched
    /// order is a fallback for callers that never send `Dispatch`: the receiving cook becomes
    /// the assignee.
    pub fn receive(&mut self, cook: StaffId) -> Result<(), EngineError> {
        if self.cook.is_some() {
            self.ensure_cook(cook)?;
        }
        if self.state >= OrderState::Received {
            return Err(self.illegal("receive"));
        }
        self.cook = Some(cook);
        self.state = OrderState::Received;
        Ok(())
    }

    /// Checks that `cook` may cook this order now. The transition itself happens after commit.
    pub fn ensure_cookable(&self, cook: StaffId) -> Result<(), EngineError> {
        self.ensure_cook(cook)?;
        if self.state != OrderState::Received {
            return Err(self.illegal("cook"));
        }
        Ok(())
    }

    /// RECEIVED -> COOKED, after the reservation was committed.
    pub fn mark_cooked(&mut self) {
        self.state = OrderState::Cooked;
        self.reservation = ReservationStatus::Committed;
    }

    /// COOKED -> DELIVERED, only by the order's own server.
    pub fn deliver(&mut self, server: StaffId) -> Result<(), EngineError> {
        if self.server != server {
            return Err(EngineError::AssignmentMismatch {
                order: self.id,
                expected: Some(self.server),
                actual: server,
            });
        }
        if self.state != OrderState::Cooked {
            return Err(self.illegal("deliver"));
        }
        self.state = OrderState::Delivered;
        Ok(())
    }

    pub fn ensure_cancellable(&self) -> Result<(), EngineError> {
        if self.state >= OrderState::Delivered {
            return Err(self.illegal("cancel"));
        }
        Ok(())
    }

    pub fn ensure_returnable(&self) -> Result<(), EngineError> {
        if self.state != OrderState::Delivered {
            return Err(self.illegal("return"));
        }
        Ok(())
    }

    /// Moves the order to CANCELLED and returns the cook it was assigned to, if any.
    ///
    /// The caller releases a held reservation before calling this.
    pub fn mark_cancelled(
        &mut self,
        reason: CancelReason,
        description: Option<String>,
    ) -> Option<StaffId> {
        if self.reservation == ReservationStatus::Held {
            self.reservation = ReservationStatus::Released;
        }
        self.state = OrderState::Cancelled;
        self.cancel_reason = Some(reason);
        self.description = description;
        self.cook.take()
    }
}
