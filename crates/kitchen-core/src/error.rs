//! Error types for the kitchen engine and its configuration.

use crate::model::{OrderId, OrderState, StaffId};
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Why an ingredient reference was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IngredientIssue {
    /// No ingredient with that name or id exists.
    Unknown,
    /// Requested as an addition but the ingredient cannot be added to dishes.
    NotAddable,
    /// A zero quantity where a positive one is required.
    ZeroQuantity,
    /// The quantity would overflow the ingredient's counters.
    Overflow,
}

impl Display for IngredientIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngredientIssue::Unknown => write!(f, "unknown ingredient"),
            IngredientIssue::NotAddable => write!(f, "cannot be added"),
            IngredientIssue::ZeroQuantity => write!(f, "quantity must be positive"),
            IngredientIssue::Overflow => write!(f, "quantity too large"),
        }
    }
}

/// The kind of entity an [`EngineError::UnknownEntity`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Order,
    Table,
    Seat,
    Staff,
    MenuItem,
    Reorder,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityKind::Order => "order",
            EntityKind::Table => "table",
            EntityKind::Seat => "seat",
            EntityKind::Staff => "staff member",
            EntityKind::MenuItem => "menu item",
            EntityKind::Reorder => "pending reorder",
        };
        f.write_str(s)
    }
}

/// Errors raised while applying an event.
///
/// Every variant is recovered at the event boundary: the event is rejected, nothing it touched
/// changes (except the documented cook-time cancellation) and the pipeline keeps running.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// A recipe, addition, subtraction or shipment referenced a bad ingredient.
    #[error("Invalid ingredient {name}: {issue}")]
    InvalidIngredient { name: String, issue: IngredientIssue },

    /// A reservation or commit found less stock than required.
    #[error("Insufficient stock of {ingredient}: requested {requested}, available {available}")]
    InsufficientStock {
        ingredient: String,
        requested: u32,
        available: u32,
    },

    /// The order's current state does not allow the action.
    #[error("Cannot {action} {order} while it is {state}")]
    IllegalTransition {
        order: OrderId,
        state: OrderState,
        action: &'static str,
    },

    /// The acting staff member is not the one the order is assigned to.
    #[error("{order} is assigned to {expected:?}, not {actual}")]
    AssignmentMismatch {
        order: OrderId,
        expected: Option<StaffId>,
        actual: StaffId,
    },

    /// A referenced order, table, seat, staff member or menu item does not exist.
    #[error("Unknown {kind}: {id}")]
    UnknownEntity { kind: EntityKind, id: String },
}

impl EngineError {
    pub(crate) fn unknown(kind: EntityKind, id: impl Display) -> Self {
        EngineError::UnknownEntity {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid_ingredient(name: impl Into<String>, issue: IngredientIssue) -> Self {
        EngineError::InvalidIngredient {
            name: name.into(),
            issue,
        }
    }
}

/// Errors raised while loading or validating a [`RestaurantConfig`](crate::config::RestaurantConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Empty {0} name")]
    EmptyName(&'static str),

    #[error("Duplicate ingredient: {0}")]
    DuplicateIngredient(String),

    #[error("Duplicate menu item: {0}")]
    DuplicateMenuItem(String),

    #[error("Duplicate staff member: {0}")]
    DuplicateStaff(String),

    #[error("Menu item {item} uses unknown ingredient {ingredient}")]
    UnknownRecipeIngredient { item: String, ingredient: String },

    /// Tables are numbered from 1.
    #[error("Table {0} has no seats")]
    EmptyTable(usize),

    #[error("Invalid billing policy: {0}")]
    InvalidBilling(String),

    #[error("Config source failed: {0}")]
    Source(String),
}
