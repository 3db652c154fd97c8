//! # Event Pipeline
//!
//! Applies typed [`Event`]s to a [`Restaurant`], one handler per variant.
//!
//! ## Structure
//!
//! - [`events`] - the event records and [`EventOutcome`]
//! - [`actor`] - [`EventPipeline`], the mailbox handler that applies events in arrival order
//! - [`Restaurant::apply`] and [`replay`] - the synchronous entry points
//!
//! ## Modes
//!
//! The same [`Restaurant::apply`] backs every mode, so there is no behavioural difference
//! between them beyond interleaving:
//!
//! ```rust
//! use kitchen_core::config::{IngredientConfig, MenuItemConfig, RestaurantConfig, StaffConfig, TableLayout};
//! use kitchen_core::model::{StaffId, TableId};
//! use kitchen_core::pipeline::{replay, Event, OrderRequest};
//! use kitchen_core::restaurant::Restaurant;
//!
//! let config = RestaurantConfig {
//!     ingredients: vec![IngredientConfig::new("Bread", 4, 0)],
//!     menu: vec![MenuItemConfig::new("Toast", 2.0, [("Bread", 2)])],
//!     tables: TableLayout { seat_counts: vec![2] },
//!     staff: StaffConfig { servers: vec!["Sam".into()], ..StaffConfig::default() },
//!     ..RestaurantConfig::default()
//! };
//! let restaurant = Restaurant::builder(config).build().unwrap();
//!
//! let toast = || Event::Order(OrderRequest::new("Toast", TableId(1), 1, StaffId(1)));
//! let report = replay(&restaurant, vec![toast(), toast(), toast()]);
//!
//! assert_eq!(report.applied, 2);
//! assert_eq!(report.rejected.len(), 1);
//! assert_eq!(report.rejected[0].0, 2);
//! ```

pub mod actor;
pub mod events;

pub use actor::*;
pub use events::*;

use crate::error::EngineError;
use crate::restaurant::Restaurant;
use tracing::{debug, info_span, warn};

impl Restaurant {
    /// Applies one event as its own transaction.
    pub fn apply(&self, event: Event) -> Result<EventOutcome, EngineError> {
        let span = info_span!("event", kind = event.kind());
        let _enter = span.enter();
        debug!(?event, "Applying");

        let outcome = match event {
            Event::Order(request) => self.place_order(&request).map(EventOutcome::Placed),
            Event::Dispatch(DispatchRequest { order, cook }) => self
                .dispatch(order, cook)
                .map(|()| EventOutcome::Dispatched(order)),
            Event::Receive(ReceiveRequest { order, cook }) => self
                .receive(order, cook)
                .map(|()| EventOutcome::Received(order)),
            Event::Cook(CookRequest { order, cook }) => self
                .cook(order, cook)
                .map(|()| EventOutcome::Cooked(order)),
            Event::Deliver(DeliverRequest { order, server }) => self
                .deliver(order, server)
                .map(|()| EventOutcome::Delivered(order)),
            Event::Cancel(CancelRequest {
                order,
                reason,
                description,
            }) => self
                .cancel(order, reason, description)
                .map(|()| EventOutcome::Cancelled(order)),
            Event::Return(ReturnRequest { order, description }) => self
                .return_order(order, description)
                .map(|replacement| EventOutcome::Returned {
                    original: order,
                    replacement,
                }),
            Event::Shipment(ShipmentRequest { items }) => {
                self.receive_shipment(&items).map(EventOutcome::Restocked)
            }
            Event::GetBill(BillRequest { table, seat }) => {
                self.bill(table, seat).map(EventOutcome::Billed)
            }
            Event::ClearTable(ClearTableRequest { table, server }) => self
                .clear_table(table, server)
                .map(|()| EventOutcome::Cleared(table)),
            Event::AdjustReorder(AdjustReorderRequest {
                ingredient,
                quantity,
            }) => self
                .adjust_reorder(&ingredient, quantity)
                .map(|ingredient| EventOutcome::ReorderAdjusted {
                    ingredient,
                    quantity,
                }),
        };

        if let Err(err) = &outcome {
            warn!(error = %err, "Event rejected");
        }
        outcome
    }
}

/// The result of a batch [`replay`].
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub applied: usize,
    pub outcomes: Vec<EventOutcome>,
    /// Position in the log and the reason, for every rejected event.
    pub rejected: Vec<(usize, EngineError)>,
}

/// Applies a serialized event log in order. A rejected event is recorded and skipped.
pub fn replay(restaurant: &Restaurant, events: impl IntoIterator<Item = Event>) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (position, event) in events.into_iter().enumerate() {
        match restaurant.apply(event) {
            Ok(outcome) => {
                report.applied += 1;
                report.outcomes.push(outcome);
            }
            Err(err) => report.rejected.push((position, err)),
        }
    }
    report
}
