//! Order lifecycle events: place, dispatch, receive, cook, deliver, cancel and return.

use super::Restaurant;
use crate::error::{EngineError, EntityKind, IngredientIssue};
use crate::model::{CancelReason, Order, OrderId, Requirements, ReservationStatus, StaffId};
use crate::notify::{ActorId, Outbox};
use crate::pipeline::OrderRequest;
use crate::staff::Role;
use tracing::{info, warn};

impl Restaurant {
    /// Validates the request, reserves its ingredients and files a new ORDERED order.
    ///
    /// Nothing is created unless the whole reservation succeeds.
    pub fn place_order(&self, request: &OrderRequest) -> Result<OrderId, EngineError> {
        self.staff.require(request.server, Role::Server)?;
        let seats = self.table_slot(request.table)?.lock().seats;
        if !(1..=seats).contains(&request.seat) {
            return Err(EngineError::unknown(
                EntityKind::Seat,
                format!("{} seat {}", request.table, request.seat),
            ));
        }
        let item = self
            .menu
            .lookup(&request.item)
            .ok_or_else(|| EngineError::unknown(EntityKind::MenuItem, &request.item))?;

        let recipe = self.resolve(&item.recipe)?;
        let additions = self.resolve(&request.additions)?;
        let subtractions = self.resolve(&request.subtractions)?;

        let mut price = item.base_price;
        for (id, qty) in &additions {
            let Some(info) = self.store.info(*id) else {
                continue;
            };
            if !info.addable {
                return Err(EngineError::invalid_ingredient(
                    info.name.clone(),
                    IngredientIssue::NotAddable,
                ));
            }
            price += info.price * f64::from(*qty);
        }

        let requirements = Requirements::effective(&recipe, &additions, &subtractions);
        self.store.reserve(&requirements)?;

        let id = self.file_order(|id| {
            Order::placed(
                id,
                item.name.clone(),
                additions,
                subtractions,
                request.table,
                request.seat,
                request.server,
                requirements,
                price,
            )
        });
        info!(order = %id, item = %item.name, table = %request.table, seat = request.seat, "Order placed");

        let mut outbox = Outbox::default();
        outbox.log(
            ActorId::Staff(request.server),
            format!(
                "{id}: {} for {} seat {} placed",
                item.name, request.table, request.seat
            ),
        );
        outbox.log(ActorId::Kitchen, format!("New order {id}: {}", item.name));
        self.recompute_reorders(&mut outbox);
        self.finish(outbox);
        Ok(id)
    }

    /// Assigns a cook to an order that has not been received yet.
    pub fn dispatch(&self, order_id: OrderId, cook: StaffId) -> Result<(), EngineError> {
        self.staff.require(cook, Role::Cook)?;
        let handle = self.order_handle(order_id)?;
        let mut order = handle.lock();
        order.dispatch(cook)?;
        let item = order.item.clone();
        drop(order);

        let mut outbox = Outbox::default();
        outbox.log(ActorId::Staff(cook), format!("{order_id} assigned to you: {item}"));
        self.finish(outbox);
        Ok(())
    }

    /// ORDERED -> RECEIVED by the assigned cook.
    ///
    /// Without a prior [`dispatch`](Self::dispatch) the first cook to receive claims the order.
    pub fn receive(&self, order_id: OrderId, cook: StaffId) -> Result<(), EngineError> {
        self.staff.require(cook, Role::Cook)?;
        let handle = self.order_handle(order_id)?;
        let mut order = handle.lock();
        order.receive(cook)?;
        self.staff.assign(cook, order_id);
        let server = order.server;
        drop(order);

        info!(order = %order_id, cook = %cook, "Order received");
        let mut outbox = Outbox::default();
        outbox.log(ActorId::Staff(server), format!("{order_id} received by {cook}"));
        self.finish(outbox);
        Ok(())
    }

    /// RECEIVED -> COOKED, consuming the reservation and counting usage.
    ///
    /// If the reservation cannot be committed the order is cancelled as out of ingredients,
    /// its cook and server are alerted, and `InsufficientStock` is returned.
    pub fn cook(&self, order_id: OrderId, cook: StaffId) -> Result<(), EngineError> {
        self.staff.require(cook, Role::Cook)?;
        let handle = self.order_handle(order_id)?;
        let mut order = handle.lock();
        order.ensure_cookable(cook)?;

        let item = order.item.clone();
        let consumed: Vec<(&str, u32)> = order
            .requirements
            .iter()
            .filter_map(|(id, qty)| self.store.name(id).map(|name| (name, qty)))
            .collect();
        let committed = self.store.commit_with(&order.requirements, || {
            self.statistics.record_consumption(&item, consumed)
        });

        let mut outbox = Outbox::default();
        let server = order.server;
        let result = match committed {
            Ok(()) => {
                order.mark_cooked();
                self.staff.free(cook, order_id);
                self.staff.assign(server, order_id);
                outbox.log(
                    ActorId::Staff(server),
                    format!(
                        "{order_id} ({item}) ready for {} seat {}",
                        order.table, order.seat
                    ),
                );
                info!(order = %order_id, cook = %cook, "Order cooked");
                Ok(())
            }
            Err(err) => {
                warn!(order = %order_id, error = %err, "Cannot cook, cancelling");
                self.cancel_locked(&mut order, CancelReason::OutOfIngredients, None, &mut outbox);
                let message = format!("{order_id} ({item}) cancelled: {err}");
                outbox.alert(ActorId::Staff(cook), message.clone());
                outbox.alert(ActorId::Staff(server), message);
                Err(err)
            }
        };
        drop(order);

        self.recompute_reorders(&mut outbox);
        self.finish(outbox);
        result
    }

    /// COOKED -> DELIVERED by the order's own server.
    pub fn deliver(&self, order_id: OrderId, server: StaffId) -> Result<(), EngineError> {
        self.staff.require(server, Role::Server)?;
        let handle = self.order_handle(order_id)?;
        let mut order = handle.lock();
        order.deliver(server)?;
        self.staff.free(server, order_id);
        let (table, seat) = (order.table, order.seat);
        drop(order);

        info!(order = %order_id, server = %server, "Order delivered");
        let mut outbox = Outbox::default();
        outbox.log(ActorId::Table(table), format!("{order_id} delivered to seat {seat}"));
        self.finish(outbox);
        Ok(())
    }

    /// Cancels an order that has not been delivered.
    pub fn cancel(
        &self,
        order_id: OrderId,
        reason: CancelReason,
        description: Option<String>,
    ) -> Result<(), EngineError> {
        let handle = self.order_handle(order_id)?;
        let mut order = handle.lock();
        order.ensure_cancellable()?;

        let mut outbox = Outbox::default();
        if let Some(cook) = self.cancel_locked(&mut order, reason, description, &mut outbox) {
            outbox.alert(ActorId::Staff(cook), format!("{order_id} cancelled: {reason}"));
        }
        drop(order);

        self.recompute_reorders(&mut outbox);
        self.finish(outbox);
        Ok(())
    }

    /// Cancels a delivered order and places an identical replacement with a fresh id.
    ///
    /// The replacement's ingredients are reserved first; if that fails the delivered order is
    /// left as it was.
    pub fn return_order(
        &self,
        order_id: OrderId,
        description: Option<String>,
    ) -> Result<OrderId, EngineError> {
        let handle = self.order_handle(order_id)?;
        let mut order = handle.lock();
        order.ensure_returnable()?;
        self.store.reserve(&order.requirements)?;

        let mut outbox = Outbox::default();
        self.cancel_locked(
            &mut order,
            CancelReason::CustomerReturned,
            description,
            &mut outbox,
        );
        let replacement = self.file_order(|id| order.replacement(id));
        let (server, item) = (order.server, order.item.clone());
        drop(order);

        info!(order = %order_id, replacement = %replacement, "Order returned");
        outbox.log(
            ActorId::Staff(server),
            format!("{order_id} returned; replaced by {replacement}"),
        );
        outbox.log(ActorId::Kitchen, format!("New order {replacement}: {item}"));
        self.recompute_reorders(&mut outbox);
        self.finish(outbox);
        Ok(replacement)
    }

    /// Applies a cancellation to a locked order: releases a held reservation, frees its cook and
    /// server, and takes it off the table's bill. Returns the cook it was assigned to.
    fn cancel_locked(
        &self,
        order: &mut Order,
        reason: CancelReason,
        description: Option<String>,
        outbox: &mut Outbox,
    ) -> Option<StaffId> {
        let id = order.id;
        let mut still_held = false;
        if order.reservation == ReservationStatus::Held {
            // A failed commit can leave the hold partly drained; return whatever remains.
            if let Err(err) = self.store.release_held(&order.requirements) {
                warn!(order = %id, error = %err, "Reservation could not be released");
                still_held = true;
            }
        }
        let cook = order.mark_cancelled(reason, description);
        if still_held {
            order.reservation = ReservationStatus::Held;
        }
        if let Some(cook) = cook {
            self.staff.free(cook, id);
        }
        self.staff.free(order.server, id);
        if let Ok(table) = self.table_slot(order.table) {
            table.lock().remove_order(id);
        }

        info!(order = %id, %reason, "Order cancelled");
        outbox.log(ActorId::Staff(order.server), format!("{id} cancelled: {reason}"));
        cook
    }
}
