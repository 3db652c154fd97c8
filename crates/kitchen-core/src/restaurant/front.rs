//! Front-of-house events: billing and clearing tables.

use super::Restaurant;
use crate::error::{EngineError, EntityKind};
use crate::model::{Bill, StaffId, TableId};
use crate::notify::{ActorId, Outbox};
use crate::staff::Role;
use tracing::info;

impl Restaurant {
    /// Totals a table's bill, or one seat's, and records it as the table's payment.
    pub fn bill(&self, table_id: TableId, seat: Option<u32>) -> Result<Bill, EngineError> {
        let slot = self.table_slot(table_id)?;
        let mut table = slot.lock();
        if let Some(seat) = seat {
            if !table.has_seat(seat) {
                return Err(EngineError::unknown(
                    EntityKind::Seat,
                    format!("{table_id} seat {seat}"),
                ));
            }
        }
        let bill = table.bill(seat, &self.billing);
        drop(table);

        info!(table = %table_id, total = bill.total, "Bill produced");
        let mut outbox = Outbox::default();
        outbox.log(
            ActorId::Table(table_id),
            format!(
                "Subtotal {:.2}, tax {:.2}, tip {:.2}, total {:.2}",
                bill.subtotal, bill.tax, bill.tip, bill.total
            ),
        );
        self.finish(outbox);
        Ok(bill)
    }

    /// Clears the bill and payment and marks the table free.
    pub fn clear_table(&self, table_id: TableId, server: StaffId) -> Result<(), EngineError> {
        self.staff.require(server, Role::Server)?;
        self.table_slot(table_id)?.lock().clear();

        let mut outbox = Outbox::default();
        outbox.log(ActorId::Table(table_id), format!("Cleared by {server}"));
        self.finish(outbox);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{burger_bar, open};
    use super::*;
    use crate::pipeline::OrderRequest;

    #[test]
    fn test_bill_large_table_with_tip() {
        let (restaurant, _, _) = open(burger_bar());
        let server = StaffId(3);
        restaurant
            .place_order(&OrderRequest::new("Burger", TableId(2), 1, server))
            .unwrap();
        restaurant
            .place_order(&OrderRequest::new("Salad", TableId(2), 7, server))
            .unwrap();

        let bill = restaurant.bill(TableId(2), None).unwrap();
        assert_eq!(bill.subtotal, 14.0);
        assert_eq!(bill.tax, 1.82);
        assert_eq!(bill.tip, 2.52);
        assert_eq!(bill.total, 18.34);
        assert_eq!(restaurant.table(TableId(2)).unwrap().payment, Some(18.34));

        let seat = restaurant.bill(TableId(2), Some(7)).unwrap();
        assert_eq!(seat.lines.len(), 1);
        assert_eq!(seat.subtotal, 6.0);

        assert!(matches!(
            restaurant.bill(TableId(2), Some(9)),
            Err(EngineError::UnknownEntity {
                kind: EntityKind::Seat,
                ..
            })
        ));
    }

    #[test]
    fn test_clear_table() {
        let (restaurant, _, _) = open(burger_bar());
        restaurant
            .place_order(&OrderRequest::new("Burger", TableId(1), 1, StaffId(3)))
            .unwrap();
        restaurant.bill(TableId(1), None).unwrap();

        assert!(restaurant.clear_table(TableId(1), StaffId(1)).is_err());
        restaurant.clear_table(TableId(1), StaffId(4)).unwrap();
        let table = restaurant.table(TableId(1)).unwrap();
        assert!(!table.occupied);
        assert!(table.lines.is_empty());
        assert_eq!(table.payment, None);
        assert!(matches!(
            restaurant.clear_table(TableId(9), StaffId(4)),
            Err(EngineError::UnknownEntity {
                kind: EntityKind::Table,
                ..
            })
        ));
    }
}
