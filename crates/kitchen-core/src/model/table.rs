use crate::config::BillingPolicy;
use crate::model::{OrderId, TableId};
use serde::{Deserialize, Serialize};

/// One order on a seat's bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub order: OrderId,
    pub seat: u32,
    pub item: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub seats: u32,
    pub lines: Vec<BillLine>,
    pub occupied: bool,
    /// Total of the last bill produced for this table.
    pub payment: Option<f64>,
}

/// A computed bill for a whole table or a single seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub table: TableId,
    pub seat: Option<u32>,
    pub lines: Vec<BillLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub tip: f64,
    pub total: f64,
}

fn cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl Table {
    pub fn new(id: TableId, seats: u32) -> Self {
        Self {
            id,
            seats,
            lines: Vec::new(),
            occupied: false,
            payment: None,
        }
    }

    /// Seats are numbered from 1.
    pub fn has_seat(&self, seat: u32) -> bool {
        (1..=self.seats).contains(&seat)
    }

    pub fn add_line(&mut self, line: BillLine) {
        self.occupied = true;
        self.lines.push(line);
    }

    /// Removes an order from the bill. Returns false if it was not on it.
    pub fn remove_order(&mut self, order: OrderId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.order != order);
        self.lines.len() != before
    }

    /// Builds the bill for the table (or one seat) and records its total as the payment.
    ///
    /// The automatic tip applies when the table itself is large enough, whether or not the
    /// bill is split by seat.
    pub fn bill(&mut self, seat: Option<u32>, policy: &BillingPolicy) -> Bill {
        let lines: Vec<BillLine> = self
            .lines
            .iter()
            .filter(|line| seat.map_or(true, |s| line.seat == s))
            .cloned()
            .collect();
        let subtotal = cents(lines.iter().map(|line| line.price).sum());
        let tax = cents(subtotal * policy.tax_rate);
        let tip = if self.seats >= policy.tip_min_seats {
            cents(subtotal * policy.tip_rate)
        } else {
            0.0
        };
        let total = cents(subtotal + tax + tip);
        self.payment = Some(total);
        Bill {
            table: self.id,
            seat,
            lines,
            subtotal,
            tax,
            tip,
            total,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.payment = None;
        self.occupied = false;
    }
}
