use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::atomic::{AtomicU32, Ordering};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Type-safe identifier for Ingredients. Assigned 1-based in configuration order.
    IngredientId,
    "ingredient"
);
id_type!(
    /// Type-safe identifier for Orders. Monotonic; the first order is 10000.
    OrderId,
    "order"
);
id_type!(
    /// Type-safe identifier for Tables (1-based).
    TableId,
    "table"
);
id_type!(
    /// Type-safe identifier for cooks, servers and managers.
    StaffId,
    "staff"
);

/// A monotonic id source.
///
/// Each [`Restaurant`](crate::restaurant::Restaurant) owns its own sequences, so two
/// independent sessions never share counters.
#[derive(Debug)]
pub struct Sequence(AtomicU32);

impl Sequence {
    pub fn starting_at(first: u32) -> Self {
        Self(AtomicU32::new(first))
    }

    /// Returns the next value and advances the sequence.
    pub fn next<T: From<u32>>(&self) -> T {
        T::from(self.0.fetch_add(1, Ordering::Relaxed))
    }

    /// The value the next call to [`Sequence::next`] will return.
    pub fn peek(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(OrderId(10000).to_string(), "order_10000");
        assert_eq!(TableId(3).to_string(), "table_3");
        assert_eq!(IngredientId::from(7).to_string(), "ingredient_7");
    }

    #[test]
    fn test_sequences_are_independent() {
        let a = Sequence::starting_at(10000);
        let b = Sequence::starting_at(10000);
        let first: OrderId = a.next();
        let second: OrderId = a.next();
        let other: OrderId = b.next();
        assert_eq!(first, OrderId(10000));
        assert_eq!(second, OrderId(10001));
        assert_eq!(other, OrderId(10000));
        assert_eq!(a.peek(), 10002);
    }
}
