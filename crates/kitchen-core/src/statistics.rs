//! Usage counters for ingredients and menu items.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Default)]
struct Counters {
    ingredients: BTreeMap<String, u64>,
    menu_items: BTreeMap<String, u64>,
}

/// Usage counters keyed by display name.
///
/// Counters only move when a cook commits an order, inside the same critical section as the
/// stock commit, so the counters and `consumed` stock never disagree.
#[derive(Default)]
pub struct StatisticsTracker {
    counters: Mutex<Counters>,
}

impl StatisticsTracker {
    /// Seeds zero counters for the known names. [`restore`](Self::restore) only accepts these.
    pub fn new<I, M>(ingredients: I, menu_items: M) -> Self
    where
        I: IntoIterator<Item = String>,
        M: IntoIterator<Item = String>,
    {
        Self {
            counters: Mutex::new(Counters {
                ingredients: ingredients.into_iter().map(|name| (name, 0)).collect(),
                menu_items: menu_items.into_iter().map(|name| (name, 0)).collect(),
            }),
        }
    }

    /// One menu item cooked, consuming the given ingredient quantities.
    pub fn record_consumption<'a>(
        &self,
        item: &str,
        ingredients: impl IntoIterator<Item = (&'a str, u32)>,
    ) {
        let mut counters = self.counters.lock();
        *counters.menu_items.entry(item.to_string()).or_insert(0) += 1;
        for (name, qty) in ingredients {
            *counters.ingredients.entry(name.to_string()).or_insert(0) += u64::from(qty);
        }
    }

    pub fn ingredient_usage(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .ingredients
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn menu_usage(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .menu_items
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn menu_items(&self) -> Vec<(String, u64)> {
        let counters = self.counters.lock();
        counters
            .menu_items
            .iter()
            .map(|(name, n)| (name.clone(), *n))
            .collect()
    }

    /// The `limit` most used ingredients, most used first; ties by name.
    pub fn top_ingredients(&self, limit: usize) -> Vec<(String, u64)> {
        rank(&self.counters.lock().ingredients, limit)
    }

    pub fn top_menu_items(&self, limit: usize) -> Vec<(String, u64)> {
        rank(&self.counters.lock().menu_items, limit)
    }

    /// Re-seeds counters saved before a restart. Names this tracker does not know are skipped.
    /// Returns how many counters were restored.
    pub fn restore<'a>(
        &self,
        ingredients: impl IntoIterator<Item = (&'a str, u64)>,
        menu_items: impl IntoIterator<Item = (&'a str, u64)>,
    ) -> usize {
        let mut counters = self.counters.lock();
        let mut restored = 0;
        for (name, usage) in ingredients {
            match counters.ingredients.get_mut(name) {
                Some(counter) => {
                    *counter = usage;
                    restored += 1;
                }
                None => warn!(ingredient = name, "Skipping usage for unknown ingredient"),
            }
        }
        for (name, usage) in menu_items {
            match counters.menu_items.get_mut(name) {
                Some(counter) => {
                    *counter = usage;
                    restored += 1;
                }
                None => warn!(item = name, "Skipping usage for unknown menu item"),
            }
        }
        restored
    }
}

fn rank(counters: &BTreeMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counters.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> StatisticsTracker {
        StatisticsTracker::new(
            ["Bun", "Cheese", "Patty"].map(String::from),
            ["Burger", "Fries"].map(String::from),
        )
    }

    #[test]
    fn test_record_and_rank() {
        let stats = tracker();
        stats.record_consumption("Burger", [("Bun", 1), ("Patty", 2)]);
        stats.record_consumption("Burger", [("Bun", 1), ("Patty", 1), ("Cheese", 1)]);
        stats.record_consumption("Fries", Vec::<(&str, u32)>::new());

        assert_eq!(stats.menu_usage("Burger"), 2);
        assert_eq!(stats.ingredient_usage("Patty"), 3);
        assert_eq!(
            stats.top_ingredients(2),
            vec![("Patty".to_string(), 3), ("Bun".to_string(), 2)]
        );
        assert_eq!(stats.top_menu_items(5)[0], ("Burger".to_string(), 2));
    }

    #[test]
    fn test_restore_skips_unknown_names() {
        let stats = tracker();
        let restored = stats.restore([("Cheese", 7), ("Leek", 4)], [("Burger", 9)]);
        assert_eq!(restored, 2);
        assert_eq!(stats.ingredient_usage("Cheese"), 7);
        assert_eq!(stats.ingredient_usage("Leek"), 0);
        assert_eq!(stats.menu_usage("Burger"), 9);
    }
}
