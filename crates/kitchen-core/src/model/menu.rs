use crate::config::MenuItemConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dish on the menu.
///
/// The recipe is keyed by ingredient display name; names are resolved to ids when an order is
/// placed, so a recipe naming an unknown ingredient only fails the orders that use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub base_price: f64,
    pub recipe: BTreeMap<String, u32>,
    pub tags: Vec<String>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, base_price: f64) -> Self {
        Self {
            name: name.into(),
            base_price,
            recipe: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_ingredient(mut self, ingredient: impl Into<String>, quantity: u32) -> Self {
        *self.recipe.entry(ingredient.into()).or_insert(0) += quantity;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

impl From<&MenuItemConfig> for MenuItem {
    fn from(config: &MenuItemConfig) -> Self {
        Self {
            name: config.name.clone(),
            base_price: config.price,
            recipe: config.recipe.clone(),
            tags: config.tags.clone(),
        }
    }
}

/// Read-only recipe lookup.
pub trait MenuCatalog: Send + Sync {
    fn lookup(&self, name: &str) -> Option<MenuItem>;

    /// Every item name, used to seed usage statistics.
    fn names(&self) -> Vec<String>;
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: BTreeMap<String, MenuItem>,
}

impl Menu {
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.name.clone(), item))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl MenuCatalog for Menu {
    fn lookup(&self, name: &str) -> Option<MenuItem> {
        self.items.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_merges_repeated_ingredients() {
        let burger = MenuItem::new("Burger", 8.5)
            .with_ingredient("Bun", 1)
            .with_ingredient("Patty", 1)
            .with_ingredient("Patty", 1)
            .with_tag("grill");
        assert_eq!(burger.recipe.get("Patty"), Some(&2));
        assert_eq!(burger.tags, vec!["grill".to_string()]);
    }

    #[test]
    fn test_menu_lookup() {
        let menu = Menu::new([MenuItem::new("Fries", 3.0), MenuItem::new("Salad", 6.0)]);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.lookup("Fries").map(|i| i.base_price), Some(3.0));
        assert!(menu.lookup("Soup").is_none());
        assert_eq!(menu.names(), vec!["Fries".to_string(), "Salad".to_string()]);
    }
}
