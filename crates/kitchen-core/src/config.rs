//! # Restaurant Configuration
//!
//! Everything a [`Restaurant`](crate::restaurant::Restaurant) needs at construction time:
//! ingredient records, the menu, the table layout, the staff roster and a few policies.
//! Configuration is consumed once; nothing here is read again after the restaurant is built.
//!
//! The types are `serde`-deserializable so an external loader (file, environment, service) can
//! produce them. Loading is abstracted behind [`ConfigSource`]; the core owns no file format.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Reorder quantity used when none is configured.
pub const DEFAULT_REORDER_QUANTITY: u32 = 20;

/// An ingredient as supplied by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientConfig {
    pub name: String,
    /// Price charged per unit when added to a dish.
    #[serde(default)]
    pub price: f64,
    pub initial_amount: u32,
    #[serde(default)]
    pub threshold: u32,
    #[serde(default)]
    pub addable: bool,
}

impl IngredientConfig {
    pub fn new(name: impl Into<String>, initial_amount: u32, threshold: u32) -> Self {
        Self {
            name: name.into(),
            price: 0.0,
            initial_amount,
            threshold,
            addable: false,
        }
    }

    pub fn addable(mut self, price: f64) -> Self {
        self.addable = true;
        self.price = price;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemConfig {
    pub name: String,
    pub price: f64,
    pub recipe: BTreeMap<String, u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MenuItemConfig {
    pub fn new<'a>(
        name: impl Into<String>,
        price: f64,
        recipe: impl IntoIterator<Item = (&'a str, u32)>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            recipe: recipe
                .into_iter()
                .map(|(ingredient, qty)| (ingredient.to_string(), qty))
                .collect(),
            tags: Vec::new(),
        }
    }
}

/// Seat count per table; table ids are the 1-based positions in `seat_counts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub seat_counts: Vec<u32>,
}

/// Staff names by role. Ids are handed out in the order cooks, servers, managers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffConfig {
    pub cooks: Vec<String>,
    pub servers: Vec<String>,
    pub managers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingPolicy {
    pub tax_rate: f64,
    pub tip_rate: f64,
    /// Tables with at least this many seats are charged the automatic tip.
    pub tip_min_seats: u32,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: 0.13,
            tip_rate: 0.18,
            tip_min_seats: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    pub name: String,
    pub ingredients: Vec<IngredientConfig>,
    pub menu: Vec<MenuItemConfig>,
    pub tables: TableLayout,
    pub staff: StaffConfig,
    pub reorder_quantity: u32,
    pub billing: BillingPolicy,
    /// Capacity of the event pipeline's mailbox.
    pub mailbox_capacity: usize,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            name: "Restaurant".to_string(),
            ingredients: Vec::new(),
            menu: Vec::new(),
            tables: TableLayout::default(),
            staff: StaffConfig::default(),
            reorder_quantity: DEFAULT_REORDER_QUANTITY,
            billing: BillingPolicy::default(),
            mailbox_capacity: 32,
        }
    }
}

impl RestaurantConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName("restaurant"));
        }

        let mut ingredients = HashSet::new();
        for ingredient in &self.ingredients {
            if ingredient.name.trim().is_empty() {
                return Err(ConfigError::EmptyName("ingredient"));
            }
            if !ingredients.insert(ingredient.name.as_str()) {
                return Err(ConfigError::DuplicateIngredient(ingredient.name.clone()));
            }
        }

        let mut items = HashSet::new();
        for item in &self.menu {
            if item.name.trim().is_empty() {
                return Err(ConfigError::EmptyName("menu item"));
            }
            if !items.insert(item.name.as_str()) {
                return Err(ConfigError::DuplicateMenuItem(item.name.clone()));
            }
            if let Some(missing) = item
                .recipe
                .keys()
                .find(|name| !ingredients.contains(name.as_str()))
            {
                return Err(ConfigError::UnknownRecipeIngredient {
                    item: item.name.clone(),
                    ingredient: missing.clone(),
                });
            }
        }

        if let Some(index) = self.tables.seat_counts.iter().position(|&seats| seats == 0) {
            return Err(ConfigError::EmptyTable(index + 1));
        }

        let mut staff = HashSet::new();
        for name in self
            .staff
            .cooks
            .iter()
            .chain(&self.staff.servers)
            .chain(&self.staff.managers)
        {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyName("staff"));
            }
            if !staff.insert(name.as_str()) {
                return Err(ConfigError::DuplicateStaff(name.clone()));
            }
        }

        let billing = &self.billing;
        if !(billing.tax_rate >= 0.0 && billing.tip_rate >= 0.0) {
            return Err(ConfigError::InvalidBilling(format!(
                "rates must be non-negative (tax {}, tip {})",
                billing.tax_rate, billing.tip_rate
            )));
        }
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::Source("mailbox_capacity must be positive".into()));
        }

        Ok(())
    }
}

/// Supplies the restaurant's configuration at construction time.
pub trait ConfigSource {
    fn load(&self) -> Result<RestaurantConfig, ConfigError>;
}

/// An in-memory config is its own source.
impl ConfigSource for RestaurantConfig {
    fn load(&self) -> Result<RestaurantConfig, ConfigError> {
        self.validate()?;
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> RestaurantConfig {
        RestaurantConfig {
            ingredients: vec![
                IngredientConfig::new("Bun", 10, 2),
                IngredientConfig::new("Cheese", 5, 3).addable(0.75),
            ],
            menu: vec![MenuItemConfig::new("Burger", 8.0, [("Bun", 1)])],
            tables: TableLayout {
                seat_counts: vec![2, 8],
            },
            ..RestaurantConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = RestaurantConfig::default();
        assert_eq!(config.reorder_quantity, 20);
        assert_eq!(config.billing.tax_rate, 0.13);
        assert_eq!(config.billing.tip_rate, 0.18);
        assert_eq!(config.billing.tip_min_seats, 8);
        assert!(base().load().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = base();
        config.ingredients.push(IngredientConfig::new("Bun", 1, 0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateIngredient("Bun".into()))
        );

        let mut config = base();
        config.tables.seat_counts.push(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyTable(3)));

        let mut config = base();
        config.menu.push(MenuItemConfig::new("Soup", 4.0, [("Leek", 2)]));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownRecipeIngredient { .. })
        ));

        let mut config = base();
        config.staff.cooks.push("Ana".into());
        config.staff.servers.push("Ana".into());
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateStaff("Ana".into()))
        );

        let mut config = base();
        config.ingredients.push(IngredientConfig::new(" ", 1, 0));
        assert_eq!(config.validate(), Err(ConfigError::EmptyName("ingredient")));
    }
}
