#![allow(dead_code)]

use kitchen_core::config::{
    IngredientConfig, MenuItemConfig, RestaurantConfig, StaffConfig, TableLayout,
};

/// Cooks are staff 1 and 2, servers 3 and 4, the manager is 5.
pub fn burger_bar() -> RestaurantConfig {
    RestaurantConfig {
        name: "Burger Bar".to_string(),
        ingredients: vec![
            IngredientConfig::new("Bun", 20, 5),
            IngredientConfig::new("Patty", 10, 2),
            IngredientConfig::new("Cheese", 5, 3).addable(0.75),
            IngredientConfig::new("Onion", 10, 1).addable(0.25),
            IngredientConfig::new("Lettuce", 10, 2),
        ],
        menu: vec![
            MenuItemConfig::new("Burger", 8.0, [("Bun", 1), ("Patty", 1), ("Onion", 1)]),
            MenuItemConfig::new(
                "Cheeseburger",
                9.0,
                [("Bun", 1), ("Patty", 1), ("Cheese", 1)],
            ),
            MenuItemConfig::new("Salad", 6.0, [("Lettuce", 2), ("Onion", 1)]),
        ],
        tables: TableLayout {
            seat_counts: vec![4, 8],
        },
        staff: StaffConfig {
            cooks: vec!["Ana".to_string(), "Bo".to_string()],
            servers: vec!["Cy".to_string(), "Di".to_string()],
            managers: vec!["Ed".to_string()],
        },
        ..RestaurantConfig::default()
    }
}

/// A config with a single cheese left on the shelf.
pub fn last_cheese() -> RestaurantConfig {
    let mut config = burger_bar();
    config.ingredients[2].initial_amount = 1;
    config.ingredients[2].threshold = 0;
    config
}
