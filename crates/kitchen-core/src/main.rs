//! # Kitchen demo
//!
//! Runs one short service against an in-memory configuration:
//! 1. Opening the [`KitchenSystem`] and handing out role clients.
//! 2. Taking, cooking and delivering orders, including a return.
//! 3. Running cheese low, reordering and receiving a shipment.
//! 4. Billing the table and shutting down.
//!
//! ```bash
//! RUST_LOG=info cargo run -p kitchen-core
//! ```

use kitchen_core::config::{
    IngredientConfig, MenuItemConfig, RestaurantConfig, StaffConfig, TableLayout,
};
use kitchen_core::lifecycle::{setup_tracing, KitchenSystem};
use kitchen_core::model::{StaffId, TableId};
use std::collections::BTreeMap;
use tracing::{error, info, Instrument};

fn burger_bar() -> RestaurantConfig {
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
            cooks: vec!["Ana".to_string()],
            servers: vec!["Cy".to_string()],
            managers: vec!["Ed".to_string()],
        },
        ..RestaurantConfig::default()
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Opening the kitchen");
    let system = KitchenSystem::new(&burger_bar()).map_err(|e| e.to_string())?;

    let (cook, server, manager) = (StaffId(1), StaffId(2), StaffId(3));
    let cook = system.cook(cook).map_err(|e| e.to_string())?;
    let server = system.server(server).map_err(|e| e.to_string())?;
    let manager = system.manager(manager).map_err(|e| e.to_string())?;
    let table = TableId(1);

    let span = tracing::info_span!("service");
    let served = async {
        let burger = server
            .place_order(server.ticket("Burger", table, 1).remove("Onion", 1))
            .await?;
        let cheeseburger = server
            .place_order(server.ticket("Cheeseburger", table, 2).add("Cheese", 2))
            .await?;

        for order in [burger, cheeseburger] {
            cook.receive(order).await?;
            cook.cook(order).await?;
            server.deliver(order).await?;
        }

        info!(order = %burger, "Customer sends the burger back");
        let replacement = server
            .return_order(burger, Some("Overcooked".to_string()))
            .await?;
        manager.dispatch(replacement, cook.cook_id()).await?;
        cook.receive(replacement).await?;
        cook.cook(replacement).await?;
        server.deliver(replacement).await?;
        Ok::<_, kitchen_core::clients::ClientError>(())
    }
    .instrument(span)
    .await;

    if let Err(e) = served {
        error!(error = %e, "Service interrupted");
    }

    let span = tracing::info_span!("back_of_house");
    let restocked = async {
        for reorder in manager.pending_reorders().await? {
            info!(ingredient = %reorder.name, quantity = reorder.quantity, "Reorder pending");
        }
        manager.adjust_reorder("Cheese", 10).await?;
        let shipment = BTreeMap::from([("Cheese".to_string(), 10)]);
        manager.receive_shipment(shipment).await?;
        for (item, count) in manager.top_menu_items(3).await? {
            info!(item = %item, count, "Menu usage");
        }
        Ok::<_, kitchen_core::clients::ClientError>(())
    }
    .instrument(span)
    .await;

    if let Err(e) = restocked {
        error!(error = %e, "Restock failed");
    }

    let bill = server.bill(table, None).await.map_err(|e| e.to_string())?;
    info!(
        subtotal = bill.subtotal,
        tax = bill.tax,
        tip = bill.tip,
        total = bill.total,
        "Table settled"
    );
    server.clear_table(table).await.map_err(|e| e.to_string())?;

    drop((cook, server, manager));
    system.shutdown().await?;

    info!("Kitchen closed");
    Ok(())
}
