//! # Restaurant Session
//!
//! The [`Restaurant`] owns every entity of one running session by id: the ingredient store,
//! the order book, the tables, the staff roster, the reorder set and the usage statistics. It
//! exposes one method per event; each method is its own transaction.
//!
//! ## Sharing
//!
//! A `Restaurant` is `Send + Sync` and is meant to sit behind an `Arc`. It can be driven by
//! the [`EventPipeline`](crate::pipeline::EventPipeline) actor, by a synchronous
//! [`replay`](crate::pipeline::replay), or directly from many threads at once.
//!
//! ## Lock Order
//!
//! Only these nestings occur, so concurrent events cannot deadlock:
//!
//! - an order, then the order book, then a table (filing a replacement)
//! - an order, then the staff roster
//! - an order, then a table
//! - an order, then ingredient slots, then usage statistics (cooking)
//! - the reorder set, then ingredient slots
//!
//! Ingredient slots are always taken in ascending id order. The roster and a table are never
//! held together. The order book is never held while an order lock is being acquired: handles
//! are cloned out of the book and the book lock is dropped first.
//!
//! ## Notifications & Snapshots
//!
//! Events collect their notifications in an outbox. Only after every lock is released are the
//! notifications delivered and a fresh [`Snapshot`] offered to the [`SnapshotSink`].

mod front;
mod orders;
mod stock;

use crate::config::{BillingPolicy, ConfigSource, RestaurantConfig};
use crate::error::{ConfigError, EngineError, EntityKind};
use crate::inventory::{IngredientStore, StockLevel};
use crate::model::{
    BillLine, IngredientId, Menu, MenuCatalog, MenuItem, Order, OrderId, Sequence, Table, TableId,
};
use crate::notify::{ActorId, NotificationSink, Outbox, TracingSink};
use crate::persistence::{
    DiscardSnapshots, IngredientRecord, MenuUsageRecord, ReorderRecord, Snapshot, SnapshotSink,
};
use crate::reorder::ReorderManager;
use crate::staff::{Role, StaffRoster};
use crate::statistics::StatisticsTracker;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::info;

/// The id of the first order of every session.
pub const FIRST_ORDER_ID: u32 = 10000;

#[derive(Default)]
struct OrderBook {
    orders: HashMap<OrderId, Arc<Mutex<Order>>>,
    /// Ids in creation order, which is also ascending id order.
    placed: Vec<OrderId>,
}

pub struct Restaurant {
    name: String,
    menu: Arc<dyn MenuCatalog>,
    store: IngredientStore,
    reorders: ReorderManager,
    statistics: StatisticsTracker,
    staff: StaffRoster,
    tables: Vec<Mutex<Table>>,
    book: RwLock<OrderBook>,
    order_ids: Sequence,
    billing: BillingPolicy,
    notifications: Arc<dyn NotificationSink>,
    snapshots: Arc<dyn SnapshotSink>,
}

/// Builds a [`Restaurant`] from configuration plus its external collaborators.
pub struct RestaurantBuilder {
    config: RestaurantConfig,
    menu: Option<Arc<dyn MenuCatalog>>,
    notifications: Arc<dyn NotificationSink>,
    snapshots: Arc<dyn SnapshotSink>,
}

impl RestaurantBuilder {
    /// Replaces the menu built from configuration.
    pub fn menu(mut self, catalog: Arc<dyn MenuCatalog>) -> Self {
        self.menu = Some(catalog);
        self
    }

    pub fn notifications(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifications = sink;
        self
    }

    pub fn snapshots(mut self, sink: Arc<dyn SnapshotSink>) -> Self {
        self.snapshots = sink;
        self
    }

    pub fn build(self) -> Result<Restaurant, ConfigError> {
        let config = self.config;
        config.validate()?;

        let menu: Arc<dyn MenuCatalog> = match self.menu {
            Some(catalog) => catalog,
            None => Arc::new(Menu::new(config.menu.iter().map(MenuItem::from))),
        };
        let store = IngredientStore::new(&config.ingredients);
        let statistics = StatisticsTracker::new(
            config.ingredients.iter().map(|i| i.name.clone()),
            menu.names(),
        );

        let staff = StaffRoster::new();
        for name in &config.staff.cooks {
            staff.hire(name.clone(), Role::Cook);
        }
        for name in &config.staff.servers {
            staff.hire(name.clone(), Role::Server);
        }
        for name in &config.staff.managers {
            staff.hire(name.clone(), Role::Manager);
        }

        let tables = config
            .tables
            .seat_counts
            .iter()
            .enumerate()
            .map(|(i, seats)| Mutex::new(Table::new(TableId(i as u32 + 1), *seats)))
            .collect();

        let restaurant = Restaurant {
            name: config.name.clone(),
            menu,
            store,
            reorders: ReorderManager::new(config.reorder_quantity),
            statistics,
            staff,
            tables,
            book: RwLock::new(OrderBook::default()),
            order_ids: Sequence::starting_at(FIRST_ORDER_ID),
            billing: config.billing.clone(),
            notifications: self.notifications,
            snapshots: self.snapshots,
        };

        // Stock that starts below threshold is reordered from the outset.
        let mut outbox = Outbox::default();
        restaurant.recompute_reorders(&mut outbox);
        outbox.deliver(&*restaurant.notifications);

        info!(
            restaurant = %restaurant.name,
            ingredients = restaurant.store.len(),
            tables = restaurant.tables.len(),
            "Restaurant opened"
        );
        Ok(restaurant)
    }
}

impl Restaurant {
    /// Starts building from an in-memory config. Notifications go to `tracing` and snapshots
    /// are discarded unless other sinks are supplied.
    pub fn builder(config: RestaurantConfig) -> RestaurantBuilder {
        RestaurantBuilder {
            config,
            menu: None,
            notifications: Arc::new(TracingSink),
            snapshots: Arc::new(DiscardSnapshots),
        }
    }

    pub fn from_source(source: &impl ConfigSource) -> Result<RestaurantBuilder, ConfigError> {
        Ok(Self::builder(source.load()?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &IngredientStore {
        &self.store
    }

    pub fn statistics(&self) -> &StatisticsTracker {
        &self.statistics
    }

    pub fn staff(&self) -> &StaffRoster {
        &self.staff
    }

    pub fn reorders(&self) -> &ReorderManager {
        &self.reorders
    }

    pub fn menu(&self) -> &dyn MenuCatalog {
        &*self.menu
    }

    pub fn billing(&self) -> &BillingPolicy {
        &self.billing
    }

    /// The id the next placed order will receive.
    pub fn next_order_id(&self) -> OrderId {
        OrderId(self.order_ids.peek())
    }

    pub fn order(&self, id: OrderId) -> Option<Order> {
        let handle = self.book.read().orders.get(&id).cloned()?;
        let order = handle.lock().clone();
        Some(order)
    }

    /// Every order ever placed, in creation order.
    pub fn orders(&self) -> Vec<Order> {
        let handles: Vec<Arc<Mutex<Order>>> = {
            let book = self.book.read();
            book.placed
                .iter()
                .filter_map(|id| book.orders.get(id).cloned())
                .collect()
        };
        handles.iter().map(|handle| handle.lock().clone()).collect()
    }

    pub fn table(&self, id: TableId) -> Option<Table> {
        self.table_slot(id).ok().map(|slot| slot.lock().clone())
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn stock(&self, ingredient: &str) -> Option<StockLevel> {
        let id = self.store.lookup(ingredient).ok()?;
        self.store.level(id)
    }

    pub fn pending_reorders(&self) -> Vec<ReorderRecord> {
        self.reorders
            .pending()
            .into_iter()
            .map(|(id, quantity)| ReorderRecord {
                id,
                name: self.store.name(id).unwrap_or_default().to_string(),
                quantity,
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        let reorders = self.pending_reorders();
        let ingredients = self
            .store
            .infos()
            .map(|info| {
                let level = self.store.level(info.id).unwrap_or_default();
                IngredientRecord {
                    id: info.id,
                    name: info.name.clone(),
                    amount: level.amount,
                    reserved: level.reserved,
                    threshold: info.threshold,
                    usage: self.statistics.ingredient_usage(&info.name),
                }
            })
            .collect();
        let menu_usage = self
            .statistics
            .menu_items()
            .into_iter()
            .map(|(name, usage)| MenuUsageRecord { name, usage })
            .collect();
        Snapshot {
            ingredients,
            menu_usage,
            reorders,
        }
    }

    // ---------------------------------------------------------------------
    // Internal helpers shared by the event methods
    // ---------------------------------------------------------------------

    fn order_handle(&self, id: OrderId) -> Result<Arc<Mutex<Order>>, EngineError> {
        self.book
            .read()
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::unknown(EntityKind::Order, id))
    }

    fn table_slot(&self, id: TableId) -> Result<&Mutex<Table>, EngineError> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.tables.get(index))
            .ok_or_else(|| EngineError::unknown(EntityKind::Table, id))
    }

    /// Resolves ingredient display names to ids.
    fn resolve(&self, names: &BTreeMap<String, u32>) -> Result<BTreeMap<IngredientId, u32>, EngineError> {
        names
            .iter()
            .map(|(name, qty)| self.store.lookup(name).map(|id| (id, *qty)))
            .collect()
    }

    /// Assigns the next id, puts the order on its table's bill and files it in the book.
    ///
    /// The book lock is held throughout, so ids are filed in ascending order and no one can
    /// reach the order before its bill line exists.
    fn file_order(&self, build: impl FnOnce(OrderId) -> Order) -> OrderId {
        let mut book = self.book.write();
        let id: OrderId = self.order_ids.next();
        let order = build(id);
        if let Ok(table) = self.table_slot(order.table) {
            table.lock().add_line(BillLine {
                order: id,
                seat: order.seat,
                item: order.item.clone(),
                price: order.price,
            });
        }
        book.placed.push(id);
        book.orders.insert(id, Arc::new(Mutex::new(order)));
        id
    }

    fn recompute_reorders(&self, outbox: &mut Outbox) {
        let delta = self.reorders.recompute(&self.store);
        for id in delta.raised {
            let name = self.store.name(id).unwrap_or_default();
            let quantity = self.reorders.quantity(id).unwrap_or_default();
            outbox.alert(
                ActorId::Managers,
                format!("Request: {quantity} units of {name}"),
            );
        }
        for id in delta.cleared {
            let name = self.store.name(id).unwrap_or_default();
            outbox.log(ActorId::Managers, format!("{name} restocked; reorder cleared"));
        }
    }

    /// Delivers notifications and offers a snapshot. Called with no lock held.
    fn finish(&self, outbox: Outbox) {
        outbox.deliver(&*self.notifications);
        self.snapshots.persist(&self.snapshot());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{IngredientConfig, MenuItemConfig, StaffConfig, TableLayout};
    use crate::notify::MemorySink;
    use crate::persistence::LatestSnapshot;

    /// Burger bar used across the restaurant tests.
    ///
    /// Staff ids: cooks Ana=1, Bo=2; servers Cy=3, Di=4; manager Ed=5.
    pub(crate) fn burger_bar() -> RestaurantConfig {
        RestaurantConfig {
            name: "Burger Bar".into(),
            ingredients: vec![
                IngredientConfig::new("Bun", 20, 5),
                IngredientConfig::new("Patty", 10, 2),
                IngredientConfig::new("Cheese", 5, 3).addable(0.75),
                IngredientConfig::new("Onion", 10, 1).addable(0.25),
                IngredientConfig::new("Lettuce", 10, 2),
            ],
            menu: vec![
                MenuItemConfig::new(
                    "Burger",
                    8.0,
                    [("Bun", 1), ("Patty", 1), ("Onion", 1), ("Lettuce", 1)],
                ),
                MenuItemConfig::new("Cheeseburger", 9.0, [("Bun", 1), ("Patty", 1), ("Cheese", 1)]),
                MenuItemConfig::new("Salad", 6.0, [("Lettuce", 2), ("Onion", 1)]),
            ],
            tables: TableLayout {
                seat_counts: vec![4, 8],
            },
            staff: StaffConfig {
                cooks: vec!["Ana".into(), "Bo".into()],
                servers: vec!["Cy".into(), "Di".into()],
                managers: vec!["Ed".into()],
            },
            ..RestaurantConfig::default()
        }
    }

    pub(crate) fn open(config: RestaurantConfig) -> (Restaurant, Arc<MemorySink>, Arc<LatestSnapshot>) {
        let sink = Arc::new(MemorySink::new());
        let snapshots = Arc::new(LatestSnapshot::new());
        let restaurant = Restaurant::builder(config)
            .notifications(sink.clone())
            .snapshots(snapshots.clone())
            .build()
            .unwrap();
        (restaurant, sink, snapshots)
    }

    #[test]
    fn test_build_from_config() {
        let (restaurant, _, _) = open(burger_bar());
        assert_eq!(restaurant.name(), "Burger Bar");
        assert_eq!(restaurant.table_count(), 2);
        assert_eq!(restaurant.table(TableId(2)).unwrap().seats, 8);
        assert!(restaurant.table(TableId(3)).is_none());
        assert_eq!(restaurant.next_order_id(), OrderId(FIRST_ORDER_ID));
        assert_eq!(restaurant.staff().find("Di").unwrap().id.0, 4);
        assert_eq!(restaurant.stock("Cheese").unwrap().amount, 5);
        assert!(restaurant.pending_reorders().is_empty());
    }

    #[test]
    fn test_low_initial_stock_is_reordered_at_open() {
        let mut config = burger_bar();
        config.ingredients[2].initial_amount = 1;
        let (restaurant, sink, _) = open(config);
        let pending = restaurant.pending_reorders();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Cheese");
        assert_eq!(pending[0].quantity, 20);
        assert_eq!(sink.for_actor(ActorId::Managers).len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = burger_bar();
        config.tables.seat_counts = vec![0];
        assert!(matches!(
            Restaurant::builder(config).build(),
            Err(ConfigError::EmptyTable(1))
        ));
    }

    #[test]
    fn test_snapshot_lists_every_ingredient() {
        let (restaurant, _, _) = open(burger_bar());
        let snapshot = restaurant.snapshot();
        assert_eq!(snapshot.ingredients.len(), 5);
        assert_eq!(snapshot.ingredients[0].name, "Bun");
        assert_eq!(snapshot.menu_usage.len(), 3);
        assert!(snapshot.reorders.is_empty());
    }
}
