//! Plain data types shared by the engine: ids, menu items, orders, tables and requirement sets.

pub mod ids;
pub mod menu;
pub mod order;
pub mod requirements;
pub mod table;

pub use ids::*;
pub use menu::*;
pub use order::*;
pub use requirements::*;
pub use table::*;
