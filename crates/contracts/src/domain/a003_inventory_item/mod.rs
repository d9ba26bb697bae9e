pub mod aggregate;
pub mod available;
pub mod breakdown;

pub use aggregate::{
    CreateInventoryItemDto, InventoryFilter, InventoryGroupRow, InventoryItem, OwnershipType,
};
pub use available::{AvailableFilter, AvailableItems, AvailableSerialItem, AvailableStock};
pub use breakdown::{BreakdownBucket, BreakdownQuery, ItemBreakdown};
