pub mod aggregate;
pub mod editor;
pub mod ordering;

pub use aggregate::{ConfigEntry, ConfigKind, InventoryConfig, NewConfigEntryDto};
