pub mod seed;
pub mod store;

pub use store::{get_store, initialize_store, MockStore, RenameBackup, Session};
