pub mod entity_metadata;

pub use entity_metadata::{new_id, EntityMetadata};
