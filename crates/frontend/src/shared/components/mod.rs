pub mod error_boundary;
pub mod ordered_list_editor;
pub mod status_cell;

pub use error_boundary::{AppErrorBoundary, PageError};
pub use ordered_list_editor::OrderedListEditor;
pub use status_cell::StatusCell;
