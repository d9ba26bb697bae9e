pub mod breakdown_loader;
pub mod submit_guard;
pub mod tooltip_placement;
pub mod validation;
